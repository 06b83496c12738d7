use crate::application::series_generator::JitterSpec;
use crate::domain::calendar::MonthAnchor;
use crate::domain::occasion::Score;
use serde::Deserialize;

const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SurveyConfig {
    pub dashboard: DashboardSettings,
    pub calendar: CalendarConfig,
    pub shares: ShareDimensions,
    pub regional_ticket: JitteredSeriesConfig,
    pub brand_consideration: JitteredSeriesConfig,
    pub spend_intent: CategorySetConfig,
    pub non_essential_share: StaticSharesConfig,
    #[serde(default)]
    pub occasions: Vec<OccasionConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub title: String,
    pub seed: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalendarConfig {
    pub start: String,
    pub periods: usize,
    #[serde(default)]
    pub anchor: MonthAnchor,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShareDimensions {
    pub channels: CategorySetConfig,
    pub motivators: CategorySetConfig,
    pub media_habits: CategorySetConfig,
    pub purpose: CategorySetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CategorySetConfig {
    pub label: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JitteredSeriesConfig {
    pub label: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub base: [i64; 2],
    pub jitter: [i64; 2],
    pub floor: Option<i64>,
    pub ceiling: Option<i64>,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl JitteredSeriesConfig {
    pub fn spec(&self) -> JitterSpec {
        JitterSpec {
            base: (self.base[0], self.base[1]),
            jitter: (self.jitter[0], self.jitter[1]),
            floor: self.floor,
            ceiling: self.ceiling,
            scale: self.scale,
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticSharesConfig {
    pub label: String,
    #[serde(default)]
    pub shares: Vec<StaticShare>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticShare {
    pub category: String,
    pub share: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OccasionConfig {
    pub name: String,
    #[serde(default)]
    pub territories: Vec<Score>,
    #[serde(default)]
    pub drivers: Vec<Score>,
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .add_source(environment())
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_survey_config() -> anyhow::Result<SurveyConfig> {
    layered_survey_config(config::File::with_name("config/survey"), environment())
}

/// Survey file first, environment overrides on top.
fn layered_survey_config<F>(file: F, env: config::Environment) -> anyhow::Result<SurveyConfig>
where
    F: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Parse a survey configuration from TOML text, without environment overrides.
pub fn parse_survey_config(toml: &str) -> anyhow::Result<SurveyConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

// DASHBOARD__SERVER__BIND=127.0.0.1:9000, DASHBOARD__DASHBOARD__SEED=7, ...
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
