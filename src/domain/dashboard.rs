// Dashboard domain model - tabs, panels and declarative chart descriptions
use super::occasion::Score;
use super::snapshot::Dataset;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Behavior,
    Consumption,
    SpendIntent,
    Competition,
    Occasions,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Behavior,
        Tab::Consumption,
        Tab::SpendIntent,
        Tab::Competition,
        Tab::Occasions,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Tab::Behavior => "behavior",
            Tab::Consumption => "consumption",
            Tab::SpendIntent => "spend_intent",
            Tab::Competition => "competition",
            Tab::Occasions => "occasions",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Behavior => "Tendências de comportamento (Quem são)",
            Tab::Consumption => "Tendências de consumo (O que consomem)",
            Tab::SpendIntent => "Intenção & disposição para gastar",
            Tab::Competition => "Cenário competitivo (Marca & concorrentes)",
            Tab::Occasions => "Zoom em datas (Mood & drivers)",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    /// Areas stacked and normalized to 100% per x value.
    StackedArea,
    Bar,
    /// Bars laid out horizontally, strongest value on top.
    HorizontalBar,
    /// Closed, filled polar line.
    Radar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Percent,
    Currency,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub x_field: String,
    pub x_title: String,
    pub y_field: String,
    pub y_title: String,
    pub color_field: Option<String>,
    pub color_title: Option<String>,
    pub format: ValueFormat,
    pub value_domain: Option<(f64, f64)>,
    pub show_points: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PanelData {
    Dataset(Dataset),
    Scores { scores: Vec<Score> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub chart: ChartSpec,
    pub data: PanelData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selector {
    pub name: String,
    pub prompt: String,
    pub options: Vec<SelectorOption>,
    pub selected: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub slug: String,
    pub title: String,
    pub selector: Option<Selector>,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSummary {
    pub slug: String,
    pub title: String,
    pub selector: Option<Selector>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    /// Shared x-axis of every time-series panel
    pub time_buckets: Vec<NaiveDate>,
    pub tabs: Vec<TabSummary>,
}

impl Dashboard {
    pub fn new(title: String, time_buckets: Vec<NaiveDate>, tabs: Vec<TabSummary>) -> Self {
        Self {
            title,
            time_buckets,
            tabs,
        }
    }
}
