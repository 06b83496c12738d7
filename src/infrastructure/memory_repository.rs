// In-memory repository - generates the snapshot once and serves it read-only
use crate::application::survey_generator::build_snapshot;
use crate::application::survey_repository::SurveyRepository;
use crate::domain::error::GenerationError;
use crate::domain::snapshot::SurveySnapshot;
use crate::infrastructure::config::SurveyConfig;
use crate::infrastructure::seeded_rng::SeededRng;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct InMemorySurveyRepository {
    snapshot: Arc<SurveySnapshot>,
}

impl InMemorySurveyRepository {
    pub fn new(snapshot: SurveySnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Generate the snapshot from configuration, seeding a fresh random source.
    pub fn generate(config: &SurveyConfig) -> Result<Self, GenerationError> {
        let mut rng = SeededRng::new(config.dashboard.seed);
        tracing::debug!("Seeding survey generation with {}", config.dashboard.seed);

        let snapshot = build_snapshot(config, &mut rng)?;
        Ok(Self::new(snapshot))
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyRepository {
    async fn snapshot(&self) -> anyhow::Result<Arc<SurveySnapshot>> {
        Ok(self.snapshot.clone())
    }
}
