// Repository trait for survey data access
use crate::domain::snapshot::SurveySnapshot;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// The generated snapshot; the same instance for the lifetime of the repository
    async fn snapshot(&self) -> anyhow::Result<Arc<SurveySnapshot>>;
}
