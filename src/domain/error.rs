// Domain errors raised while generating survey tables
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GenerationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
