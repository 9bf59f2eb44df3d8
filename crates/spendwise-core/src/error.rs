use spendwise_domain::{ModelError, PeriodError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Budget {budget_id} has no resolvable period: {reason}")]
    InvalidPeriod { budget_id: Uuid, reason: String },
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },
}

impl From<ModelError> for CoreError {
    fn from(err: ModelError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<PeriodError> for CoreError {
    fn from(err: PeriodError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
