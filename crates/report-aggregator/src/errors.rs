use a11y_core_types::AuditError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("report serialization failed: {0}")]
    Serialize(String),
    #[error("page audit task failed: {0}")]
    Join(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialize(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ReportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ReportError::Join(err.to_string())
    }
}

impl From<ReportError> for AuditError {
    fn from(err: ReportError) -> Self {
        AuditError::new(err.to_string())
    }
}
