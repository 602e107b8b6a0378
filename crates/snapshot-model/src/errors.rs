use a11y_core_types::AuditError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("node index {0} out of range")]
    NodeOutOfRange(usize),
    #[error("malformed snapshot: {0}")]
    Malformed(String),
    #[error("capture failed: {0}")]
    Capture(String),
}

impl SnapshotError {
    pub fn into_audit_error(self, detail: impl Into<String>) -> AuditError {
        AuditError::new(format!("{}: {}", self, detail.into()))
    }
}

impl From<SnapshotError> for AuditError {
    fn from(value: SnapshotError) -> Self {
        AuditError::new(value.to_string())
    }
}
