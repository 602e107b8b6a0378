use a11y_core_types::AuditError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate rule {criterion_id}/{variant}")]
    DuplicateRule {
        criterion_id: String,
        variant: String,
    },
}

impl RegistryError {
    pub fn into_audit_error(self, detail: impl Into<String>) -> AuditError {
        AuditError::new(format!("{}: {}", self, detail.into()))
    }
}

/// Failure inside a rule's evaluation; downgraded to an `evaluator-error` finding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule input mismatch: {0}")]
    InputMismatch(String),
    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

impl RuleError {
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }
}
