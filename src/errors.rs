//! Errors surfaced by the engine facade and capture session.

use a11y_core_types::AuditError;
use a11y_policy_center::PolicyError;
use a11y_report::ReportError;
use a11y_rule_registry::RegistryError;
use a11y_snapshot_model::SnapshotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("telemetry: {0}")]
    Telemetry(String),
}

impl From<EngineError> for AuditError {
    fn from(err: EngineError) -> Self {
        AuditError::new(err.to_string())
    }
}
