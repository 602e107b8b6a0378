//! WCAG 2.1 A/AA audit engine over captured DOM snapshots.
//!
//! [`AuditEngine`] wires the built-in rule catalog, the policy and the report aggregator
//! together; [`AuditSession`] drives a [`SnapshotSource`] through the capture plan first.
//! Snapshot capture is the only asynchronous step; evaluation is pure.

pub mod engine;
pub mod errors;
pub mod metrics;
pub mod session;
pub mod telemetry;

pub use engine::AuditEngine;
pub use errors::EngineError;
pub use session::{plan_from, AuditSession, Capture, PageCaptures};
pub use telemetry::init_tracing;

pub use a11y_core_types::{LevelFilter, Severity, WcagLevel};
pub use a11y_policy_center::{default_policy, load_policy, AuditPolicy};
pub use a11y_report::{render_text, to_json, Report, ReportSummary};
pub use a11y_rule_registry::{ElementRef, Finding, FindingKind, Rule, RuleRegistry, RuleSelection};
pub use a11y_snapshot_model::{
    CapturePlan, PageHandle, RecordedSnapshots, Snapshot, SnapshotBuilder, SnapshotSource,
    Viewport,
};
