use std::path::Path;

use a11y_core_types::LevelFilter;
use a11y_policy_center::{default_policy, load_policy, AuditPolicy};
use a11y_report::{audit_pages_concurrently, run_audit, Report};
use a11y_rule_evaluators::register_builtin;
use a11y_rule_registry::{Rule, RuleRegistry, RuleSelection};
use a11y_snapshot_model::Snapshot;
use tracing::info;

use crate::errors::EngineError;

/// Built-in rules plus any custom ones, configured by one [`AuditPolicy`].
pub struct AuditEngine {
    policy: AuditPolicy,
    registry: RuleRegistry,
    selection: RuleSelection,
}

impl AuditEngine {
    pub fn new(policy: AuditPolicy) -> Result<Self, EngineError> {
        let mut registry = RuleRegistry::new();
        register_builtin(&mut registry, &policy)?;
        let selection = RuleSelection::from(&policy);
        info!(
            rules = registry.len(),
            levels = ?selection.levels,
            "audit engine ready"
        );
        Ok(Self {
            policy,
            registry,
            selection,
        })
    }

    pub fn with_defaults() -> Result<Self, EngineError> {
        Self::new(default_policy())
    }

    /// Defaults, then the YAML file at `path`, then `A11Y_POLICY` environment overrides.
    pub fn from_policy_file(path: &Path) -> Result<Self, EngineError> {
        Self::new(load_policy(Some(path))?)
    }

    /// Adds a rule after the built-ins; duplicate keys are rejected.
    pub fn register_rule<R>(&mut self, rule: R) -> Result<(), EngineError>
    where
        R: Rule + 'static,
    {
        self.registry.register(rule)?;
        Ok(())
    }

    pub fn policy(&self) -> &AuditPolicy {
        &self.policy
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Selection derived from the policy scope.
    pub fn selection(&self) -> &RuleSelection {
        &self.selection
    }

    /// Audits snapshots given in visitation order with the policy's scope.
    pub fn audit(&self, snapshots: &[Snapshot]) -> Report {
        run_audit(&self.registry, snapshots, &self.selection)
    }

    /// Audits with the policy's scope narrowed to `levels`.
    pub fn audit_levels(&self, snapshots: &[Snapshot], levels: LevelFilter) -> Report {
        let selection = RuleSelection {
            levels,
            ..self.selection.clone()
        };
        run_audit(&self.registry, snapshots, &selection)
    }

    pub fn audit_with(&self, snapshots: &[Snapshot], selection: &RuleSelection) -> Report {
        run_audit(&self.registry, snapshots, selection)
    }

    /// Same report as [`audit`](Self::audit), one blocking task per page.
    pub async fn audit_concurrently(&self, snapshots: Vec<Snapshot>) -> Result<Report, EngineError> {
        Ok(audit_pages_concurrently(&self.registry, snapshots, &self.selection).await?)
    }
}
