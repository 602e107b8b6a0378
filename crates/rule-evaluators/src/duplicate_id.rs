use std::collections::HashMap;

use a11y_core_types::{Severity, WcagLevel};
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::{NodeId, Snapshot};

/// One finding per repeated `id` value, anchored at its first occurrence (4.1.1).
pub struct DuplicateId;

impl DuplicateId {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("4.1.1", "duplicate-id", WcagLevel::A, Severity::Medium)
                .title("id attribute values must be unique")
                .remediation("Give every element a unique id; label and aria references resolve to the first match only."),
            DuplicateId,
        )
    }
}

impl PageCheck for DuplicateId {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<NodeId>> = HashMap::new();
        for node in &snapshot.elements {
            let Some(id) = node.attr("id").map(str::trim).filter(|id| !id.is_empty()) else {
                continue;
            };
            let group = groups.entry(id).or_default();
            if group.is_empty() {
                order.push(id);
            }
            group.push(node.id);
        }
        for id in order {
            let Some(group) = groups.get(id) else {
                continue;
            };
            if group.len() > 1 {
                findings.element(
                    &snapshot.view(group[0]),
                    format!("id \"{id}\" is used by {} elements", group.len()),
                );
            }
        }
    }
}
