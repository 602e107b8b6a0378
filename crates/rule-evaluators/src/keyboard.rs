//! Keyboard reachability (2.1.1) and keyboard traps (2.1.2), read from the recorded Tab sequence.

use std::collections::HashSet;

use a11y_core_types::{Severity, WcagLevel};
use a11y_policy_center::ThresholdPolicy;
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::{NodeId, Snapshot};

fn focused_nodes(snapshot: &Snapshot) -> HashSet<NodeId> {
    snapshot
        .focus_sequence
        .iter()
        .filter_map(|stop| stop.target)
        .collect()
}

/// Interactive elements pulled out of the Tab order by a negative `tabindex`.
pub struct NegativeTabindex;

impl NegativeTabindex {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.1.1", "negative-tabindex", WcagLevel::A, Severity::High)
                .title("Interactive elements must be keyboard reachable")
                .remediation("Remove tabindex=\"-1\" from controls users need to operate, or provide another keyboard path."),
            NegativeTabindex,
        )
    }
}

impl PageCheck for NegativeTabindex {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let reached = focused_nodes(snapshot);
        let candidates = snapshot.elements_matching(|view| {
            view.tabindex().map_or(false, |index| index < 0) && view.is_interactive()
        });
        for view in candidates {
            if view.is_hidden() || view.is_disabled() || reached.contains(&view.id()) {
                continue;
            }
            findings.element(
                &view,
                format!(
                    "{} has tabindex={} and cannot be reached with the keyboard",
                    view.role().unwrap_or_else(|| view.tag().to_string()),
                    view.tabindex().unwrap_or(-1)
                ),
            );
        }
    }
}

/// `onclick` on elements that are neither focusable nor exposed as widgets.
pub struct ClickHandler;

impl ClickHandler {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.1.1", "click-handler", WcagLevel::A, Severity::High)
                .title("Click handlers need keyboard equivalents")
                .remediation("Use a <button> or link, or add tabindex=\"0\", a widget role and key handlers."),
            ClickHandler,
        )
    }
}

impl PageCheck for ClickHandler {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let candidates = snapshot.elements_matching(|view| {
            view.has_attr("onclick") && !view.is_tag("html") && !view.is_tag("body")
        });
        for view in candidates {
            if view.is_interactive() || view.tabindex().is_some() || view.is_hidden() {
                continue;
            }
            findings.element(
                &view,
                format!("<{}> handles clicks but is not keyboard focusable", view.tag()),
            );
        }
    }
}

/// Focus stuck on one element for more than `limit` consecutive Tab presses.
pub struct KeyboardTrap {
    limit: usize,
}

impl KeyboardTrap {
    pub fn rule(thresholds: &ThresholdPolicy) -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.1.2", "keyboard-trap", WcagLevel::A, Severity::High)
                .title("Keyboard focus must not be trapped")
                .remediation("Make sure Tab and Shift+Tab move focus out of the component, or document an escape key."),
            KeyboardTrap {
                limit: thresholds.trap_repeat_limit,
            },
        )
    }
}

impl PageCheck for KeyboardTrap {
    fn applies(&self, snapshot: &Snapshot) -> bool {
        snapshot.focus_sequence.len() > self.limit
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let mut current: Option<NodeId> = None;
        let mut run = 0usize;
        let mut reported = false;
        for stop in &snapshot.focus_sequence {
            match stop.target {
                Some(target) if current == Some(target) => run += 1,
                target => {
                    current = target;
                    run = usize::from(target.is_some());
                    reported = false;
                }
            }
            if run > self.limit && !reported {
                reported = true;
                let Some(node) = current.and_then(|target| snapshot.get(target)) else {
                    continue;
                };
                findings.element(
                    &snapshot.view(node.id),
                    format!(
                        "focus stayed on this element for more than {} consecutive Tab presses",
                        self.limit
                    ),
                );
            }
        }
    }
}
