//! ARIA role, attribute and state validity (4.1.2).

use a11y_core_types::{Severity, WcagLevel};
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::Snapshot;

use crate::denylists::{allowed_state_values, is_valid_aria_attribute, is_valid_role};

pub struct AriaValidity;

impl AriaValidity {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("4.1.2", "aria-validity", WcagLevel::A, Severity::Medium)
                .title("ARIA roles, attributes and states must be valid")
                .remediation("Use roles and aria-* attributes defined by WAI-ARIA with their allowed values."),
            AriaValidity,
        )
    }
}

impl PageCheck for AriaValidity {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.views() {
            if let Some(role) = view.attr("role") {
                let invalid: Vec<&str> = role
                    .split_whitespace()
                    .filter(|token| !is_valid_role(&token.to_ascii_lowercase()))
                    .collect();
                if !invalid.is_empty() {
                    findings.element(&view, format!("role \"{}\" is not a valid ARIA role", invalid.join(" ")));
                }
            }
            for (name, value) in &view.node().attributes {
                if !name.starts_with("aria-") {
                    continue;
                }
                if !is_valid_aria_attribute(name) {
                    findings.element(&view, format!("{name} is not a valid ARIA attribute"));
                    continue;
                }
                if let Some(allowed) = allowed_state_values(name) {
                    if !allowed.contains(&value.as_str()) {
                        findings.element(
                            &view,
                            format!(
                                "{name}=\"{value}\" must be one of {}",
                                allowed
                                    .iter()
                                    .map(|v| format!("\"{v}\""))
                                    .collect::<Vec<_>>()
                                    .join(", ")
                            ),
                        );
                    }
                }
            }
        }
    }
}

/// Focusable elements hidden from assistive technology with `aria-hidden="true"`.
pub struct AriaHiddenFocus;

impl AriaHiddenFocus {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("4.1.2", "aria-hidden-focus", WcagLevel::A, Severity::High)
                .title("aria-hidden content must not be focusable")
                .remediation("Remove aria-hidden, or take the element out of the Tab order with tabindex=\"-1\" or disabled."),
            AriaHiddenFocus,
        )
    }
}

impl PageCheck for AriaHiddenFocus {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let focusable = snapshot.elements_matching(|view| {
            (view.is_natively_interactive() || view.tabindex().map_or(false, |index| index >= 0))
                && view.tabindex().map_or(true, |index| index >= 0)
                && !view.is_disabled()
        });
        for view in focusable {
            let hidden_by = std::iter::once(view).chain(view.ancestors()).find(|candidate| {
                candidate
                    .attr("aria-hidden")
                    .map_or(false, |value| value.trim().eq_ignore_ascii_case("true"))
            });
            let Some(hidden_by) = hidden_by else {
                continue;
            };
            if view.style().is_display_none()
                || view.ancestors().any(|ancestor| ancestor.style().is_display_none())
            {
                continue;
            }
            let origin = if hidden_by.id() == view.id() {
                "itself".to_string()
            } else {
                hidden_by.selector()
            };
            findings.element(
                &view,
                format!("focusable <{}> is inside aria-hidden content ({origin})", view.tag()),
            );
        }
    }
}
