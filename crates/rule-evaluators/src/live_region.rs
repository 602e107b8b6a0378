//! Status messages (4.1.3): containers that look like status output must be live regions.

use a11y_core_types::{Severity, WcagLevel};
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::{ElementView, Snapshot};

use crate::denylists::{status_hint_in, ARIA_LIVE_VALUES, LIVE_REGION_ROLES};

fn is_live_region(view: &ElementView<'_>) -> bool {
    let announced = view
        .attr("aria-live")
        .map(|value| value.trim().to_ascii_lowercase())
        .map_or(false, |value| value == "polite" || value == "assertive");
    announced
        || view.is_tag("output")
        || view
            .explicit_role()
            .map_or(false, |role| LIVE_REGION_ROLES.contains(&role.as_str()))
}

/// The hint matched by the element's id, class list or test id.
fn status_hint(view: &ElementView<'_>) -> Option<&'static str> {
    ["id", "class", "data-testid"]
        .iter()
        .filter_map(|name| view.attr(name))
        .find_map(status_hint_in)
}

pub struct StatusMessages;

impl StatusMessages {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("4.1.3", "status-messages", WcagLevel::AA, Severity::Medium)
                .title("Status messages must be announced")
                .remediation("Add role=\"status\" (or aria-live=\"polite\") to the container before its content changes."),
            StatusMessages,
        )
    }
}

impl PageCheck for StatusMessages {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.views() {
            let Some(hint) = status_hint(&view) else {
                continue;
            };
            // an explicit aria-live="off" is a deliberate opt-out
            if view.attr("aria-live").map(str::trim) == Some("off") {
                continue;
            }
            if view.closest(|candidate| is_live_region(candidate)).is_some() {
                continue;
            }
            if view
                .descendants()
                .any(|child| status_hint(&child).is_some() && is_live_region(&child))
            {
                continue;
            }
            findings.element(
                &view,
                format!("\"{hint}\" container is not a live region, so updates are not announced"),
            );
        }
    }
}

pub struct AriaLiveValue;

impl AriaLiveValue {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("4.1.3", "aria-live-value", WcagLevel::AA, Severity::Low)
                .title("aria-live must use a valid politeness value")
                .remediation("Use aria-live=\"polite\", \"assertive\" or \"off\"."),
            AriaLiveValue,
        )
    }
}

impl PageCheck for AriaLiveValue {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| view.has_attr("aria-live")) {
            let value = view.attr("aria-live").unwrap_or_default().trim();
            if !ARIA_LIVE_VALUES.contains(&value) {
                findings.element(&view, format!("aria-live=\"{value}\" is not a valid politeness value"));
            }
        }
    }
}
