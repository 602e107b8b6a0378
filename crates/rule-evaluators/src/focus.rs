//! Focus order (2.4.3) and focus visibility (2.4.7).

use std::collections::HashSet;

use a11y_core_types::{Severity, WcagLevel};
use a11y_policy_center::ThresholdPolicy;
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::{ElementView, Snapshot};

/// Any `tabindex` above zero, whatever the layout.
pub struct PositiveTabindex;

impl PositiveTabindex {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.4.3", "positive-tabindex", WcagLevel::A, Severity::Medium)
                .title("Avoid positive tabindex values")
                .remediation("Use tabindex=\"0\" and order the DOM to match the visual order instead."),
            PositiveTabindex,
        )
    }
}

impl PageCheck for PositiveTabindex {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| view.tabindex().map_or(false, |index| index > 0)) {
            findings.element(
                &view,
                format!(
                    "tabindex={} overrides the natural focus order",
                    view.tabindex().unwrap_or_default()
                ),
            );
        }
    }
}

/// Consecutive focus stops that jump back up the page by more than the tolerance.
///
/// Body stops reset the comparison, as does a stop without geometry. Repeated focus on the
/// same element is ignored here; the trap rule owns that case.
pub struct FocusOrder {
    tolerance: f64,
}

impl FocusOrder {
    pub fn rule(thresholds: &ThresholdPolicy) -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.4.3", "focus-order", WcagLevel::A, Severity::Medium)
                .title("Focus order should follow the reading order")
                .remediation("Reorder the DOM or remove tabindex overrides so focus moves top to bottom."),
            FocusOrder {
                tolerance: thresholds.focus_jump_tolerance_px,
            },
        )
    }
}

impl PageCheck for FocusOrder {
    fn applies(&self, snapshot: &Snapshot) -> bool {
        snapshot.focus_sequence.len() >= 2
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let mut previous: Option<ElementView<'_>> = None;
        let mut flagged = HashSet::new();
        for stop in &snapshot.focus_sequence {
            let Some(view) = stop
                .target
                .and_then(|target| snapshot.get(target))
                .map(|node| ElementView::new(snapshot, node))
            else {
                previous = None;
                continue;
            };
            let Some(top) = view.bounding_box().map(|bbox| bbox.top()) else {
                previous = None;
                continue;
            };
            if let Some(prev) = previous {
                if prev.id() == view.id() {
                    continue;
                }
                let prev_top = prev.bounding_box().map_or(top, |bbox| bbox.top());
                if prev_top - top > self.tolerance && flagged.insert(view.id()) {
                    findings.element(
                        &view,
                        format!(
                            "focus moved {:.0}px back up the page from {}",
                            prev_top - top,
                            prev.selector()
                        ),
                    );
                }
            }
            previous = Some(view);
        }
    }
}

/// Focused elements whose recorded indicator has neither an outline nor a box-shadow.
pub struct FocusVisible;

impl FocusVisible {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.4.7", "focus-visible", WcagLevel::AA, Severity::High)
                .title("Keyboard focus must be visible")
                .remediation("Do not remove the outline on :focus without replacing it with a visible style."),
            FocusVisible,
        )
    }
}

impl PageCheck for FocusVisible {
    fn applies(&self, snapshot: &Snapshot) -> bool {
        snapshot
            .focus_sequence
            .iter()
            .any(|stop| stop.indicator.is_some())
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let mut seen = HashSet::new();
        for stop in &snapshot.focus_sequence {
            let (Some(target), Some(indicator)) = (stop.target, stop.indicator.as_ref()) else {
                continue;
            };
            if indicator.is_visible() || !seen.insert(target) {
                continue;
            }
            if let Some(node) = snapshot.get(target) {
                findings.element(
                    &ElementView::new(snapshot, node),
                    "no outline or box-shadow is drawn while this element has focus",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run_page;
    use a11y_policy_center::default_policy;
    use a11y_snapshot_model::{FocusIndicator, SnapshotBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn positive_tabindex_is_flagged_without_geometry() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let jumpy = builder.child(root, "input");
        builder.attr(jumpy, "tabindex", "5");
        let natural = builder.child(root, "input");
        builder.attr(natural, "tabindex", "0");
        let snapshot = builder.build();

        let findings = run_page(&PositiveTabindex::rule(), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element.node(), Some(jumpy));
        assert_eq!(findings[0].message, "tabindex=5 overrides the natural focus order");
    }

    #[test]
    fn backwards_jump_beyond_tolerance_is_flagged() {
        let thresholds = default_policy().thresholds;
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let header_link = builder.child(root, "a");
        builder.attr(header_link, "href", "/").bbox(header_link, 0.0, 20.0, 80.0, 30.0);
        let footer_link = builder.child(root, "a");
        builder.attr(footer_link, "href", "/terms").bbox(footer_link, 0.0, 1500.0, 80.0, 30.0);
        let cart = builder.child(root, "button");
        builder.bbox(cart, 900.0, 100.0, 80.0, 30.0);
        let side = builder.child(root, "button");
        builder.bbox(side, 900.0, 1350.0, 80.0, 30.0);
        builder.focus(header_link).focus(footer_link).focus(cart).focus(side);
        let snapshot = builder.build();

        let findings = run_page(&FocusOrder::rule(&thresholds), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element.node(), Some(cart));
    }

    #[test]
    fn body_stop_resets_the_comparison() {
        let thresholds = default_policy().thresholds;
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let last = builder.child(root, "a");
        builder.attr(last, "href", "/terms").bbox(last, 0.0, 1500.0, 80.0, 30.0);
        let first = builder.child(root, "a");
        builder.attr(first, "href", "/").bbox(first, 0.0, 10.0, 80.0, 30.0);
        builder.focus(last).focus_body().focus(first);
        let snapshot = builder.build();
        assert!(run_page(&FocusOrder::rule(&thresholds), &snapshot).is_empty());
    }

    #[test]
    fn invisible_focus_is_flagged_once() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let plain = builder.child(root, "button");
        let styled = builder.child(root, "button");
        let none = FocusIndicator {
            outline_style: Some("none".into()),
            ..FocusIndicator::default()
        };
        let zero_width = FocusIndicator {
            outline_style: Some("solid".into()),
            outline_width_px: Some(0.0),
            ..FocusIndicator::default()
        };
        let ring = FocusIndicator {
            box_shadow: Some("0 0 0 3px #1d4ed8".into()),
            ..FocusIndicator::default()
        };
        builder
            .focus_with(plain, none)
            .focus_with(styled, ring)
            .focus_with(plain, zero_width);
        let snapshot = builder.build();

        let findings = run_page(&FocusVisible::rule(), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element.node(), Some(plain));
        assert_eq!(findings[0].severity, Severity::High);
    }
}
