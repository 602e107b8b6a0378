//! Horizontal overflow at the narrow reflow capture (1.4.10) and at the zoomed capture (1.4.4).
//!
//! Both rules read the same signals from a snapshot taken at the reduced viewport: the document
//! scrolling wider than the client area, and `overflow: hidden` boxes clipping content.

use a11y_core_types::{Severity, WcagLevel};
use a11y_policy_center::ThresholdPolicy;
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::Snapshot;

fn report_overflow(snapshot: &Snapshot, tolerance: f64, context: &str, findings: &mut Findings<'_>) {
    let overflow = snapshot.document_overflow();
    if overflow > tolerance {
        findings.page(
            snapshot,
            format!(
                "document scrolls horizontally at {context}: scroll width {} exceeds client width {} by {overflow}px",
                snapshot.document.scroll_width, snapshot.document.client_width
            ),
        );
    }
    for view in snapshot.elements_matching(|view| view.style().clips_overflow()) {
        let Some(scroll) = view.node().scroll else {
            continue;
        };
        if scroll.scroll_width > scroll.client_width && !view.is_hidden() {
            findings.element(
                &view,
                format!(
                    "content clipped at {context}: scroll width {} exceeds client width {} with overflow hidden",
                    scroll.scroll_width, scroll.client_width
                ),
            );
        }
    }
}

pub struct Reflow {
    width: f64,
    tolerance: f64,
}

impl Reflow {
    pub fn rule(thresholds: &ThresholdPolicy) -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.4.10", "reflow", WcagLevel::AA, Severity::Medium)
                .title("Content must reflow at 320 CSS pixels")
                .remediation("Use fluid widths and wrapping so no horizontal scrolling is needed at 320px."),
            Reflow {
                width: thresholds.reflow_width_px,
                tolerance: thresholds.overflow_tolerance_px,
            },
        )
    }
}

impl PageCheck for Reflow {
    /// Only narrow captures with content are measured.
    fn applies(&self, snapshot: &Snapshot) -> bool {
        !snapshot.is_empty() && snapshot.viewport.width <= self.width + 0.5
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let context = format!("{}px width", snapshot.viewport.width);
        report_overflow(snapshot, self.tolerance, &context, findings);
    }
}

pub struct ResizeText {
    zoom_factor: f64,
    tolerance: f64,
}

impl ResizeText {
    pub fn rule(thresholds: &ThresholdPolicy) -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.4.4", "resize-text", WcagLevel::AA, Severity::Medium)
                .title("Text must stay usable at 200% zoom")
                .remediation("Size containers in relative units so zoomed text wraps instead of overflowing."),
            ResizeText {
                zoom_factor: thresholds.zoom_factor,
                tolerance: thresholds.overflow_tolerance_px,
            },
        )
    }
}

impl PageCheck for ResizeText {
    fn applies(&self, snapshot: &Snapshot) -> bool {
        !snapshot.is_empty() && snapshot.viewport.is_zoomed(self.zoom_factor)
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let context = format!("{}% zoom", (snapshot.viewport.zoom * 100.0).round());
        report_overflow(snapshot, self.tolerance, &context, findings);
    }
}
