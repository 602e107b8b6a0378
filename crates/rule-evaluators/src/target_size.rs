//! Pointer target size (2.5.8).
//!
//! A target smaller than the minimum passes when it is an inline text link, or when a circle of
//! the minimum diameter centred on it stays clear of every other target and of the circles of
//! the other undersized targets.

use a11y_core_types::{Severity, WcagLevel};
use a11y_policy_center::ThresholdPolicy;
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::{BoundingBox, ElementView, Snapshot};

use crate::denylists::is_text_flow_container;

pub struct TargetSize {
    min_px: f64,
}

struct Target<'a> {
    view: ElementView<'a>,
    bbox: BoundingBox,
    undersized: bool,
}

impl TargetSize {
    pub fn rule(thresholds: &ThresholdPolicy) -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.5.8", "target-size", WcagLevel::AA, Severity::Medium)
                .title("Pointer targets must be at least 24 by 24 CSS pixels")
                .remediation("Enlarge the target with padding or min-width/min-height, or space it away from neighbouring targets."),
            TargetSize {
                min_px: thresholds.target_min_px,
            },
        )
    }

    fn spaced_clear(&self, index: usize, targets: &[Target<'_>]) -> bool {
        let radius = self.min_px / 2.0;
        let (cx, cy) = targets[index].bbox.center();
        targets.iter().enumerate().all(|(other_index, other)| {
            if other_index == index {
                return true;
            }
            if other.bbox.distance_to_point(cx, cy) < radius {
                return false;
            }
            if other.undersized {
                let (ox, oy) = other.bbox.center();
                let centres = ((cx - ox).powi(2) + (cy - oy).powi(2)).sqrt();
                return centres >= radius * 2.0;
            }
            true
        })
    }
}

/// A link sitting in a sentence: its parent flows text and has more text than the link.
fn is_inline_link(view: &ElementView<'_>) -> bool {
    if !view.is_link() {
        return false;
    }
    let Some(parent) = view.parent() else {
        return false;
    };
    let visible = |text: &str| text.chars().filter(|c| !c.is_whitespace()).count();
    is_text_flow_container(&parent.tag().to_ascii_lowercase())
        && visible(parent.text()) > visible(view.text())
}

impl PageCheck for TargetSize {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let targets: Vec<Target<'_>> = snapshot
            .elements_matching(|view| view.is_interactive())
            .filter(|view| view.is_rendered() && !view.is_disabled())
            .filter_map(|view| {
                let bbox = *view.bounding_box()?;
                Some(Target {
                    view,
                    bbox,
                    undersized: bbox.width < self.min_px || bbox.height < self.min_px,
                })
            })
            .collect();

        for (index, target) in targets.iter().enumerate() {
            if !target.undersized || is_inline_link(&target.view) {
                continue;
            }
            if self.spaced_clear(index, &targets) {
                continue;
            }
            findings.element(
                &target.view,
                format!(
                    "target is {}x{}px, below the {}x{}px minimum, and too close to neighbouring targets",
                    target.bbox.width, target.bbox.height, self.min_px, self.min_px
                ),
            );
        }
    }
}
