use a11y_core_types::{Severity, WcagLevel};
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::{ElementView, Snapshot};

fn visible_headings(snapshot: &Snapshot) -> impl Iterator<Item = (ElementView<'_>, u8)> + '_ {
    snapshot
        .elements_matching(|view| view.is_heading())
        .filter(|view| !view.is_hidden())
        .filter_map(|view| view.heading_level().map(|level| (view, level)))
}

/// Heading levels may go down by any amount but only up by one (1.3.1).
pub struct HeadingOrder;

impl HeadingOrder {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.3.1", "heading-order", WcagLevel::A, Severity::Medium)
                .title("Heading levels should only increase by one")
                .remediation("Use the next heading level down, or restyle the heading with CSS instead of changing its level."),
            HeadingOrder,
        )
    }
}

impl PageCheck for HeadingOrder {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let mut previous: Option<u8> = None;
        for (view, level) in visible_headings(snapshot) {
            if let Some(prev) = previous {
                if level > prev.saturating_add(1) {
                    findings.element(
                        &view,
                        format!("heading level skipped from h{prev} to h{level}"),
                    );
                }
            }
            previous = Some(level);
        }
    }
}

/// A page needs at least one heading, and one of them must be level 1.
pub struct HeadingPresence;

impl HeadingPresence {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.3.1", "heading-presence", WcagLevel::A, Severity::Medium)
                .title("Pages must have a top-level heading")
                .remediation("Mark the main page title up as an <h1>."),
            HeadingPresence,
        )
    }
}

impl PageCheck for HeadingPresence {
    fn applies(&self, snapshot: &Snapshot) -> bool {
        !snapshot.is_empty()
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let levels: Vec<u8> = visible_headings(snapshot).map(|(_, level)| level).collect();
        if levels.is_empty() {
            findings.page(snapshot, "page has no headings");
        } else if !levels.contains(&1) {
            findings.page(snapshot, format!("page has {} headings but no h1", levels.len()));
        }
    }
}

/// Headings with nothing to announce.
pub struct EmptyHeading;

impl EmptyHeading {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.3.1", "empty-heading", WcagLevel::A, Severity::Medium)
                .title("Headings must not be empty")
                .remediation("Give the heading text, or remove it if it is only used for spacing."),
            EmptyHeading,
        )
    }
}

impl PageCheck for EmptyHeading {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for (view, level) in visible_headings(snapshot) {
            if !view.text().is_empty() {
                continue;
            }
            let labelled = view.accessible_name().is_meaningful()
                || view.descendants().any(|child| {
                    child.is_tag("img") && child.attr("alt").map_or(false, |alt| !alt.trim().is_empty())
                });
            if !labelled {
                findings.element(&view, format!("h{level} heading is empty"));
            }
        }
    }
}
