//! Landmark presence (2.4.1) and navigation/main source order (1.3.2).

use a11y_core_types::{Severity, WcagLevel};
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::{ElementView, Snapshot};

pub(crate) fn is_navigation(view: &ElementView<'_>) -> bool {
    view.role().as_deref() == Some("navigation")
}

pub(crate) fn is_main(view: &ElementView<'_>) -> bool {
    view.role().as_deref() == Some("main")
}

pub(crate) fn first_landmark<'a>(
    snapshot: &'a Snapshot,
    predicate: fn(&ElementView<'_>) -> bool,
) -> Option<ElementView<'a>> {
    snapshot
        .views()
        .find(|view| predicate(view) && !view.is_hidden())
}

pub struct Landmarks;

impl Landmarks {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.4.1", "landmarks", WcagLevel::A, Severity::Medium)
                .title("Pages must expose navigation and main landmarks")
                .remediation("Wrap site navigation in <nav> and the primary content in <main>."),
            Landmarks,
        )
    }
}

impl PageCheck for Landmarks {
    fn applies(&self, snapshot: &Snapshot) -> bool {
        !snapshot.is_empty()
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        if first_landmark(snapshot, is_navigation).is_none() {
            findings.page(snapshot, "page has no navigation landmark (<nav> or role=navigation)");
        }
        if first_landmark(snapshot, is_main).is_none() {
            findings.page(snapshot, "page has no main landmark (<main> or role=main)");
        }
    }
}

/// The first navigation landmark must precede the first main landmark in document order.
pub struct NavBeforeMain;

impl NavBeforeMain {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.3.2", "nav-before-main", WcagLevel::A, Severity::Low)
                .title("Navigation should come before main content in reading order")
                .remediation("Move the navigation landmark ahead of <main> in the DOM; reposition it visually with CSS if needed."),
            NavBeforeMain,
        )
    }
}

impl PageCheck for NavBeforeMain {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let (Some(nav), Some(main)) = (
            first_landmark(snapshot, is_navigation),
            first_landmark(snapshot, is_main),
        ) else {
            return;
        };
        if nav.id() > main.id() {
            findings.element(
                &nav,
                format!(
                    "navigation (element {}) appears after main content (element {})",
                    nav.id().index(),
                    main.id().index()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run_page;
    use a11y_snapshot_model::SnapshotBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn reports_each_missing_landmark() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        builder.child(root, "div");
        let snapshot = builder.build();
        let findings = run_page(&Landmarks::rule(), &snapshot);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].message.contains("navigation"));
        assert!(findings[1].message.contains("main"));
    }

    #[test]
    fn role_based_landmarks_count() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let nav = builder.child(root, "div");
        builder.attr(nav, "role", "navigation");
        let main = builder.child(root, "div");
        builder.attr(main, "role", "main");
        let snapshot = builder.build();
        assert!(run_page(&Landmarks::rule(), &snapshot).is_empty());
        assert!(run_page(&NavBeforeMain::rule(), &snapshot).is_empty());
    }

    #[test]
    fn hidden_landmarks_do_not_count() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let nav = builder.child(root, "nav");
        builder.attr(nav, "hidden", "");
        builder.child(root, "main");
        let snapshot = builder.build();
        let findings = run_page(&Landmarks::rule(), &snapshot);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn navigation_after_main_is_flagged() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        builder.child(root, "main");
        let nav = builder.child(root, "nav");
        let snapshot = builder.build();
        let findings = run_page(&NavBeforeMain::rule(), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element.node(), Some(nav));
    }
}
