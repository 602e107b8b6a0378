//! Accessible-name rules. Every check here goes through
//! [`ElementView::accessible_name`] so the precedence chain is shared.

use a11y_core_types::{Severity, WcagLevel};
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::{AccessibleName, ElementView, NameSource, Snapshot};

use crate::denylists::{is_generic_link_text, redundant_alt_word};

fn is_image(view: &ElementView<'_>) -> bool {
    view.is_tag("img")
        || view.input_type().as_deref() == Some("image")
        || view.explicit_role().as_deref() == Some("img")
}

fn is_presentational(view: &ElementView<'_>) -> bool {
    matches!(view.explicit_role().as_deref(), Some("presentation") | Some("none"))
}

/// Images without any name source (1.1.1).
pub struct ImageAlt;

impl ImageAlt {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.1.1", "image-alt", WcagLevel::A, Severity::High)
                .title("Images must have a text alternative")
                .remediation(
                    "Add an alt attribute describing the image, or alt=\"\" if it is decorative.",
                ),
            ImageAlt,
        )
    }
}

impl PageCheck for ImageAlt {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| is_image(view)) {
            if view.is_hidden() || is_presentational(&view) {
                continue;
            }
            if view.accessible_name().is_absent() {
                let src = view.attr("src").unwrap_or("");
                findings.element(
                    &view,
                    format!("<{}> has no text alternative (src=\"{src}\")", view.tag()),
                );
            }
        }
    }
}

/// Alt text that repeats the role ("image of ...").
pub struct RedundantAlt;

impl RedundantAlt {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.1.1", "redundant-alt", WcagLevel::A, Severity::Low)
                .title("Alt text should not announce that it is an image")
                .remediation("Describe the content of the image without words like \"image\" or \"picture\"."),
            RedundantAlt,
        )
    }
}

impl PageCheck for RedundantAlt {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| view.is_tag("img")) {
            if view.is_hidden() {
                continue;
            }
            let Some(alt) = view.attr("alt") else {
                continue;
            };
            if let Some(word) = redundant_alt_word(alt) {
                findings.element(
                    &view,
                    format!("alt text \"{}\" contains the redundant word \"{word}\"", alt.trim()),
                );
            }
        }
    }
}

pub struct ButtonName;

impl ButtonName {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("4.1.2", "button-name", WcagLevel::A, Severity::High)
                .title("Buttons must have an accessible name")
                .remediation("Give the button visible text, an aria-label, or an aria-labelledby reference."),
            ButtonName,
        )
    }
}

impl PageCheck for ButtonName {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| view.is_button_like()) {
            if view.is_hidden() {
                continue;
            }
            if !view.accessible_name().is_meaningful() {
                findings.element(&view, format!("{} has no accessible name", describe(&view)));
            }
        }
    }
}

pub struct LinkName;

impl LinkName {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.4.4", "link-name", WcagLevel::A, Severity::High)
                .title("Links must have an accessible name")
                .remediation("Put descriptive text inside the link, or label icon links with aria-label."),
            LinkName,
        )
    }
}

impl PageCheck for LinkName {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| view.is_link()) {
            if view.is_hidden() {
                continue;
            }
            if !view.accessible_name().is_meaningful() {
                let href = view.attr("href").unwrap_or("");
                findings.element(&view, format!("link to \"{href}\" has no accessible name"));
            }
        }
    }
}

pub struct GenericLinkText;

impl GenericLinkText {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("2.4.4", "generic-link-text", WcagLevel::A, Severity::Medium)
                .title("Link text must describe its purpose")
                .remediation("Replace phrases like \"click here\" with text naming the destination."),
            GenericLinkText,
        )
    }
}

impl PageCheck for GenericLinkText {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| view.is_link()) {
            if view.is_hidden() {
                continue;
            }
            if let AccessibleName::Present { text, .. } = view.accessible_name() {
                if is_generic_link_text(&text) {
                    findings.element(&view, format!("link text \"{}\" is not descriptive", text.trim()));
                }
            }
        }
    }
}

/// Form controls need a programmatic label; `placeholder` does not count.
pub struct FormLabel;

impl FormLabel {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("3.3.2", "form-label", WcagLevel::A, Severity::High)
                .title("Form controls must have labels")
                .remediation("Associate a <label for> with the control, wrap it in a label, or add aria-label."),
            FormLabel,
        )
    }
}

impl PageCheck for FormLabel {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| view.is_form_control()) {
            if view.is_hidden() {
                continue;
            }
            let name = view.accessible_name();
            if !name.is_meaningful() {
                let hint = match view.attr("placeholder") {
                    Some(placeholder) if !placeholder.trim().is_empty() => {
                        " (placeholder text is not a label)"
                    }
                    _ => "",
                };
                findings.element(&view, format!("{} has no label{hint}", describe(&view)));
            } else if name.source() == Some(NameSource::Title) {
                // title-only labels are announced but never shown to sighted users
                findings.element(
                    &view,
                    format!("{} is labelled only by its title attribute", describe(&view)),
                );
            }
        }
    }
}

fn describe(view: &ElementView<'_>) -> String {
    match view.input_type() {
        Some(kind) => format!("<input type=\"{kind}\">"),
        None => format!("<{}>", view.tag()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run_page;
    use a11y_snapshot_model::SnapshotBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn image_without_alt_is_flagged_but_decorative_is_not() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let logo = builder.child(root, "img");
        builder.attr(logo, "src", "logo.png");
        let spacer = builder.child(root, "img");
        builder.attr(spacer, "src", "spacer.gif").attr(spacer, "alt", "");
        let hidden = builder.child(root, "img");
        builder.attr(hidden, "src", "x.png").attr(hidden, "aria-hidden", "true");
        let snapshot = builder.build();

        let findings = run_page(&ImageAlt::rule(), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element.node(), Some(logo));
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(findings[0].criterion_id, "1.1.1");
    }

    #[test]
    fn redundant_alt_words_are_low_severity() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let img = builder.child(root, "img");
        builder.attr(img, "alt", "Picture of a pepperoni pizza");
        let fine = builder.child(root, "img");
        builder.attr(fine, "alt", "Pepperoni pizza");
        let snapshot = builder.build();

        let findings = run_page(&RedundantAlt::rule(), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);
        assert!(findings[0].message.contains("picture"));
    }

    #[test]
    fn onclick_button_without_text_has_no_name() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let bare = builder.child(root, "button");
        builder.attr(bare, "onclick", "addToCart()");
        let labelled = builder.child(root, "button");
        builder.attr(labelled, "aria-label", "Close");
        let icon = builder.child(root, "button");
        let svg = builder.child(icon, "img");
        builder.attr(svg, "alt", "Remove item");
        let snapshot = builder.build();

        let findings = run_page(&ButtonName::rule(), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element.node(), Some(bare));
        assert_eq!(findings[0].criterion_id, "4.1.2");
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn links_need_names_and_descriptive_text() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let empty = builder.child(root, "a");
        builder.attr(empty, "href", "/cart");
        let generic = builder.child(root, "a");
        builder.attr(generic, "href", "/menu").text(generic, "Click here");
        let labelled_generic = builder.child(root, "a");
        builder
            .attr(labelled_generic, "href", "/menu")
            .attr(labelled_generic, "aria-label", "Read more about the menu")
            .text(labelled_generic, "Read more");
        let good = builder.child(root, "a");
        builder.attr(good, "href", "/deals").text(good, "Today's deals");
        let snapshot = builder.build();

        let missing = run_page(&LinkName::rule(), &snapshot);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].element.node(), Some(empty));

        let generic_findings = run_page(&GenericLinkText::rule(), &snapshot);
        assert_eq!(generic_findings.len(), 1);
        assert_eq!(generic_findings[0].element.node(), Some(generic));
    }

    #[test]
    fn form_controls_need_real_labels() {
        let mut builder = SnapshotBuilder::new("https://shop.test/checkout");
        let root = builder.root("html");
        let label = builder.child(root, "label");
        builder.attr(label, "for", "email").text(label, "Email");
        let email = builder.child(root, "input");
        builder.attr(email, "id", "email").attr(email, "type", "email");
        let phone = builder.child(root, "input");
        builder.attr(phone, "placeholder", "Phone");
        let zip = builder.child(root, "input");
        builder.attr(zip, "title", "Postcode");
        let hidden = builder.child(root, "input");
        builder.attr(hidden, "type", "hidden");
        let submit = builder.child(root, "input");
        builder.attr(submit, "type", "submit");
        let snapshot = builder.build();

        let findings = run_page(&FormLabel::rule(), &snapshot);
        let nodes: Vec<_> = findings.iter().map(|f| f.element.node()).collect();
        assert_eq!(nodes, vec![Some(phone), Some(zip)]);
        assert!(findings[0].message.contains("placeholder"));
    }
}
