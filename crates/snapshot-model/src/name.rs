//! Accessible-name resolution shared by every name-dependent rule.
//!
//! Sources are tried in a fixed order and the first one present wins:
//! `aria-labelledby` → `aria-label` → native label → `title` → `img[alt]` → content.
//! `alt=""` is a present, empty name (decorative image); an unresolvable `aria-labelledby`
//! reference is skipped rather than treated as an error.

use serde::Serialize;

use crate::model::{NodeId, Snapshot};
use crate::view::ElementView;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameSource {
    AriaLabelledby,
    AriaLabel,
    NativeLabel,
    Title,
    Alt,
    InputValue,
    Content,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum AccessibleName {
    Present { text: String, source: NameSource },
    Absent,
}

impl AccessibleName {
    pub fn present(text: impl Into<String>, source: NameSource) -> Self {
        AccessibleName::Present {
            text: text.into(),
            source,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, AccessibleName::Absent)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            AccessibleName::Present { text, .. } => Some(text.as_str()),
            AccessibleName::Absent => None,
        }
    }

    pub fn source(&self) -> Option<NameSource> {
        match self {
            AccessibleName::Present { source, .. } => Some(*source),
            AccessibleName::Absent => None,
        }
    }

    /// Present and non-blank.
    pub fn is_meaningful(&self) -> bool {
        self.text().map_or(false, |text| !text.trim().is_empty())
    }
}

impl Snapshot {
    pub fn resolve_accessible_name(&self, id: NodeId) -> AccessibleName {
        match self.get(id) {
            Some(node) => resolve(&ElementView::new(self, node)),
            None => AccessibleName::Absent,
        }
    }
}

impl<'a> ElementView<'a> {
    pub fn accessible_name(&self) -> AccessibleName {
        resolve(self)
    }
}

fn resolve(view: &ElementView<'_>) -> AccessibleName {
    if let Some(text) = from_labelledby(view) {
        return AccessibleName::present(text, NameSource::AriaLabelledby);
    }
    if let Some(label) = non_blank(view.attr("aria-label")) {
        return AccessibleName::present(label, NameSource::AriaLabel);
    }
    if let Some(text) = from_native_label(view) {
        return AccessibleName::present(text, NameSource::NativeLabel);
    }
    if let Some(title) = non_blank(view.attr("title")) {
        return AccessibleName::present(title, NameSource::Title);
    }
    if view.is_tag("img") || view.input_type().as_deref() == Some("image") {
        if let Some(alt) = view.attr("alt") {
            return AccessibleName::present(alt.trim(), NameSource::Alt);
        }
    }
    if matches!(
        view.input_type().as_deref(),
        Some("submit") | Some("button") | Some("reset")
    ) {
        if let Some(value) = non_blank(view.attr("value")) {
            return AccessibleName::present(value, NameSource::InputValue);
        }
    }
    if names_from_content(view) {
        if let Some(text) = content_name(view) {
            return AccessibleName::present(text, NameSource::Content);
        }
    }
    AccessibleName::Absent
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn from_labelledby(view: &ElementView<'_>) -> Option<String> {
    let ids = view.attr("aria-labelledby")?;
    let snapshot = view.snapshot();
    let parts: Vec<String> = ids
        .split_whitespace()
        .filter_map(|id| snapshot.find_by_id(id))
        .map(|node| ElementView::new(snapshot, node))
        .filter_map(|referenced| {
            non_blank(referenced.attr("aria-label"))
                .or_else(|| non_blank(Some(referenced.text())))
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn from_native_label(view: &ElementView<'_>) -> Option<String> {
    if !view.is_form_control() && !view.is_tag("button") && !view.is_tag("meter") {
        return None;
    }
    let snapshot = view.snapshot();
    if let Some(id) = view.attr("id").filter(|id| !id.trim().is_empty()) {
        let from_for: Vec<&str> = snapshot
            .elements
            .iter()
            .filter(|node| node.is_tag("label") && node.attr("for") == Some(id))
            .map(|node| node.text_content.trim())
            .filter(|text| !text.is_empty())
            .collect();
        if !from_for.is_empty() {
            return Some(from_for.join(" "));
        }
    }
    view.ancestors()
        .find(|ancestor| ancestor.is_tag("label"))
        .and_then(|label| non_blank(Some(label.text())))
}

fn names_from_content(view: &ElementView<'_>) -> bool {
    if view.is_button_like() || view.is_link() {
        return true;
    }
    matches!(
        view.explicit_role().as_deref(),
        Some("tab") | Some("menuitem") | Some("option") | Some("treeitem") | Some("switch")
    )
}

/// Visible text, else names of embedded images and labelled icons.
fn content_name(view: &ElementView<'_>) -> Option<String> {
    if let Some(text) = non_blank(Some(view.text())) {
        return Some(text);
    }
    let parts: Vec<String> = view
        .descendants()
        .filter(|child| !child.is_hidden())
        .filter_map(|child| {
            if child.is_tag("img") {
                non_blank(child.attr("alt"))
            } else {
                non_blank(child.attr("aria-label"))
            }
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SnapshotBuilder;

    #[test]
    fn labelledby_wins_over_aria_label() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let heading = builder.child(root, "h2");
        builder.attr(heading, "id", "cart-title").text(heading, "Your cart");
        let region = builder.child(root, "button");
        builder
            .attr(region, "aria-labelledby", "cart-title")
            .attr(region, "aria-label", "ignored");
        let snapshot = builder.build();

        assert_eq!(
            snapshot.resolve_accessible_name(region),
            AccessibleName::present("Your cart", NameSource::AriaLabelledby)
        );
    }

    #[test]
    fn missing_labelledby_target_falls_through() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let button = builder.child(root, "button");
        builder
            .attr(button, "aria-labelledby", "does-not-exist")
            .attr(button, "aria-label", "Add pizza");
        let snapshot = builder.build();
        assert_eq!(
            snapshot.resolve_accessible_name(button),
            AccessibleName::present("Add pizza", NameSource::AriaLabel)
        );
    }

    #[test]
    fn empty_alt_is_present_not_absent() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let decorative = builder.child(root, "img");
        builder.attr(decorative, "alt", "");
        let unmarked = builder.child(root, "img");
        builder.attr(unmarked, "src", "logo.png");
        let snapshot = builder.build();

        let name = snapshot.resolve_accessible_name(decorative);
        assert_eq!(name, AccessibleName::present("", NameSource::Alt));
        assert!(!name.is_absent());
        assert!(snapshot.resolve_accessible_name(unmarked).is_absent());
    }

    #[test]
    fn label_for_and_wrapping_label() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let label = builder.child(root, "label");
        builder.attr(label, "for", "email").text(label, "Email");
        let email = builder.child(root, "input");
        builder.attr(email, "id", "email").attr(email, "type", "email");
        let wrapper = builder.child(root, "label");
        builder.text(wrapper, "Phone");
        let phone = builder.child(wrapper, "input");
        builder.attr(phone, "type", "tel");
        let snapshot = builder.build();

        assert_eq!(
            snapshot.resolve_accessible_name(email),
            AccessibleName::present("Email", NameSource::NativeLabel)
        );
        assert_eq!(
            snapshot.resolve_accessible_name(phone).text(),
            Some("Phone")
        );
    }

    #[test]
    fn icon_link_uses_image_alt() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let link = builder.child(root, "a");
        builder.attr(link, "href", "/cart");
        let icon = builder.child(link, "img");
        builder.attr(icon, "alt", "Cart");
        let snapshot = builder.build();
        assert_eq!(
            snapshot.resolve_accessible_name(link),
            AccessibleName::present("Cart", NameSource::Content)
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let button = builder.child(root, "button");
        builder.attr(button, "onclick", "order()");
        let snapshot = builder.build();
        let first = snapshot.resolve_accessible_name(button);
        let second = snapshot.resolve_accessible_name(button);
        assert_eq!(first, second);
        assert!(first.is_absent());
    }

    #[test]
    fn out_of_range_node_is_absent() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        builder.root("html");
        let snapshot = builder.build();
        assert!(snapshot.resolve_accessible_name(NodeId(42)).is_absent());
    }
}
