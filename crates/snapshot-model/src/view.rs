use crate::model::{BoundingBox, ComputedStyle, ElementNode, NodeId, Snapshot};

/// Tags that are interactive without any ARIA or tabindex help.
const NATIVE_INTERACTIVE_TAGS: &[&str] = &[
    "a", "button", "input", "select", "textarea", "summary", "area", "iframe",
];

/// Widget roles that make an element an interaction target.
pub const INTERACTIVE_ROLES: &[&str] = &[
    "button",
    "checkbox",
    "combobox",
    "link",
    "listbox",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "option",
    "radio",
    "scrollbar",
    "searchbox",
    "slider",
    "spinbutton",
    "switch",
    "tab",
    "textbox",
    "treeitem",
];

/// Borrowed, read-only view of one element in its snapshot.
#[derive(Clone, Copy, Debug)]
pub struct ElementView<'a> {
    snapshot: &'a Snapshot,
    node: &'a ElementNode,
}

impl<'a> ElementView<'a> {
    pub fn new(snapshot: &'a Snapshot, node: &'a ElementNode) -> Self {
        Self { snapshot, node }
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    pub fn node(&self) -> &'a ElementNode {
        self.node
    }

    pub fn id(&self) -> NodeId {
        self.node.id
    }

    pub fn tag(&self) -> &'a str {
        &self.node.tag
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.node.is_tag(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.node.has_attr(name)
    }

    pub fn text(&self) -> &'a str {
        self.node.text_content.trim()
    }

    pub fn style(&self) -> &'a ComputedStyle {
        &self.node.computed_style
    }

    pub fn bounding_box(&self) -> Option<&'a BoundingBox> {
        self.node.bounding_box.as_ref()
    }

    pub fn tabindex(&self) -> Option<i32> {
        self.node.tabindex()
    }

    pub fn parent(&self) -> Option<ElementView<'a>> {
        let parent = self.node.parent?;
        self.snapshot
            .get(parent)
            .map(|node| ElementView::new(self.snapshot, node))
    }

    pub fn children(&self) -> impl Iterator<Item = ElementView<'a>> + 'a {
        let snapshot = self.snapshot;
        self.node
            .children
            .iter()
            .filter_map(move |child| snapshot.get(*child))
            .map(move |node| ElementView::new(snapshot, node))
    }

    /// Parent first, root last.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            snapshot: self.snapshot,
            next: self.node.parent,
            remaining: self.snapshot.len(),
        }
    }

    /// Pre-order walk of the subtree below this element.
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.node.children.clone();
        stack.reverse();
        Descendants {
            snapshot: self.snapshot,
            stack,
            remaining: self.snapshot.len(),
        }
    }

    pub fn closest(&self, predicate: impl Fn(&ElementView<'a>) -> bool) -> Option<ElementView<'a>> {
        if predicate(self) {
            return Some(*self);
        }
        self.ancestors().find(|ancestor| predicate(ancestor))
    }

    /// Hidden from both rendering and the accessibility tree, on this element or an ancestor.
    pub fn is_hidden(&self) -> bool {
        if self.style().is_visibility_hidden() {
            return true;
        }
        std::iter::once(*self)
            .chain(self.ancestors())
            .any(|view| view.hides_subtree())
    }

    fn hides_subtree(&self) -> bool {
        self.has_attr("hidden")
            || self
                .attr("aria-hidden")
                .map_or(false, |value| value.trim().eq_ignore_ascii_case("true"))
            || self.style().is_display_none()
    }

    pub fn is_rendered(&self) -> bool {
        !self.is_hidden()
            && self
                .bounding_box()
                .map_or(false, |bbox| bbox.width > 0.0 && bbox.height > 0.0)
    }

    pub fn is_disabled(&self) -> bool {
        self.has_attr("disabled")
            || self
                .attr("aria-disabled")
                .map_or(false, |value| value.trim().eq_ignore_ascii_case("true"))
    }

    pub fn input_type(&self) -> Option<String> {
        if !self.is_tag("input") {
            return None;
        }
        Some(
            self.attr("type")
                .map(|value| value.trim().to_ascii_lowercase())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| "text".to_string()),
        )
    }

    pub fn explicit_role(&self) -> Option<String> {
        self.attr("role")
            .and_then(|role| role.split_whitespace().next())
            .map(|role| role.to_ascii_lowercase())
    }

    /// Explicit role when present, otherwise the implicit role of the tag.
    pub fn role(&self) -> Option<String> {
        self.explicit_role()
            .or_else(|| self.implicit_role().map(str::to_string))
    }

    pub fn implicit_role(&self) -> Option<&'static str> {
        let tag = self.tag().to_ascii_lowercase();
        let role = match tag.as_str() {
            "a" | "area" if self.has_attr("href") => "link",
            "button" | "summary" => "button",
            "nav" => "navigation",
            "main" => "main",
            "header" => "banner",
            "footer" => "contentinfo",
            "aside" => "complementary",
            "form" => "form",
            "dialog" => "dialog",
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
            "ul" | "ol" => "list",
            "li" => "listitem",
            "table" => "table",
            "textarea" => "textbox",
            "progress" => "progressbar",
            "select" => {
                if self.has_attr("multiple") {
                    "listbox"
                } else {
                    "combobox"
                }
            }
            "img" => {
                if self.attr("alt") == Some("") {
                    "presentation"
                } else {
                    "img"
                }
            }
            "input" => match self.input_type().as_deref() {
                Some("checkbox") => "checkbox",
                Some("radio") => "radio",
                Some("range") => "slider",
                Some("number") => "spinbutton",
                Some("search") => "searchbox",
                Some("submit") | Some("button") | Some("reset") | Some("image") => "button",
                Some("hidden") => return None,
                _ => "textbox",
            },
            _ => return None,
        };
        Some(role)
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// Level from `h1`..`h6`, or from `role=heading` with `aria-level` (default 2).
    pub fn heading_level(&self) -> Option<u8> {
        let tag = self.tag().to_ascii_lowercase();
        if let Some(level) = tag
            .strip_prefix('h')
            .and_then(|digits| digits.parse::<u8>().ok())
            .filter(|level| (1..=6).contains(level))
        {
            return Some(level);
        }
        if self.explicit_role().as_deref() == Some("heading") {
            let level = self
                .attr("aria-level")
                .and_then(|value| value.trim().parse::<u8>().ok())
                .filter(|level| *level >= 1)
                .unwrap_or(2);
            return Some(level);
        }
        None
    }

    pub fn is_natively_interactive(&self) -> bool {
        let tag = self.tag().to_ascii_lowercase();
        if !NATIVE_INTERACTIVE_TAGS.contains(&tag.as_str()) {
            return false;
        }
        match tag.as_str() {
            "a" | "area" => self.has_attr("href"),
            "input" => self.input_type().as_deref() != Some("hidden"),
            _ => true,
        }
    }

    pub fn has_interactive_role(&self) -> bool {
        self.explicit_role()
            .map_or(false, |role| INTERACTIVE_ROLES.contains(&role.as_str()))
    }

    pub fn is_interactive(&self) -> bool {
        self.is_natively_interactive() || self.has_interactive_role()
    }

    pub fn is_form_control(&self) -> bool {
        match self.tag().to_ascii_lowercase().as_str() {
            "select" | "textarea" => true,
            "input" => !matches!(
                self.input_type().as_deref(),
                Some("hidden") | Some("submit") | Some("button") | Some("reset") | Some("image")
            ),
            _ => false,
        }
    }

    pub fn is_button_like(&self) -> bool {
        self.is_tag("button")
            || self.explicit_role().as_deref() == Some("button")
            || matches!(
                self.input_type().as_deref(),
                Some("submit") | Some("button") | Some("reset")
            )
    }

    pub fn is_link(&self) -> bool {
        (self.is_tag("a") && self.has_attr("href"))
            || self.explicit_role().as_deref() == Some("link")
    }

    pub fn selector(&self) -> String {
        self.snapshot.selector_for(self.node.id)
    }
}

pub struct Ancestors<'a> {
    snapshot: &'a Snapshot,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = ElementView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // bounded so a malformed parent cycle cannot loop forever
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.snapshot.get(self.next?)?;
        self.next = node.parent;
        Some(ElementView::new(self.snapshot, node))
    }
}

pub struct Descendants<'a> {
    snapshot: &'a Snapshot,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = ElementView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            if let Some(node) = self.snapshot.get(id) {
                self.stack.extend(node.children.iter().rev().copied());
                return Some(ElementView::new(self.snapshot, node));
            }
        }
        None
    }
}

impl Snapshot {
    /// Panics when `id` is past the element sequence.
    pub fn view(&self, id: NodeId) -> ElementView<'_> {
        ElementView::new(self, self.node(id))
    }

    pub fn views(&self) -> impl Iterator<Item = ElementView<'_>> + Clone + '_ {
        self.elements.iter().map(move |node| ElementView::new(self, node))
    }

    /// Lazily filters elements in document order; clone the iterator to restart it.
    pub fn elements_matching<'a, P>(
        &'a self,
        predicate: P,
    ) -> impl Iterator<Item = ElementView<'a>> + Clone + 'a
    where
        P: Fn(&ElementView<'a>) -> bool + Clone + 'a,
    {
        self.views().filter(move |view| predicate(view))
    }

    pub fn id_is_unique(&self, id_attr: &str) -> bool {
        self.elements
            .iter()
            .filter(|node| node.attr("id") == Some(id_attr))
            .take(2)
            .count()
            == 1
    }

    /// CSS selector string that resolves back to the element.
    pub fn selector_for(&self, id: NodeId) -> String {
        let Some(start) = self.get(id) else {
            return String::new();
        };
        let mut segments = Vec::new();
        let mut current = Some(start);
        let mut guard = self.len();
        while let Some(node) = current {
            let tag = node.tag.to_ascii_lowercase();
            if let Some(id_attr) = node.attr("id").filter(|value| is_plain_ident(value)) {
                if self.id_is_unique(id_attr) {
                    segments.push(format!("{tag}#{id_attr}"));
                    break;
                }
            }
            let segment = match node.parent.and_then(|parent| self.get(parent)) {
                Some(parent) => {
                    let position = parent
                        .children
                        .iter()
                        .filter_map(|child| self.get(*child))
                        .filter(|sibling| sibling.tag.eq_ignore_ascii_case(&node.tag))
                        .position(|sibling| sibling.id == node.id)
                        .map(|pos| pos + 1)
                        .unwrap_or(1);
                    format!("{tag}:nth-of-type({position})")
                }
                None => tag,
            };
            segments.push(segment);
            guard = guard.saturating_sub(1);
            if guard == 0 {
                break;
            }
            current = node.parent.and_then(|parent| self.get(parent));
        }
        segments.reverse();
        segments.join(" > ")
    }
}

fn is_plain_ident(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
