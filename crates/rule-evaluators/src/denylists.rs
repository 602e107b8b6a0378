//! Named, enumerable string lists used by the heuristic rules.
//!
//! Rules only ever read these through the lookup helpers at the bottom, so a list can grow
//! without touching rule logic.

/// Link text that says nothing about the destination. Compared after [`normalize_phrase`].
pub const GENERIC_LINK_TEXT: &[&str] = &["click here", "read more", "here", "more", "learn more", "link"];

/// Substrings that make alt text redundant with the image role itself.
pub const REDUNDANT_ALT_WORDS: &[&str] = &["image", "picture"];

/// WAI-ARIA 1.2 roles, abstract roles excluded.
pub const VALID_ROLES: &[&str] = &[
    "alert",
    "alertdialog",
    "application",
    "article",
    "banner",
    "blockquote",
    "button",
    "caption",
    "cell",
    "checkbox",
    "code",
    "columnheader",
    "combobox",
    "complementary",
    "contentinfo",
    "definition",
    "deletion",
    "dialog",
    "directory",
    "document",
    "emphasis",
    "feed",
    "figure",
    "form",
    "generic",
    "grid",
    "gridcell",
    "group",
    "heading",
    "img",
    "insertion",
    "link",
    "list",
    "listbox",
    "listitem",
    "log",
    "main",
    "marquee",
    "math",
    "menu",
    "menubar",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "meter",
    "navigation",
    "none",
    "note",
    "option",
    "paragraph",
    "presentation",
    "progressbar",
    "radio",
    "radiogroup",
    "region",
    "row",
    "rowgroup",
    "rowheader",
    "scrollbar",
    "search",
    "searchbox",
    "separator",
    "slider",
    "spinbutton",
    "status",
    "strong",
    "subscript",
    "superscript",
    "switch",
    "tab",
    "table",
    "tablist",
    "tabpanel",
    "term",
    "textbox",
    "time",
    "timer",
    "toolbar",
    "tooltip",
    "tree",
    "treegrid",
    "treeitem",
];

/// WAI-ARIA 1.2 states and properties.
pub const VALID_ARIA_ATTRIBUTES: &[&str] = &[
    "aria-activedescendant",
    "aria-atomic",
    "aria-autocomplete",
    "aria-braillelabel",
    "aria-brailleroledescription",
    "aria-busy",
    "aria-checked",
    "aria-colcount",
    "aria-colindex",
    "aria-colindextext",
    "aria-colspan",
    "aria-controls",
    "aria-current",
    "aria-describedby",
    "aria-description",
    "aria-details",
    "aria-disabled",
    "aria-dropeffect",
    "aria-errormessage",
    "aria-expanded",
    "aria-flowto",
    "aria-grabbed",
    "aria-haspopup",
    "aria-hidden",
    "aria-invalid",
    "aria-keyshortcuts",
    "aria-label",
    "aria-labelledby",
    "aria-level",
    "aria-live",
    "aria-modal",
    "aria-multiline",
    "aria-multiselectable",
    "aria-orientation",
    "aria-owns",
    "aria-placeholder",
    "aria-posinset",
    "aria-pressed",
    "aria-readonly",
    "aria-relevant",
    "aria-required",
    "aria-roledescription",
    "aria-rowcount",
    "aria-rowindex",
    "aria-rowindextext",
    "aria-rowspan",
    "aria-selected",
    "aria-setsize",
    "aria-sort",
    "aria-valuemax",
    "aria-valuemin",
    "aria-valuenow",
    "aria-valuetext",
];

/// State attributes that accept `"mixed"` in addition to `"true"`/`"false"`.
pub const TRISTATE_ATTRIBUTES: &[&str] = &["aria-checked", "aria-pressed"];

/// State attributes restricted to `"true"`/`"false"`.
pub const BOOLEAN_STATE_ATTRIBUTES: &[&str] = &["aria-expanded", "aria-selected"];

pub const ARIA_LIVE_VALUES: &[&str] = &["off", "polite", "assertive"];

/// Roles that announce content changes without an explicit `aria-live`.
pub const LIVE_REGION_ROLES: &[&str] = &["alert", "status", "log", "marquee", "timer"];

/// Id/class/test-id fragments that mark a container as carrying status messages.
pub const STATUS_MESSAGE_HINTS: &[&str] = &[
    "status",
    "alert",
    "toast",
    "notification",
    "snackbar",
    "cart-count",
    "error-message",
];

/// Parents whose children read as running text, used by the inline-link target exemption.
pub const TEXT_FLOW_CONTAINERS: &[&str] = &[
    "p", "li", "span", "td", "th", "dd", "dt", "label", "blockquote", "figcaption", "em", "strong",
    "small", "caption",
];

/// Lowercases, collapses whitespace and strips trailing punctuation.
pub fn normalize_phrase(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c == '…')
        .trim()
        .to_lowercase()
}

pub fn is_generic_link_text(text: &str) -> bool {
    let phrase = normalize_phrase(text);
    GENERIC_LINK_TEXT.iter().any(|generic| *generic == phrase)
}

/// The first redundant word found in `alt`, case-insensitively.
pub fn redundant_alt_word(alt: &str) -> Option<&'static str> {
    let lowered = alt.to_lowercase();
    REDUNDANT_ALT_WORDS
        .iter()
        .copied()
        .find(|word| lowered.contains(word))
}

pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

pub fn is_valid_aria_attribute(name: &str) -> bool {
    VALID_ARIA_ATTRIBUTES.contains(&name)
}

/// Allowed values for a constrained state attribute, `None` when the attribute is unconstrained.
pub fn allowed_state_values(name: &str) -> Option<&'static [&'static str]> {
    if TRISTATE_ATTRIBUTES.contains(&name) {
        Some(&["true", "false", "mixed"])
    } else if BOOLEAN_STATE_ATTRIBUTES.contains(&name) {
        Some(&["true", "false"])
    } else {
        None
    }
}

pub fn status_hint_in(value: &str) -> Option<&'static str> {
    let lowered = value.to_ascii_lowercase();
    STATUS_MESSAGE_HINTS
        .iter()
        .copied()
        .find(|hint| lowered.contains(hint))
}

pub fn is_text_flow_container(tag: &str) -> bool {
    TEXT_FLOW_CONTAINERS.contains(&tag)
}
