//! Text contrast (1.4.3) and non-text contrast for component borders and focus outlines (1.4.11).

use std::collections::HashSet;

use a11y_core_types::{Severity, WcagLevel};
use a11y_policy_center::ThresholdPolicy;
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::{ElementView, Snapshot};
use tracing::debug;

use crate::color::{contrast_ratio, meets, parse_color, Rgb, Rgba};

/// Nearest declared text colour, inherited from ancestors like CSS `color`.
pub(crate) fn foreground(view: &ElementView<'_>) -> Option<Rgba> {
    std::iter::once(*view)
        .chain(view.ancestors())
        .find_map(|candidate| candidate.style().color.as_deref().and_then(parse_color))
}

/// Opaque colour painted behind `view`, compositing translucent layers down to the first
/// opaque one (or the white canvas). `None` when a background image sits in the stack.
pub(crate) fn backdrop(view: &ElementView<'_>) -> Option<Rgb> {
    let mut layers: Vec<Rgba> = Vec::new();
    for candidate in std::iter::once(*view).chain(view.ancestors()) {
        let style = candidate.style();
        if style
            .background_image
            .as_deref()
            .map_or(false, |image| !matches!(image.trim(), "" | "none"))
        {
            return None;
        }
        if let Some(color) = style.background_color.as_deref().and_then(parse_color) {
            if color.is_transparent() {
                continue;
            }
            layers.push(color);
            if color.is_opaque() {
                break;
            }
        }
    }
    Some(
        layers
            .iter()
            .rev()
            .fold(Rgb::WHITE, |base, layer| layer.over(base)),
    )
}

/// Background surrounding the element, i.e. its parent's backdrop.
fn surround(view: &ElementView<'_>) -> Option<Rgb> {
    match view.parent() {
        Some(parent) => backdrop(&parent),
        None => Some(Rgb::WHITE),
    }
}

/// True when the element carries text of its own rather than only through its children.
pub(crate) fn has_own_text(view: &ElementView<'_>) -> bool {
    let visible = |text: &str| text.chars().filter(|c| !c.is_whitespace()).count();
    let own = visible(view.text());
    own > 0 && own > view.children().map(|child| visible(child.text())).sum::<usize>()
}

fn hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

pub struct TextContrast {
    normal: f64,
    large: f64,
    large_px: f64,
    large_bold_px: f64,
    bold_weight: u16,
}

impl TextContrast {
    pub fn rule(thresholds: &ThresholdPolicy) -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.4.3", "text-contrast", WcagLevel::AA, Severity::High)
                .title("Text must have sufficient contrast")
                .remediation("Darken the text or lighten the background until the ratio reaches 4.5:1 (3:1 for large text)."),
            TextContrast {
                normal: thresholds.contrast_normal,
                large: thresholds.contrast_large,
                large_px: thresholds.large_text_px,
                large_bold_px: thresholds.large_bold_text_px,
                bold_weight: thresholds.bold_weight,
            },
        )
    }

    fn is_large(&self, view: &ElementView<'_>) -> bool {
        let size = view.style().font_size_px.unwrap_or(16.0);
        let weight = view.style().font_weight.unwrap_or(400);
        size >= self.large_px || (size >= self.large_bold_px && weight >= self.bold_weight)
    }
}

impl PageCheck for TextContrast {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| has_own_text(view)) {
            if view.is_hidden() || view.is_disabled() {
                continue;
            }
            let Some(fg) = foreground(&view) else {
                continue;
            };
            let Some(bg) = backdrop(&view) else {
                debug!(selector = %view.selector(), "background image behind text, contrast skipped");
                continue;
            };
            let fg = fg.over(bg);
            let ratio = contrast_ratio(fg, bg);
            let (threshold, size_class) = if self.is_large(&view) {
                (self.large, "large")
            } else {
                (self.normal, "normal")
            };
            if !meets(ratio, threshold) {
                findings.element(
                    &view,
                    format!(
                        "contrast {ratio:.2}:1 ({} on {}) is below {threshold}:1 for {size_class} text",
                        hex(fg),
                        hex(bg)
                    ),
                );
            }
        }
    }
}

/// Borders that identify interactive components against their surroundings.
pub struct ComponentContrast {
    threshold: f64,
}

impl ComponentContrast {
    pub fn rule(thresholds: &ThresholdPolicy) -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.4.11", "component-contrast", WcagLevel::AA, Severity::Medium)
                .title("Component boundaries must have 3:1 contrast")
                .remediation("Use a border or fill colour with at least 3:1 contrast against the adjacent background."),
            ComponentContrast {
                threshold: thresholds.contrast_non_text,
            },
        )
    }
}

impl PageCheck for ComponentContrast {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        for view in snapshot.elements_matching(|view| view.is_interactive()) {
            if !view.is_rendered() || view.is_disabled() {
                continue;
            }
            let style = view.style();
            if style.border_width_px.map_or(true, |width| width <= 0.0) {
                continue;
            }
            let Some(border) = style.border_color.as_deref().and_then(parse_color) else {
                continue;
            };
            if border.is_transparent() {
                continue;
            }
            let (Some(outside), Some(fill)) = (surround(&view), backdrop(&view)) else {
                continue;
            };
            let border = border.over(outside);
            let border_ratio = contrast_ratio(border, outside);
            let fill_ratio = contrast_ratio(fill, outside);
            if !meets(border_ratio, self.threshold) && !meets(fill_ratio, self.threshold) {
                findings.element(
                    &view,
                    format!(
                        "component border {} has {border_ratio:.2}:1 contrast against {} (needs {}:1)",
                        hex(border),
                        hex(outside),
                        self.threshold
                    ),
                );
            }
        }
    }
}

/// Focus outlines recorded in the focus sequence against the background around the element.
pub struct FocusIndicatorContrast {
    threshold: f64,
}

impl FocusIndicatorContrast {
    pub fn rule(thresholds: &ThresholdPolicy) -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("1.4.11", "focus-indicator-contrast", WcagLevel::AA, Severity::Medium)
                .title("Focus indicators must have 3:1 contrast")
                .remediation("Pick an outline colour with at least 3:1 contrast against the surrounding background."),
            FocusIndicatorContrast {
                threshold: thresholds.contrast_non_text,
            },
        )
    }
}

impl PageCheck for FocusIndicatorContrast {
    fn applies(&self, snapshot: &Snapshot) -> bool {
        !snapshot.focus_sequence.is_empty()
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let mut seen = HashSet::new();
        for stop in &snapshot.focus_sequence {
            let (Some(target), Some(indicator)) = (stop.target, stop.indicator.as_ref()) else {
                continue;
            };
            if !seen.insert(target) || !indicator.has_outline() {
                continue;
            }
            let Some(node) = snapshot.get(target) else {
                continue;
            };
            let view = ElementView::new(snapshot, node);
            let Some(outline) = indicator.outline_color.as_deref().and_then(parse_color) else {
                continue;
            };
            let Some(outside) = surround(&view) else {
                continue;
            };
            let outline = outline.over(outside);
            let ratio = contrast_ratio(outline, outside);
            if !meets(ratio, self.threshold) {
                findings.element(
                    &view,
                    format!(
                        "focus outline {} has {ratio:.2}:1 contrast against {} (needs {}:1)",
                        hex(outline),
                        hex(outside),
                        self.threshold
                    ),
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

    fn text_page(color: &str, background: &str, size: Option<f64>, weight: Option<u16>) -> Snapshot {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        builder.style(root).background_color = Some(background.to_string());
        let paragraph = builder.child(root, "p");
        builder.text(paragraph, "Free delivery over $20");
        let style = builder.style(paragraph);
        style.color = Some(color.to_string());
        style.font_size_px = size;
        style.font_weight = weight;
        builder.build()
    }

    #[test]
    fn low_contrast_text_is_flagged() {
        let thresholds = default_policy().thresholds;
        let snapshot = text_page("#999999", "#ffffff", None, None);
        let findings = run_page(&TextContrast::rule(&thresholds), &snapshot);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("#999999 on #ffffff"), "{}", findings[0].message);
    }

    #[test]
    fn ratio_exactly_at_threshold_passes() {
        let fg = Rgb::new(0x59, 0x59, 0x59);
        let bg = Rgb::new(0xee, 0xee, 0xee);
        let mut thresholds = default_policy().thresholds;
        thresholds.contrast_normal = contrast_ratio(fg, bg);
        let snapshot = text_page("#595959", "#eeeeee", None, None);
        assert!(run_page(&TextContrast::rule(&thresholds), &snapshot).is_empty());

        thresholds.contrast_normal += 1e-9;
        assert_eq!(run_page(&TextContrast::rule(&thresholds), &snapshot).len(), 1);
    }

    #[test]
    fn default_threshold_is_inclusive_at_four_and_a_half() {
        let thresholds = default_policy().thresholds;
        assert_eq!(thresholds.contrast_normal, 4.5);
        assert!(meets(4.5, thresholds.contrast_normal));

        // closest 8-bit colours on white either side of 4.5:1
        let white = Rgb::new(0xff, 0xff, 0xff);
        let just_above = contrast_ratio(Rgb::new(0x7c, 0x72, 0x90), white);
        let just_below = contrast_ratio(Rgb::new(0x9a, 0x6c, 0x5a), white);
        assert!(just_above >= 4.5 && just_above - 4.5 < 1e-6, "{just_above}");
        assert!(just_below < 4.5 && 4.5 - just_below < 1e-6, "{just_below}");

        let rule = TextContrast::rule(&thresholds);
        assert!(run_page(&rule, &text_page("#7c7290", "#ffffff", None, None)).is_empty());
        assert_eq!(run_page(&rule, &text_page("#9a6c5a", "#ffffff", None, None)).len(), 1);
    }

    #[test]
    fn bold_text_is_large_from_fourteen_points() {
        let thresholds = default_policy().thresholds;
        assert_eq!(thresholds.large_bold_text_px, 14.0 * 96.0 / 72.0);
        let rule = TextContrast::rule(&thresholds);
        // #888 on white is about 3.5:1
        let fourteen_pt = text_page("#888888", "#ffffff", Some(14.0 * 96.0 / 72.0), Some(700));
        let rounded_down = text_page("#888888", "#ffffff", Some(18.66), Some(700));
        assert!(run_page(&rule, &fourteen_pt).is_empty());
        assert_eq!(run_page(&rule, &rounded_down).len(), 1);
    }

    #[test]
    fn large_and_bold_text_use_the_lower_threshold() {
        let thresholds = default_policy().thresholds;
        // #888 on white is about 3.5:1
        let normal = text_page("#888888", "#ffffff", Some(16.0), None);
        let large = text_page("#888888", "#ffffff", Some(24.0), None);
        let bold = text_page("#888888", "#ffffff", Some(18.67), Some(700));
        let small_bold = text_page("#888888", "#ffffff", Some(16.0), Some(700));
        let rule = TextContrast::rule(&thresholds);
        assert_eq!(run_page(&rule, &normal).len(), 1);
        assert!(run_page(&rule, &large).is_empty());
        assert!(run_page(&rule, &bold).is_empty());
        assert_eq!(run_page(&rule, &small_bold).len(), 1);
    }

    #[test]
    fn background_is_resolved_through_transparent_ancestors() {
        let thresholds = default_policy().thresholds;
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        builder.style(root).background_color = Some("#000000".into());
        let wrapper = builder.child(root, "div");
        builder.style(wrapper).background_color = Some("transparent".into());
        let span = builder.child(wrapper, "span");
        builder.text(span, "Order now");
        builder.style(span).color = Some("#333333".into());
        let snapshot = builder.build();

        let findings = run_page(&TextContrast::rule(&thresholds), &snapshot);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("on #000000"));
    }

    #[test]
    fn background_images_make_contrast_indeterminate() {
        let thresholds = default_policy().thresholds;
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let hero = builder.child(root, "div");
        builder.style(hero).background_image = Some("url(hero.jpg)".into());
        let title = builder.child(hero, "h1");
        builder.text(title, "Hot & fresh");
        builder.style(title).color = Some("#eeeeee".into());
        let snapshot = builder.build();
        assert!(run_page(&TextContrast::rule(&thresholds), &snapshot).is_empty());
    }

    #[test]
    fn only_elements_with_their_own_text_are_measured() {
        let thresholds = default_policy().thresholds;
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let outer = builder.child(root, "div");
        builder.style(outer).color = Some("#eeeeee".into());
        let inner = builder.child(outer, "p");
        builder.text(inner, "Contact us");
        builder.style(inner).color = Some("#000000".into());
        let snapshot = builder.build();
        assert!(run_page(&TextContrast::rule(&thresholds), &snapshot).is_empty());
    }

    #[test]
    fn faint_input_border_fails_non_text_contrast() {
        let thresholds = default_policy().thresholds;
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let faint = builder.child(root, "input");
        builder.bbox(faint, 0.0, 0.0, 200.0, 32.0);
        let style = builder.style(faint);
        style.border_width_px = Some(1.0);
        style.border_color = Some("#dddddd".into());
        let filled = builder.child(root, "button");
        builder.bbox(filled, 0.0, 40.0, 100.0, 32.0).text(filled, "Pay");
        let style = builder.style(filled);
        style.border_width_px = Some(1.0);
        style.border_color = Some("#dddddd".into());
        style.background_color = Some("#1d4ed8".into());
        let snapshot = builder.build();

        let findings = run_page(&ComponentContrast::rule(&thresholds), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].element.node(), Some(faint));
    }

    #[test]
    fn focus_outline_contrast_is_checked_once_per_element() {
        let thresholds = default_policy().thresholds;
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let link = builder.child(root, "a");
        builder.attr(link, "href", "/menu").text(link, "Menu");
        let pale = FocusIndicator {
            outline_style: Some("solid".into()),
            outline_width_px: Some(2.0),
            outline_color: Some("#f0f0f0".into()),
            box_shadow: None,
        };
        builder.focus_with(link, pale.clone()).focus_with(link, pale).focus_body();
        let snapshot = builder.build();

        let findings = run_page(&FocusIndicatorContrast::rule(&thresholds), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].criterion_id, "1.4.11");
    }
}
