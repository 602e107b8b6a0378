use std::collections::BTreeMap;

use a11y_core_types::SnapshotId;
use serde::{Deserialize, Serialize};

use crate::errors::SnapshotError;

/// Document-order index of an element inside its snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Distance from a point to the closest point of this box; zero when inside.
    pub fn distance_to_point(&self, px: f64, py: f64) -> f64 {
        let dx = (self.x - px).max(0.0).max(px - self.right());
        let dy = (self.y - py).max(0.0).max(py - self.bottom());
        (dx * dx + dy * dy).sqrt()
    }
}

/// The subset of computed CSS needed by contrast and geometry rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub background_image: Option<String>,
    pub font_size_px: Option<f64>,
    pub font_weight: Option<u16>,
    pub border_color: Option<String>,
    pub border_width_px: Option<f64>,
    pub outline_style: Option<String>,
    pub outline_width_px: Option<f64>,
    pub outline_color: Option<String>,
    pub box_shadow: Option<String>,
    pub display: Option<String>,
    pub visibility: Option<String>,
    pub overflow_x: Option<String>,
}

impl ComputedStyle {
    pub fn is_display_none(&self) -> bool {
        self.display.as_deref().map(str::trim) == Some("none")
    }

    pub fn is_visibility_hidden(&self) -> bool {
        matches!(
            self.visibility.as_deref().map(str::trim),
            Some("hidden") | Some("collapse")
        )
    }

    pub fn clips_overflow(&self) -> bool {
        matches!(
            self.overflow_x.as_deref().map(str::trim),
            Some("hidden") | Some("clip")
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_width: f64,
    pub client_width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub id: NodeId,
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text_content: String,
    #[serde(default)]
    pub computed_style: ComputedStyle,
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub scroll: Option<ScrollMetrics>,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeId>,
}

impl ElementNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Parsed `tabindex`, `None` when absent or not an integer.
    pub fn tabindex(&self) -> Option<i32> {
        self.attr("tabindex")
            .and_then(|value| value.trim().parse::<i32>().ok())
    }
}

/// Outline/box-shadow styles recorded while an element held focus.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusIndicator {
    pub outline_style: Option<String>,
    pub outline_width_px: Option<f64>,
    pub outline_color: Option<String>,
    pub box_shadow: Option<String>,
}

impl FocusIndicator {
    pub fn has_outline(&self) -> bool {
        let style_visible = !matches!(
            self.outline_style.as_deref().map(str::trim),
            None | Some("none") | Some("hidden")
        );
        let width_visible = self.outline_width_px.map_or(true, |width| width > 0.0);
        style_visible && width_visible
    }

    pub fn has_box_shadow(&self) -> bool {
        !matches!(
            self.box_shadow.as_deref().map(str::trim),
            None | Some("") | Some("none")
        )
    }

    pub fn is_visible(&self) -> bool {
        self.has_outline() || self.has_box_shadow()
    }
}

/// Element focused after one simulated Tab press. `target == None` means focus is on the body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusStop {
    pub target: Option<NodeId>,
    #[serde(default)]
    pub indicator: Option<FocusIndicator>,
}

impl FocusStop {
    pub fn body() -> Self {
        Self::default()
    }

    pub fn element(target: NodeId) -> Self {
        Self {
            target: Some(target),
            indicator: None,
        }
    }

    pub fn is_body(&self) -> bool {
        self.target.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

fn default_zoom() -> f64 {
    1.0
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            zoom: 1.0,
        }
    }

    /// Zoom simulated by shrinking the CSS width by `factor`.
    pub fn zoomed(&self, factor: f64) -> Self {
        let factor = if factor > 0.0 { factor } else { 1.0 };
        Self {
            width: (self.width / factor).floor(),
            height: self.height,
            zoom: self.zoom * factor,
        }
    }

    pub fn reflow(&self, width: f64) -> Self {
        Self {
            width,
            height: self.height,
            zoom: self.zoom,
        }
    }

    pub fn is_zoomed(&self, factor: f64) -> bool {
        self.zoom + f64::EPSILON >= factor && factor > 1.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetrics {
    pub scroll_width: f64,
    pub client_width: f64,
}

/// One page's accessibility-relevant state, immutable once captured.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub id: SnapshotId,
    pub url: String,
    pub elements: Vec<ElementNode>,
    #[serde(default)]
    pub focus_sequence: Vec<FocusStop>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub document: DocumentMetrics,
}

impl Snapshot {
    /// Panics when `id` is past the element sequence.
    pub fn node(&self, id: NodeId) -> &ElementNode {
        &self.elements[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&ElementNode> {
        self.elements.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The `html` element when present, else the first element.
    pub fn root(&self) -> Option<&ElementNode> {
        self.elements
            .iter()
            .find(|node| node.is_tag("html"))
            .or_else(|| self.elements.first())
    }

    pub fn find_by_id(&self, id_attr: &str) -> Option<&ElementNode> {
        self.elements
            .iter()
            .find(|node| node.attr("id") == Some(id_attr))
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot =
            serde_json::from_str(raw).map_err(|err| SnapshotError::Malformed(err.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|err| SnapshotError::Malformed(err.to_string()))
    }

    /// Checks tree links and document indices; attribute content is never validated here.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let len = self.elements.len();
        for (index, node) in self.elements.iter().enumerate() {
            if node.id.0 != index {
                return Err(SnapshotError::Malformed(format!(
                    "element at position {index} carries id {}",
                    node.id.0
                )));
            }
            if let Some(parent) = node.parent {
                if parent.0 >= len {
                    return Err(SnapshotError::NodeOutOfRange(parent.0));
                }
            }
            if let Some(child) = node.children.iter().find(|child| child.0 >= len) {
                return Err(SnapshotError::NodeOutOfRange(child.0));
            }
        }
        for stop in &self.focus_sequence {
            if let Some(target) = stop.target {
                if target.0 >= len {
                    return Err(SnapshotError::NodeOutOfRange(target.0));
                }
            }
        }
        Ok(())
    }
}
