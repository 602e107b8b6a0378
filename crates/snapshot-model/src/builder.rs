use std::collections::BTreeMap;

use a11y_core_types::SnapshotId;

use crate::model::{
    BoundingBox, ComputedStyle, DocumentMetrics, ElementNode, FocusIndicator, FocusStop, NodeId,
    ScrollMetrics, Snapshot, Viewport,
};

/// Incremental snapshot construction for drivers and literal test fixtures.
///
/// Text set through [`SnapshotBuilder::text`] is the element's own text; `build` folds child
/// text into each ancestor so `text_content` matches what a browser reports.
#[derive(Debug)]
pub struct SnapshotBuilder {
    url: String,
    nodes: Vec<ElementNode>,
    own_text: Vec<String>,
    focus_sequence: Vec<FocusStop>,
    viewport: Viewport,
    document: Option<DocumentMetrics>,
}

impl SnapshotBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            nodes: Vec::new(),
            own_text: Vec::new(),
            focus_sequence: Vec::new(),
            viewport: Viewport::default(),
            document: None,
        }
    }

    pub fn root(&mut self, tag: &str) -> NodeId {
        self.push(tag, None)
    }

    pub fn child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.push(tag, Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementNode {
            id,
            tag: tag.trim().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text_content: String::new(),
            computed_style: ComputedStyle::default(),
            bounding_box: None,
            scroll: None,
            parent,
            children: Vec::new(),
        });
        self.own_text.push(String::new());
        id
    }

    pub fn attr(&mut self, node: NodeId, name: &str, value: &str) -> &mut Self {
        self.nodes[node.0]
            .attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn text(&mut self, node: NodeId, text: &str) -> &mut Self {
        self.own_text[node.0] = text.to_string();
        self
    }

    pub fn style(&mut self, node: NodeId) -> &mut ComputedStyle {
        &mut self.nodes[node.0].computed_style
    }

    pub fn bbox(&mut self, node: NodeId, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.nodes[node.0].bounding_box = Some(BoundingBox::new(x, y, width, height));
        self
    }

    pub fn scroll(&mut self, node: NodeId, scroll_width: f64, client_width: f64) -> &mut Self {
        self.nodes[node.0].scroll = Some(ScrollMetrics {
            scroll_width,
            client_width,
        });
        self
    }

    pub fn focus(&mut self, node: NodeId) -> &mut Self {
        self.focus_sequence.push(FocusStop::element(node));
        self
    }

    pub fn focus_with(&mut self, node: NodeId, indicator: FocusIndicator) -> &mut Self {
        self.focus_sequence.push(FocusStop {
            target: Some(node),
            indicator: Some(indicator),
        });
        self
    }

    pub fn focus_body(&mut self) -> &mut Self {
        self.focus_sequence.push(FocusStop::body());
        self
    }

    pub fn viewport(&mut self, viewport: Viewport) -> &mut Self {
        self.viewport = viewport;
        self
    }

    pub fn document(&mut self, scroll_width: f64, client_width: f64) -> &mut Self {
        self.document = Some(DocumentMetrics {
            scroll_width,
            client_width,
        });
        self
    }

    pub fn build(mut self) -> Snapshot {
        // children always carry a larger index than their parent, so a reverse sweep
        // sees every subtree complete before its parent
        let mut folded: Vec<String> = self.own_text.clone();
        for index in (0..self.nodes.len()).rev() {
            let mut parts: Vec<&str> = Vec::new();
            let own = self.own_text[index].trim();
            if !own.is_empty() {
                parts.push(own);
            }
            let child_texts: Vec<String> = self.nodes[index]
                .children
                .iter()
                .map(|child| folded[child.0].clone())
                .collect();
            parts.extend(
                child_texts
                    .iter()
                    .map(|text| text.trim())
                    .filter(|text| !text.is_empty()),
            );
            folded[index] = parts.join(" ");
        }
        for (node, text) in self.nodes.iter_mut().zip(folded) {
            node.text_content = text;
        }
        let document = self.document.unwrap_or(DocumentMetrics {
            scroll_width: self.viewport.width,
            client_width: self.viewport.width,
        });
        Snapshot {
            id: SnapshotId::new(),
            url: self.url,
            elements: self.nodes,
            focus_sequence: self.focus_sequence,
            viewport: self.viewport,
            document,
        }
    }
}
