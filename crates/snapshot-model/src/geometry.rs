use crate::model::{BoundingBox, Snapshot};
use crate::view::ElementView;

impl<'a> ElementView<'a> {
    /// Area of the rendered box; zero when the element was not rendered.
    pub fn bounding_box_area(&self) -> f64 {
        self.bounding_box().map_or(0.0, BoundingBox::area)
    }

    /// Whether the rendered box lies entirely inside the capture viewport horizontally
    /// and starts within it vertically.
    pub fn is_within_viewport(&self) -> bool {
        let viewport = self.snapshot().viewport;
        match self.bounding_box() {
            Some(bbox) => {
                bbox.x >= 0.0
                    && bbox.right() <= viewport.width
                    && bbox.y >= 0.0
                    && bbox.y < viewport.height
            }
            None => false,
        }
    }

    /// Content wider than the element's own client box.
    pub fn overflows_container(&self, tolerance: f64) -> bool {
        match self.node().scroll {
            Some(scroll) => scroll.scroll_width > scroll.client_width + tolerance,
            None => match (self.bounding_box(), self.parent().and_then(|p| p.bounding_box().copied()))
            {
                (Some(own), Some(parent)) => own.right() > parent.right() + tolerance,
                _ => false,
            },
        }
    }
}

impl Snapshot {
    /// Horizontal overflow of the whole document beyond the viewport client width.
    pub fn document_overflow(&self) -> f64 {
        (self.document.scroll_width - self.document.client_width).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::SnapshotBuilder;
    use crate::model::Viewport;

    #[test]
    fn viewport_containment_and_area() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        builder.viewport(Viewport::new(320.0, 640.0));
        let root = builder.root("html");
        let inside = builder.child(root, "button");
        builder.bbox(inside, 10.0, 10.0, 100.0, 40.0);
        let outside = builder.child(root, "div");
        builder.bbox(outside, 200.0, 10.0, 300.0, 40.0);
        let unrendered = builder.child(root, "span");
        let snapshot = builder.build();

        assert!(snapshot.view(inside).is_within_viewport());
        assert!(!snapshot.view(outside).is_within_viewport());
        assert_eq!(snapshot.view(inside).bounding_box_area(), 4000.0);
        assert_eq!(snapshot.view(unrendered).bounding_box_area(), 0.0);
    }

    #[test]
    fn overflow_from_scroll_metrics_or_parent_box() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        builder.bbox(root, 0.0, 0.0, 320.0, 600.0);
        let clipped = builder.child(root, "div");
        builder.scroll(clipped, 500.0, 300.0);
        let wide = builder.child(root, "table");
        builder.bbox(wide, 0.0, 0.0, 480.0, 100.0);
        let snapshot = builder.build();

        assert!(snapshot.view(clipped).overflows_container(10.0));
        assert!(snapshot.view(wide).overflows_container(10.0));
        assert!(!snapshot.view(root).overflows_container(10.0));
    }
}
