pub mod builder;
pub mod errors;
pub mod geometry;
pub mod model;
pub mod name;
pub mod ports;
pub mod view;

pub use builder::SnapshotBuilder;
pub use errors::SnapshotError;
pub use model::{
    BoundingBox, ComputedStyle, DocumentMetrics, ElementNode, FocusIndicator, FocusStop, NodeId,
    ScrollMetrics, Snapshot, Viewport,
};
pub use name::{AccessibleName, NameSource};
pub use ports::{CaptureKind, CapturePlan, PageHandle, RecordedSnapshots, SnapshotSource};
pub use view::{ElementView, INTERACTIVE_ROLES};
