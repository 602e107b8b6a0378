use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SnapshotError;
use crate::model::{Snapshot, Viewport};

/// Opaque page reference owned by the browser driver.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PageHandle {
    pub url: String,
}

impl PageHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptureKind {
    Base,
    Zoomed,
    Reflow,
}

/// Viewports a driver captures per page, plus the Tab-press budget for the focus sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapturePlan {
    pub viewport: Viewport,
    pub zoom_factor: f64,
    pub reflow_width: f64,
    pub max_focus_presses: usize,
}

impl Default for CapturePlan {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            zoom_factor: 2.0,
            reflow_width: 320.0,
            max_focus_presses: 80,
        }
    }
}

impl CapturePlan {
    pub fn viewports(&self) -> Vec<(CaptureKind, Viewport)> {
        vec![
            (CaptureKind::Base, self.viewport),
            (CaptureKind::Zoomed, self.viewport.zoomed(self.zoom_factor)),
            (CaptureKind::Reflow, self.viewport.reflow(self.reflow_width)),
        ]
    }
}

/// Port the browser-automation driver implements.
///
/// Implementations record `focus_sequence` by pressing Tab up to `max_focus_presses` times
/// and storing the focused element after each press.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn capture_snapshot(
        &self,
        page: &PageHandle,
        viewport: Viewport,
        max_focus_presses: usize,
    ) -> Result<Snapshot, SnapshotError>;
}

/// Replays pre-recorded snapshots keyed by page url; the capture whose viewport width is
/// closest to the requested one is returned.
#[derive(Clone, Debug, Default)]
pub struct RecordedSnapshots {
    pages: HashMap<String, Vec<Snapshot>>,
}

impl RecordedSnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: Snapshot) {
        self.pages
            .entry(snapshot.url.clone())
            .or_default()
            .push(snapshot);
    }
}

#[async_trait]
impl SnapshotSource for RecordedSnapshots {
    async fn capture_snapshot(
        &self,
        page: &PageHandle,
        viewport: Viewport,
        max_focus_presses: usize,
    ) -> Result<Snapshot, SnapshotError> {
        let candidates = self
            .pages
            .get(&page.url)
            .ok_or_else(|| SnapshotError::Capture(format!("no recording for {}", page.url)))?;
        let best = candidates
            .iter()
            .min_by(|a, b| {
                let da = (a.viewport.width - viewport.width).abs();
                let db = (b.viewport.width - viewport.width).abs();
                da.total_cmp(&db)
            })
            .ok_or_else(|| SnapshotError::Capture(format!("empty recording for {}", page.url)))?;
        debug!(
            page = %page.url,
            requested = viewport.width,
            served = best.viewport.width,
            "replaying recorded snapshot"
        );
        let mut snapshot = best.clone();
        snapshot.focus_sequence.truncate(max_focus_presses);
        Ok(snapshot)
    }
}
