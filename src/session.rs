//! Captures pages through a [`SnapshotSource`] and audits them.
//!
//! Each page is captured at the base viewport, at the zoomed viewport and at the reflow
//! width. The zoomed and reflow captures only feed the resize-text (1.4.4) and reflow
//! (1.4.10) rules so the other rules do not report the same element three times.

use a11y_policy_center::ThresholdPolicy;
use a11y_report::{audit_page, audit_site, complete_report, PageReport, Report};
use a11y_rule_registry::RuleDescriptor;
use a11y_snapshot_model::{CaptureKind, CapturePlan, PageHandle, Snapshot, SnapshotSource};
use tracing::{debug, info};

use crate::engine::AuditEngine;
use crate::errors::EngineError;

/// One captured viewport of one page.
#[derive(Clone, Debug)]
pub struct Capture {
    pub kind: CaptureKind,
    pub snapshot: Snapshot,
}

/// Captures of one page, in plan order.
#[derive(Clone, Debug)]
pub struct PageCaptures {
    pub page: PageHandle,
    pub captures: Vec<Capture>,
}

impl PageCaptures {
    pub fn base(&self) -> Option<&Snapshot> {
        self.captures
            .iter()
            .find(|capture| capture.kind == CaptureKind::Base)
            .map(|capture| &capture.snapshot)
    }
}

/// Capture plan derived from the policy thresholds.
pub fn plan_from(thresholds: &ThresholdPolicy) -> CapturePlan {
    CapturePlan {
        zoom_factor: thresholds.zoom_factor,
        reflow_width: thresholds.reflow_width_px,
        max_focus_presses: thresholds.max_focus_presses,
        ..CapturePlan::default()
    }
}

fn capture_admits(kind: CaptureKind, descriptor: &RuleDescriptor) -> bool {
    match kind {
        CaptureKind::Base => true,
        CaptureKind::Zoomed => descriptor.criterion_id == "1.4.4",
        CaptureKind::Reflow => descriptor.criterion_id == "1.4.10",
    }
}

pub struct AuditSession<'e, S> {
    engine: &'e AuditEngine,
    source: S,
    plan: CapturePlan,
}

impl<'e, S: SnapshotSource> AuditSession<'e, S> {
    pub fn new(engine: &'e AuditEngine, source: S) -> Self {
        let plan = plan_from(&engine.policy().thresholds);
        Self {
            engine,
            source,
            plan,
        }
    }

    pub fn with_plan(mut self, plan: CapturePlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn plan(&self) -> &CapturePlan {
        &self.plan
    }

    /// Captures every page in visitation order. A capture failure aborts the session.
    pub async fn capture(&self, pages: &[PageHandle]) -> Result<Vec<PageCaptures>, EngineError> {
        let mut captured = Vec::with_capacity(pages.len());
        for page in pages {
            let mut captures = Vec::new();
            for (kind, viewport) in self.plan.viewports() {
                let snapshot = self
                    .source
                    .capture_snapshot(page, viewport, self.plan.max_focus_presses)
                    .await?;
                debug!(
                    page = %page.url,
                    ?kind,
                    width = viewport.width,
                    elements = snapshot.elements.len(),
                    "page captured"
                );
                captures.push(Capture { kind, snapshot });
            }
            captured.push(PageCaptures {
                page: page.clone(),
                captures,
            });
        }
        info!(pages = captured.len(), "capture finished");
        Ok(captured)
    }

    /// Captures and audits `pages`; one report entry per page, all captures folded in.
    pub async fn audit(&self, pages: &[PageHandle]) -> Result<Report, EngineError> {
        let captured = self.capture(pages).await?;
        Ok(self.audit_captures(&captured))
    }

    pub fn audit_captures(&self, captured: &[PageCaptures]) -> Report {
        let rules = self.engine.registry().select(self.engine.selection());
        let mut reports = Vec::with_capacity(captured.len());
        for (index, page) in captured.iter().enumerate() {
            let mut report = PageReport::new(index, page.page.url.clone());
            for capture in &page.captures {
                let admitted: Vec<_> = rules
                    .iter()
                    .filter(|rule| capture_admits(capture.kind, rule.descriptor()))
                    .cloned()
                    .collect();
                report.absorb(audit_page(&admitted, index, &capture.snapshot));
            }
            reports.push(report);
        }
        let bases: Vec<&Snapshot> = captured.iter().filter_map(PageCaptures::base).collect();
        let site = audit_site(&rules, &bases);
        complete_report(reports, site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_snapshot_model::{RecordedSnapshots, SnapshotBuilder, Viewport};

    fn recording() -> RecordedSnapshots {
        let mut recorded = RecordedSnapshots::new();
        for width in [1280.0, 640.0, 320.0] {
            let mut builder = SnapshotBuilder::new("https://shop.test/");
            builder.viewport(Viewport::new(width, 800.0));
            let root = builder.root("html");
            builder.attr(root, "lang", "en");
            let image = builder.child(root, "img");
            builder.attr(image, "src", "logo.png");
            if width < 400.0 {
                builder.document(900.0, width);
            }
            recorded.insert(builder.build());
        }
        recorded
    }

    #[tokio::test]
    async fn narrow_captures_only_feed_their_rules() {
        let engine = AuditEngine::with_defaults().unwrap();
        let session = AuditSession::new(&engine, recording());
        let report = session
            .audit(&[PageHandle::new("https://shop.test/")])
            .await
            .unwrap();

        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.pages[0].captures, 3);
        assert_eq!(report.findings_for("1.1.1").len(), 1);
        assert_eq!(report.findings_for("1.4.10").len(), 1);
    }

    #[tokio::test]
    async fn missing_recording_fails_the_session() {
        let engine = AuditEngine::with_defaults().unwrap();
        let session = AuditSession::new(&engine, RecordedSnapshots::new());
        let result = session.audit(&[PageHandle::new("https://shop.test/")]).await;
        assert!(matches!(result, Err(EngineError::Snapshot(_))));
    }
}
