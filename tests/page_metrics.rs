//! Lives in its own binary so no other test moves the global page counter.

use a11y_audit::{AuditEngine, AuditSession, PageHandle, SnapshotBuilder, Viewport};
use a11y_report::metrics::pages_audited;
use a11y_snapshot_model::RecordedSnapshots;
use pretty_assertions::assert_eq;

fn recording(urls: &[&str]) -> RecordedSnapshots {
    let mut recorded = RecordedSnapshots::new();
    for url in urls {
        for width in [1280.0, 640.0, 320.0] {
            let mut builder = SnapshotBuilder::new(*url);
            builder.viewport(Viewport::new(width, 800.0));
            let root = builder.root("html");
            builder.attr(root, "lang", "en");
            let heading = builder.child(root, "h1");
            builder.text(heading, "Menu");
            recorded.insert(builder.build());
        }
    }
    recorded
}

#[test]
fn each_page_counts_once_across_its_captures() {
    let urls = ["https://shop.test/", "https://shop.test/menu"];
    let engine = AuditEngine::with_defaults().unwrap();

    let before = pages_audited();
    let session = AuditSession::new(&engine, recording(&urls));
    let pages: Vec<PageHandle> = urls.iter().map(|url| PageHandle::new(*url)).collect();
    let report = tokio_test::block_on(session.audit(&pages)).unwrap();

    assert!(report.pages.iter().all(|page| page.captures == 3));
    assert_eq!(pages_audited() - before, 2);

    let before = pages_audited();
    let mut builder = SnapshotBuilder::new(urls[0]);
    builder.root("html");
    let single = engine.audit(&[builder.build()]);
    assert_eq!(single.pages.len(), 1);
    assert_eq!(pages_audited() - before, 1);
}
