use std::sync::Arc;

use a11y_rule_registry::{Rule, RuleRegistry, RuleSelection};
use a11y_snapshot_model::Snapshot;
use tokio::task::JoinSet;
use tracing::info;

use crate::aggregator::{audit_page, audit_site, complete_report, distinct_pages};
use crate::errors::ReportError;
use crate::model::Report;

/// Audits every snapshot on the blocking pool, one task per page, and merges the page reports
/// in visitation order. The result equals [`run_audit`](crate::run_audit) on the same input.
pub async fn audit_pages_concurrently(
    registry: &RuleRegistry,
    snapshots: Vec<Snapshot>,
    selection: &RuleSelection,
) -> Result<Report, ReportError> {
    let rules: Arc<[Arc<dyn Rule>]> = registry.select(selection).into();
    let snapshots: Vec<Arc<Snapshot>> = snapshots.into_iter().map(Arc::new).collect();
    info!(
        pages = snapshots.len(),
        rules = rules.len(),
        "concurrent audit started"
    );

    let mut tasks = JoinSet::new();
    for (index, snapshot) in snapshots.iter().enumerate() {
        let rules = Arc::clone(&rules);
        let snapshot = Arc::clone(snapshot);
        tasks.spawn_blocking(move || audit_page(&rules, index, &snapshot));
    }

    let mut pages = Vec::with_capacity(snapshots.len());
    while let Some(joined) = tasks.join_next().await {
        pages.push(joined?);
    }

    let site = audit_site(&rules, &distinct_pages(snapshots.iter().map(|snapshot| &**snapshot)));
    Ok(complete_report(pages, site))
}
