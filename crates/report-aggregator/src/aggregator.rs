use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use a11y_rule_registry::{Finding, Rule, RuleInput, RuleRegistry, RuleScope, RuleSelection};
use a11y_snapshot_model::Snapshot;
use tracing::{debug, info, warn};

use crate::metrics;
use crate::model::{PageReport, Report};

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked".to_string()
    }
}

/// Runs one rule on one input. A returned error or a panic becomes a single
/// `evaluator-error` finding so the remaining rules still run.
pub fn evaluate_rule(rule: &dyn Rule, input: &RuleInput<'_>) -> Option<Vec<Finding>> {
    let descriptor = rule.descriptor();
    let key = descriptor.key();
    let started = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        if rule.applies_to(input) {
            rule.evaluate(input).map(Some)
        } else {
            Ok(None)
        }
    }));
    let elapsed = started.elapsed();
    metrics::observe_rule_latency(&key, elapsed);

    match outcome {
        Ok(Ok(Some(findings))) => {
            debug!(rule = %key, findings = findings.len(), ?elapsed, "rule evaluated");
            Some(findings)
        }
        Ok(Ok(None)) => None,
        Ok(Err(err)) => {
            warn!(criterion = %descriptor.criterion_id, rule = %key, error = %err, "rule evaluation failed");
            Some(vec![descriptor.evaluator_error(input.anchor(), &err.to_string())])
        }
        Err(payload) => {
            let detail = panic_detail(&*payload);
            warn!(criterion = %descriptor.criterion_id, rule = %key, panic = %detail, "rule panicked");
            Some(vec![descriptor.evaluator_error(input.anchor(), &detail)])
        }
    }
}

/// Runs the single-page rules on one snapshot, in the order given.
pub fn audit_page(rules: &[Arc<dyn Rule>], index: usize, snapshot: &Snapshot) -> PageReport {
    debug!(page = %snapshot.url, index, "page audit started");
    let input = RuleInput::Page(snapshot);
    let mut report = PageReport::new(index, snapshot.url.clone());
    report.captures = 1;
    for rule in rules {
        if rule.descriptor().scope != RuleScope::Page {
            continue;
        }
        if let Some(findings) = evaluate_rule(rule.as_ref(), &input) {
            report.rules_evaluated += 1;
            report.findings.extend(findings);
        }
    }
    debug!(
        page = %snapshot.url,
        index,
        findings = report.findings.len(),
        "page audit finished"
    );
    report
}

/// One snapshot per distinct url, first capture wins, in visitation order.
pub fn distinct_pages<'a>(snapshots: impl IntoIterator<Item = &'a Snapshot>) -> Vec<&'a Snapshot> {
    let mut seen = HashSet::new();
    snapshots
        .into_iter()
        .filter(|snapshot| seen.insert(snapshot.url.as_str()))
        .collect()
}

/// Runs the cross-page rules over `pages` in visitation order.
pub fn audit_site(rules: &[Arc<dyn Rule>], pages: &[&Snapshot]) -> Vec<Finding> {
    let input = RuleInput::Pages(pages);
    rules
        .iter()
        .filter(|rule| rule.descriptor().scope == RuleScope::CrossPage)
        .filter_map(|rule| evaluate_rule(rule.as_ref(), &input))
        .flatten()
        .collect()
}

/// Audits `snapshots` (in visitation order) with the rules `selection` admits.
///
/// Repeated captures of the same url are audited as separate page entries; cross-page rules
/// see only the first capture of each url.
pub fn run_audit(
    registry: &RuleRegistry,
    snapshots: &[Snapshot],
    selection: &RuleSelection,
) -> Report {
    let rules = registry.select(selection);
    info!(
        pages = snapshots.len(),
        rules = rules.len(),
        levels = ?selection.levels,
        "audit started"
    );
    let pages = snapshots
        .iter()
        .enumerate()
        .map(|(index, snapshot)| audit_page(&rules, index, snapshot))
        .collect();
    let site = audit_site(&rules, &distinct_pages(snapshots));
    complete_report(pages, site)
}

/// Assembles page and cross-page findings into a report and records them in the metrics.
///
/// Each page entry counts once, however many captures were folded into it.
pub fn complete_report(pages: Vec<PageReport>, site: Vec<Finding>) -> Report {
    let report = Report::assemble(pages, site);
    metrics::record_pages_audited(report.pages.len());
    metrics::record_findings(&report.findings);
    if report.summary.evaluator_errors > 0 {
        warn!(
            evaluator_errors = report.summary.evaluator_errors,
            "audit finished with incomplete coverage"
        );
    }
    info!(
        findings = report.summary.total,
        violations = report.summary.violations,
        "audit finished"
    );
    report
}
