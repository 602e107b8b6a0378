use std::time::Duration;

use a11y_rule_registry::{Finding, FindingKind};
use lazy_static::lazy_static;
use prometheus::{
    core::Collector, histogram_opts, opts, HistogramVec, IntCounter, IntCounterVec, Registry,
};
use tracing::error;

lazy_static! {
    static ref AUDIT_PAGES_TOTAL: IntCounter =
        IntCounter::new("a11y_audit_pages_total", "Pages audited").unwrap();
    static ref AUDIT_FINDINGS_TOTAL: IntCounterVec = IntCounterVec::new(
        opts!(
            "a11y_audit_findings_total",
            "Violations reported grouped by criterion and severity"
        ),
        &["criterion", "severity"]
    )
    .unwrap();
    static ref AUDIT_EVALUATOR_ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        opts!(
            "a11y_audit_evaluator_errors_total",
            "Rules that failed or panicked during evaluation"
        ),
        &["criterion"]
    )
    .unwrap();
    static ref RULE_EVALUATION_SECONDS: HistogramVec = HistogramVec::new(
        histogram_opts!(
            "a11y_rule_evaluation_seconds",
            "Time spent evaluating one rule on one input",
            vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]
        ),
        &["rule"]
    )
    .unwrap();
}

fn register<C>(registry: &Registry, collector: C)
where
    C: Collector + Clone + Send + Sync + 'static,
{
    if let Err(err) = registry.register(Box::new(collector.clone())) {
        if !matches!(err, prometheus::Error::AlreadyReg) {
            error!(?err, "failed to register audit metric");
        }
    }
}

pub fn register_metrics(registry: &Registry) {
    register(registry, AUDIT_PAGES_TOTAL.clone());
    register(registry, AUDIT_FINDINGS_TOTAL.clone());
    register(registry, AUDIT_EVALUATOR_ERRORS_TOTAL.clone());
    register(registry, RULE_EVALUATION_SECONDS.clone());
}

pub fn record_pages_audited(count: usize) {
    AUDIT_PAGES_TOTAL.inc_by(count as u64);
}

pub fn pages_audited() -> u64 {
    AUDIT_PAGES_TOTAL.get()
}

pub fn record_findings(findings: &[Finding]) {
    for finding in findings {
        match finding.kind {
            FindingKind::Violation => AUDIT_FINDINGS_TOTAL
                .with_label_values(&[finding.criterion_id.as_str(), finding.severity.as_str()])
                .inc(),
            FindingKind::EvaluatorError => AUDIT_EVALUATOR_ERRORS_TOTAL
                .with_label_values(&[finding.criterion_id.as_str()])
                .inc(),
        }
    }
}

pub fn observe_rule_latency(rule: &str, elapsed: Duration) {
    RULE_EVALUATION_SECONDS
        .with_label_values(&[rule])
        .observe(elapsed.as_secs_f64());
}
