//! Human-readable and JSON renderings of a [`Report`].

use std::fmt::Write;

use a11y_core_types::Severity;
use a11y_rule_registry::Finding;

use crate::errors::ReportError;
use crate::model::Report;

fn write_finding(out: &mut String, finding: &Finding) {
    let _ = writeln!(
        out,
        "[{} {}] {}",
        finding.criterion_id, finding.rule, finding.message
    );
    let _ = writeln!(
        out,
        "  at {} {}",
        finding.element.page_url(),
        finding.element.selector()
    );
    let _ = writeln!(out, "  WCAG {} (Level {})", finding.criterion_id, finding.level);
    if !finding.remediation.is_empty() {
        let _ = writeln!(out, "  Fix: {}", finding.remediation);
    }
    out.push('\n');
}

/// Text report grouped by severity, evaluator errors listed separately.
pub fn render_text(report: &Report) -> String {
    let mut out = String::from("=== WCAG 2.1 Accessibility Report ===\n\n");
    let summary = &report.summary;
    let _ = writeln!(
        out,
        "{} page capture(s), {} violation(s), {} evaluator error(s)\n",
        report.pages.len(),
        summary.violations,
        summary.evaluator_errors
    );

    if report.is_clean() {
        out.push_str("No violations found.\n");
        return out;
    }

    for severity in [Severity::High, Severity::Medium, Severity::Low] {
        let group: Vec<&Finding> = report
            .violations()
            .filter(|finding| finding.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }
        let _ = writeln!(out, "--- {} ({}) ---", severity.as_str().to_uppercase(), group.len());
        for finding in group {
            write_finding(&mut out, finding);
        }
    }

    let errors: Vec<&Finding> = report.evaluator_errors().collect();
    if !errors.is_empty() {
        let _ = writeln!(out, "--- EVALUATOR ERRORS ({}) ---", errors.len());
        for finding in errors {
            write_finding(&mut out, finding);
        }
        out.push_str("Coverage is incomplete: the criteria above were not fully evaluated.\n");
    }
    out
}

pub fn to_json(report: &Report) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn from_json(json: &str) -> Result<Report, ReportError> {
    Ok(serde_json::from_str(json)?)
}
