use std::collections::BTreeMap;

use a11y_core_types::Severity;
use a11y_rule_registry::{Finding, FindingKind};
use serde::{Deserialize, Serialize};

/// Findings produced for one visited page, before merging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    /// Position in visitation order.
    pub index: usize,
    pub url: String,
    pub captures: usize,
    pub rules_evaluated: usize,
    pub findings: Vec<Finding>,
}

impl PageReport {
    pub fn new(index: usize, url: impl Into<String>) -> Self {
        Self {
            index,
            url: url.into(),
            captures: 0,
            rules_evaluated: 0,
            findings: Vec::new(),
        }
    }

    /// Appends the findings of another capture of the same page.
    pub fn absorb(&mut self, other: PageReport) {
        self.captures += other.captures;
        self.rules_evaluated += other.rules_evaluated;
        self.findings.extend(other.findings);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub url: String,
    pub captures: usize,
    pub rules_evaluated: usize,
    pub findings: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub violations: usize,
    pub evaluator_errors: usize,
    pub by_criterion: BTreeMap<String, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
}

impl ReportSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = ReportSummary {
            total: findings.len(),
            ..ReportSummary::default()
        };
        for finding in findings {
            match finding.kind {
                FindingKind::Violation => summary.violations += 1,
                FindingKind::EvaluatorError => summary.evaluator_errors += 1,
            }
            *summary
                .by_criterion
                .entry(finding.criterion_id.clone())
                .or_default() += 1;
            *summary.by_severity.entry(finding.severity).or_default() += 1;
        }
        summary
    }
}

/// Result of one audit run. Findings are ordered by page visitation order, then rule
/// registration order, then document order; cross-page findings come last.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub pages: Vec<PageEntry>,
    pub findings: Vec<Finding>,
    pub summary: ReportSummary,
}

impl Report {
    pub fn violations(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| !finding.is_evaluator_error())
    }

    /// Findings standing in for rules that could not run; coverage is incomplete when non-empty.
    pub fn evaluator_errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| finding.is_evaluator_error())
    }

    pub fn findings_for(&self, criterion_id: &str) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.criterion_id == criterion_id)
            .collect()
    }

    /// `true` when any violation is at least as severe as `floor`.
    pub fn has_blocking(&self, floor: Severity) -> bool {
        self.violations()
            .any(|finding| finding.severity.at_least(floor))
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_core_types::WcagLevel;
    use a11y_rule_registry::{ElementRef, RuleDescriptor};

    fn finding(criterion: &str, severity: Severity) -> Finding {
        RuleDescriptor::new(criterion, "sample", WcagLevel::A, severity).finding(
            ElementRef::Page {
                page: "https://shop.test/".to_string(),
            },
            "sample",
        )
    }

    #[test]
    fn summary_counts_by_criterion_and_severity() {
        let descriptor = RuleDescriptor::new("4.1.2", "sample", WcagLevel::A, Severity::Low);
        let findings = vec![
            finding("1.1.1", Severity::High),
            finding("1.1.1", Severity::High),
            finding("3.1.1", Severity::Medium),
            descriptor.evaluator_error(
                ElementRef::Page {
                    page: "https://shop.test/".to_string(),
                },
                "boom",
            ),
        ];
        let summary = ReportSummary::from_findings(&findings);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.violations, 3);
        assert_eq!(summary.evaluator_errors, 1);
        assert_eq!(summary.by_criterion["1.1.1"], 2);
        assert_eq!(summary.by_severity[&Severity::High], 2);
        assert_eq!(summary.by_severity[&Severity::Low], 1);
    }

    #[test]
    fn blocking_ignores_evaluator_errors() {
        let descriptor = RuleDescriptor::new("1.4.3", "sample", WcagLevel::AA, Severity::High);
        let findings = vec![
            finding("2.4.4", Severity::Medium),
            descriptor.evaluator_error(
                ElementRef::Page {
                    page: "https://shop.test/".to_string(),
                },
                "boom",
            ),
        ];
        let report = Report {
            pages: Vec::new(),
            summary: ReportSummary::from_findings(&findings),
            findings,
        };
        assert!(!report.has_blocking(Severity::High));
        assert!(report.has_blocking(Severity::Medium));
        assert_eq!(report.evaluator_errors().count(), 1);
    }
}
