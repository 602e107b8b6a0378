use a11y_rule_registry::Finding;

use crate::model::{PageEntry, PageReport, Report, ReportSummary};

impl Report {
    /// Merges independently produced page reports in visitation order, whatever order they
    /// finished in.
    pub fn merge_pages(pages: Vec<PageReport>) -> Report {
        Report::assemble(pages, Vec::new())
    }

    /// Page findings in visitation order followed by cross-page findings.
    pub fn assemble(mut pages: Vec<PageReport>, site_findings: Vec<Finding>) -> Report {
        pages.sort_by_key(|page| page.index);
        let mut entries = Vec::with_capacity(pages.len());
        let mut findings = Vec::new();
        for page in pages {
            entries.push(PageEntry {
                url: page.url,
                captures: page.captures,
                rules_evaluated: page.rules_evaluated,
                findings: page.findings.len(),
            });
            findings.extend(page.findings);
        }
        findings.extend(site_findings);
        let summary = ReportSummary::from_findings(&findings);
        Report {
            pages: entries,
            findings,
            summary,
        }
    }
}
