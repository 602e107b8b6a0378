//! Report aggregation: runs the selected rules over snapshots, isolates failing rules and
//! merges per-page results into one deterministic [`Report`].

mod aggregator;
mod errors;
mod merge;
pub mod metrics;
mod model;
mod parallel;
pub mod render;

pub use aggregator::{
    audit_page, audit_site, complete_report, distinct_pages, evaluate_rule, run_audit,
};
pub use errors::ReportError;
pub use model::{PageEntry, PageReport, Report, ReportSummary};
pub use parallel::audit_pages_concurrently;
pub use render::{render_text, to_json};
