pub mod errors;
pub mod model;
pub mod registry;
pub mod rule;

pub use errors::{RegistryError, RuleError};
pub use model::{ElementRef, Finding, FindingKind, RuleDescriptor, RuleScope};
pub use registry::{RuleRegistry, RuleSelection};
pub use rule::{Findings, PageCheck, PageRule, Rule, RuleInput, SiteCheck, SiteRule};
