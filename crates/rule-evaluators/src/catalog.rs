use std::sync::Arc;

use a11y_policy_center::{AuditPolicy, ThresholdPolicy};
use a11y_rule_registry::{RegistryError, Rule, RuleRegistry};
use tracing::info;

use crate::aria::{AriaHiddenFocus, AriaValidity};
use crate::consistency::{ConsistentIdentification, ConsistentNavigation};
use crate::contrast::{ComponentContrast, FocusIndicatorContrast, TextContrast};
use crate::duplicate_id::DuplicateId;
use crate::focus::{FocusOrder, FocusVisible, PositiveTabindex};
use crate::headings::{EmptyHeading, HeadingOrder, HeadingPresence};
use crate::keyboard::{ClickHandler, KeyboardTrap, NegativeTabindex};
use crate::landmarks::{Landmarks, NavBeforeMain};
use crate::language::{HtmlLang, LangOfParts};
use crate::live_region::{AriaLiveValue, StatusMessages};
use crate::names::{ButtonName, FormLabel, GenericLinkText, ImageAlt, LinkName, RedundantAlt};
use crate::reflow::{Reflow, ResizeText};
use crate::target_size::TargetSize;

fn shared<R: Rule + 'static>(rule: R) -> Arc<dyn Rule> {
    Arc::new(rule)
}

/// Every built-in rule, in criterion order. Thresholds are captured at construction.
pub fn builtin_rules(thresholds: &ThresholdPolicy) -> Vec<Arc<dyn Rule>> {
    vec![
        shared(ImageAlt::rule()),
        shared(RedundantAlt::rule()),
        shared(HeadingOrder::rule()),
        shared(HeadingPresence::rule()),
        shared(EmptyHeading::rule()),
        shared(NavBeforeMain::rule()),
        shared(TextContrast::rule(thresholds)),
        shared(ResizeText::rule(thresholds)),
        shared(Reflow::rule(thresholds)),
        shared(ComponentContrast::rule(thresholds)),
        shared(FocusIndicatorContrast::rule(thresholds)),
        shared(NegativeTabindex::rule()),
        shared(ClickHandler::rule()),
        shared(KeyboardTrap::rule(thresholds)),
        shared(Landmarks::rule()),
        shared(PositiveTabindex::rule()),
        shared(FocusOrder::rule(thresholds)),
        shared(LinkName::rule()),
        shared(GenericLinkText::rule()),
        shared(FocusVisible::rule()),
        shared(TargetSize::rule(thresholds)),
        shared(HtmlLang::rule()),
        shared(LangOfParts::rule()),
        shared(ConsistentNavigation::rule()),
        shared(ConsistentIdentification::rule()),
        shared(FormLabel::rule()),
        shared(DuplicateId::rule()),
        shared(ButtonName::rule()),
        shared(AriaValidity::rule()),
        shared(AriaHiddenFocus::rule()),
        shared(StatusMessages::rule()),
        shared(AriaLiveValue::rule()),
    ]
}

/// Registers the built-in rules configured by `policy`.
pub fn register_builtin(registry: &mut RuleRegistry, policy: &AuditPolicy) -> Result<(), RegistryError> {
    let rules = builtin_rules(&policy.thresholds);
    let count = rules.len();
    registry.register_all(rules)?;
    info!(count, rev = policy.rev, "built-in rules registered");
    Ok(())
}
