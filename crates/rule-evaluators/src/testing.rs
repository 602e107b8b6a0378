use a11y_rule_registry::{Finding, Rule, RuleInput};
use a11y_snapshot_model::Snapshot;

pub fn run_page(rule: &dyn Rule, snapshot: &Snapshot) -> Vec<Finding> {
    let input = RuleInput::Page(snapshot);
    if !rule.applies_to(&input) {
        return Vec::new();
    }
    rule.evaluate(&input).expect("page rule evaluates")
}

pub fn run_site(rule: &dyn Rule, pages: &[&Snapshot]) -> Vec<Finding> {
    let input = RuleInput::Pages(pages);
    if !rule.applies_to(&input) {
        return Vec::new();
    }
    rule.evaluate(&input).expect("site rule evaluates")
}
