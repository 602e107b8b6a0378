use a11y_core_types::{LevelFilter, Severity, WcagLevel};
use a11y_policy_center::default_policy;
use a11y_rule_registry::{
    Findings, PageCheck, PageRule, RegistryError, Rule, RuleDescriptor, RuleInput, RuleRegistry,
    RuleSelection, SiteCheck, SiteRule,
};
use a11y_snapshot_model::{Snapshot, SnapshotBuilder};
use pretty_assertions::assert_eq;

struct FlagPage;

impl PageCheck for FlagPage {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        findings.page(snapshot, "flagged");
    }
}

struct CountPages;

impl SiteCheck for CountPages {
    fn check(&self, pages: &[&Snapshot], findings: &mut Findings<'_>) {
        for page in pages {
            findings.page(page, format!("seen {}", page.url));
        }
    }
}

fn page_rule(criterion: &str, variant: &str, level: WcagLevel) -> PageRule<FlagPage> {
    PageRule::new(
        RuleDescriptor::new(criterion, variant, level, Severity::Medium),
        FlagPage,
    )
}

fn snapshot(url: &str) -> Snapshot {
    let mut builder = SnapshotBuilder::new(url);
    builder.root("html");
    builder.build()
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = RuleRegistry::new();
    registry
        .register(page_rule("1.1.1", "image-alt", WcagLevel::A))
        .unwrap();
    let err = registry
        .register(page_rule("1.1.1", "image-alt", WcagLevel::A))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::DuplicateRule { ref criterion_id, ref variant }
            if criterion_id == "1.1.1" && variant == "image-alt"
    ));
    assert_eq!(registry.len(), 1);

    registry
        .register(page_rule("1.1.1", "redundant-alt", WcagLevel::A))
        .unwrap();
    assert_eq!(registry.len(), 2);
}

#[test]
fn filtering_preserves_registration_order() {
    let mut registry = RuleRegistry::new();
    registry.register(page_rule("2.4.7", "focus-visible", WcagLevel::AA)).unwrap();
    registry.register(page_rule("1.1.1", "image-alt", WcagLevel::A)).unwrap();
    registry.register(page_rule("1.4.3", "text-contrast", WcagLevel::AA)).unwrap();
    registry.register(page_rule("2.1.2", "keyboard-trap", WcagLevel::A)).unwrap();

    let keys = |rules: Vec<std::sync::Arc<dyn Rule>>| -> Vec<String> {
        rules.iter().map(|rule| rule.descriptor().key()).collect()
    };

    assert_eq!(
        keys(registry.rules_for(LevelFilter::All, &[])),
        vec![
            "2.4.7/focus-visible",
            "1.1.1/image-alt",
            "1.4.3/text-contrast",
            "2.1.2/keyboard-trap"
        ]
    );
    assert_eq!(
        keys(registry.rules_for(LevelFilter::AA, &[])),
        vec!["2.4.7/focus-visible", "1.4.3/text-contrast"]
    );
    assert_eq!(
        keys(registry.rules_for(LevelFilter::All, &["operable".to_string()])),
        vec!["2.4.7/focus-visible", "2.1.2/keyboard-trap"]
    );
    assert_eq!(
        keys(registry.rules_for(LevelFilter::A, &["perceivable".to_string()])),
        vec!["1.1.1/image-alt"]
    );
}

#[test]
fn selection_from_policy_honours_disabled_rules_and_criteria() {
    let mut registry = RuleRegistry::new();
    registry.register(page_rule("2.4.3", "focus-order", WcagLevel::A)).unwrap();
    registry.register(page_rule("2.4.7", "focus-visible", WcagLevel::AA)).unwrap();
    registry.register(page_rule("1.4.3", "text-contrast", WcagLevel::AA)).unwrap();

    let mut policy = default_policy();
    policy.rules.disabled = vec!["2.4.3/focus-order".to_string()];
    let selection = RuleSelection::from(&policy);
    let selected: Vec<String> = registry
        .select(&selection)
        .iter()
        .map(|rule| rule.descriptor().key())
        .collect();
    assert_eq!(selected, vec!["2.4.7/focus-visible", "1.4.3/text-contrast"]);

    let only_contrast = RuleSelection::levels(LevelFilter::All).with_criteria(&["1.4.3"]);
    assert_eq!(registry.select(&only_contrast).len(), 1);
}

#[test]
fn page_and_site_rules_reject_the_wrong_input_shape() {
    let home = snapshot("https://shop.test/");
    let cart = snapshot("https://shop.test/cart");
    let pages = [&home, &cart];

    let page = page_rule("2.4.1", "landmarks", WcagLevel::A);
    let site = SiteRule::new(
        RuleDescriptor::new("3.2.3", "nav-order", WcagLevel::AA, Severity::Medium),
        CountPages,
    );

    assert!(page.applies_to(&RuleInput::Page(&home)));
    assert!(!page.applies_to(&RuleInput::Pages(&pages)));
    assert!(site.applies_to(&RuleInput::Pages(&pages)));
    assert!(!site.applies_to(&RuleInput::Pages(&pages[..1])));
    assert!(page.evaluate(&RuleInput::Pages(&pages)).is_err());

    let findings = site.evaluate(&RuleInput::Pages(&pages)).unwrap();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].element.page_url(), "https://shop.test/");
    assert_eq!(findings[1].rule, "3.2.3/nav-order");
}
