use a11y_policy_center::default_policy;
use a11y_rule_evaluators::builtin_rules;
use a11y_rule_registry::{Rule, RuleInput};
use a11y_snapshot_model::{FocusIndicator, FocusStop, NodeId, Snapshot, SnapshotBuilder, Viewport};

fn run_all(pages: &[&Snapshot]) -> usize {
    let rules = builtin_rules(&default_policy().thresholds);
    let mut total = 0;
    for rule in &rules {
        for page in pages {
            let input = RuleInput::Page(page);
            if rule.applies_to(&input) {
                total += rule.evaluate(&input).expect("rule evaluates").len();
            }
        }
        let input = RuleInput::Pages(pages);
        if rule.applies_to(&input) {
            total += rule.evaluate(&input).expect("rule evaluates").len();
        }
    }
    total
}

#[test]
fn empty_snapshot_yields_no_errors() {
    let snapshot = SnapshotBuilder::new("about:blank").build();
    run_all(&[&snapshot]);
}

#[test]
fn odd_but_well_formed_input_never_panics() {
    let mut builder = SnapshotBuilder::new("https://shop.test/odd");
    builder.viewport(Viewport::new(320.0, 640.0));
    let root = builder.root("HTML");
    builder.attr(root, "lang", "  ");
    let label = builder.child(root, "button");
    builder.attr(label, "aria-labelledby", "missing other-missing");
    let heading = builder.child(root, "div");
    builder
        .attr(heading, "role", "heading")
        .attr(heading, "aria-level", "255");
    let after = builder.child(root, "h1");
    builder.attr(after, "tabindex", "not-a-number");
    let styled = builder.child(root, "p");
    builder.text(styled, "Weird colours");
    let style = builder.style(styled);
    style.color = Some("var(--brand)".into());
    style.background_color = Some("rgba(1,2,3,banana)".into());
    style.font_size_px = Some(f64::NAN);
    let zero = builder.child(root, "a");
    builder.attr(zero, "href", "#").bbox(zero, 0.0, 0.0, 0.0, 0.0);
    builder.focus_with(
        zero,
        FocusIndicator {
            outline_style: Some("auto".into()),
            outline_color: Some("currentcolor".into()),
            ..FocusIndicator::default()
        },
    );
    builder.document(f64::INFINITY, 320.0);
    let mut snapshot = builder.build();
    snapshot.focus_sequence.push(FocusStop::element(NodeId(999)));

    let twin = snapshot.clone();
    assert!(run_all(&[&snapshot, &twin]) > 0);
}

#[test]
fn identical_snapshots_produce_identical_findings() {
    let build = || {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let img = builder.child(root, "img");
        builder.attr(img, "src", "logo.png");
        let button = builder.child(root, "button");
        builder.attr(button, "tabindex", "3");
        builder.build()
    };
    let rules = builtin_rules(&default_policy().thresholds);
    let (a, b) = (build(), build());
    for rule in &rules {
        let left = rule.evaluate(&RuleInput::Page(&a));
        let right = rule.evaluate(&RuleInput::Page(&b));
        assert_eq!(left, right, "{}", rule.descriptor().key());
    }
}
