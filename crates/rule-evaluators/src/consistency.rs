//! Cross-page rules: consistent navigation (3.2.3) and consistent identification (3.2.4).
//!
//! Pages arrive in visitation order and the first page is the baseline every later page is
//! compared with.

use std::collections::{HashMap, HashSet};

use a11y_core_types::{Severity, WcagLevel};
use a11y_rule_registry::{Findings, RuleDescriptor, SiteCheck, SiteRule};
use a11y_snapshot_model::{ElementView, Snapshot};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::landmarks::{first_landmark, is_navigation};

static VARIABLE_FIGURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$€£¥]?\d+(?:[.,]\d+)*%?").expect("variable figure pattern")
});

/// Collapses whitespace, lowercases and replaces prices and counts with `#`.
pub fn normalize_label(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    VARIABLE_FIGURE
        .replace_all(&collapsed, "#")
        .trim()
        .to_lowercase()
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct NavLink {
    text: String,
    href: String,
}

/// Links inside navigation landmarks, in document order, first occurrence of each pair only.
fn navigation_links(snapshot: &Snapshot) -> Vec<NavLink> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for view in snapshot.elements_matching(|view| view.is_link()) {
        if view.is_hidden() || view.closest(|ancestor| is_navigation(ancestor)).is_none() {
            continue;
        }
        let text = view
            .accessible_name()
            .text()
            .map(|name| name.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        let link = NavLink {
            text,
            href: view.attr("href").unwrap_or_default().trim().to_string(),
        };
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }
    links
}

fn common_order<'a>(links: &'a [NavLink], common: &HashSet<&NavLink>) -> Vec<&'a NavLink> {
    links.iter().filter(|link| common.contains(link)).collect()
}

fn labels(links: &[&NavLink]) -> String {
    links
        .iter()
        .map(|link| link.text.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct ConsistentNavigation;

impl ConsistentNavigation {
    pub fn rule() -> SiteRule<Self> {
        SiteRule::new(
            RuleDescriptor::new("3.2.3", "consistent-navigation", WcagLevel::AA, Severity::Medium)
                .title("Repeated navigation must keep the same order")
                .remediation("Render shared navigation from one component so links appear in the same relative order on every page."),
            ConsistentNavigation,
        )
    }
}

impl SiteCheck for ConsistentNavigation {
    fn check(&self, pages: &[&Snapshot], findings: &mut Findings<'_>) {
        let Some((baseline, rest)) = pages.split_first() else {
            return;
        };
        let baseline_links = navigation_links(baseline);
        for page in rest {
            let page_links = navigation_links(page);
            let present: HashSet<&NavLink> = page_links.iter().collect();
            let common: HashSet<&NavLink> = baseline_links
                .iter()
                .filter(|link| present.contains(link))
                .collect();
            if common.len() < 2 {
                continue;
            }
            let expected = common_order(&baseline_links, &common);
            let actual = common_order(&page_links, &common);
            if expected == actual {
                continue;
            }
            let message = format!(
                "navigation order differs from {}: expected [{}], found [{}]",
                baseline.url,
                labels(&expected),
                labels(&actual)
            );
            match first_landmark(page, is_navigation) {
                Some(nav) => findings.element(&nav, message),
                None => findings.page(page, message),
            }
        }
    }
}

/// Key identifying "the same component" across pages: role plus id or test id.
fn component_key(view: &ElementView<'_>) -> Option<(String, String)> {
    if !(view.is_interactive() || view.explicit_role().is_some()) {
        return None;
    }
    let key = view
        .attr("data-testid")
        .or_else(|| view.attr("id"))
        .map(str::trim)
        .filter(|key| !key.is_empty())?;
    let role = view.role().unwrap_or_else(|| view.tag().to_string());
    Some((role, key.to_string()))
}

pub struct ConsistentIdentification;

impl ConsistentIdentification {
    pub fn rule() -> SiteRule<Self> {
        SiteRule::new(
            RuleDescriptor::new("3.2.4", "consistent-identification", WcagLevel::AA, Severity::Medium)
                .title("Components with the same function must be labelled consistently")
                .remediation("Use the same accessible name for the component on every page; keep changing figures out of the label or in a separate element."),
            ConsistentIdentification,
        )
    }
}

impl SiteCheck for ConsistentIdentification {
    fn check(&self, pages: &[&Snapshot], findings: &mut Findings<'_>) {
        // key -> (normalized label, raw label, url of the page that set it)
        let mut baseline: HashMap<(String, String), (String, String, String)> = HashMap::new();
        for page in pages {
            let mut seen_here = HashSet::new();
            for view in page.views() {
                if view.is_hidden() {
                    continue;
                }
                let Some(key) = component_key(&view) else {
                    continue;
                };
                if !seen_here.insert(key.clone()) {
                    continue;
                }
                let raw = view
                    .accessible_name()
                    .text()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string();
                let normalized = normalize_label(&raw);
                match baseline.get(&key) {
                    None => {
                        baseline.insert(key, (normalized, raw, page.url.clone()));
                    }
                    Some((expected, expected_raw, origin)) if *expected != normalized => {
                        findings.element(
                            &view,
                            format!(
                                "{} \"{}\" is labelled \"{raw}\" here but \"{expected_raw}\" on {origin}",
                                key.0, key.1
                            ),
                        );
                    }
                    Some(_) => {}
                }
            }
        }
    }
}
