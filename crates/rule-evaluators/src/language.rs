//! Page language (3.1.1) and language of parts (3.1.2).

use a11y_core_types::{Severity, WcagLevel};
use a11y_rule_registry::{Findings, PageCheck, PageRule, RuleDescriptor};
use a11y_snapshot_model::Snapshot;
use once_cell::sync::Lazy;
use regex::Regex;

static LANG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Za-z]{2,4})?$").expect("language tag pattern"));

pub fn is_valid_lang(value: &str) -> bool {
    LANG_TAG.is_match(value.trim())
}

pub struct HtmlLang;

impl HtmlLang {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("3.1.1", "html-lang", WcagLevel::A, Severity::Medium)
                .title("The page must declare its language")
                .remediation("Set a valid lang attribute on the <html> element, e.g. lang=\"en\"."),
            HtmlLang,
        )
    }
}

impl PageCheck for HtmlLang {
    fn applies(&self, snapshot: &Snapshot) -> bool {
        snapshot.root().is_some()
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let Some(root) = snapshot.root() else {
            return;
        };
        let view = snapshot.view(root.id);
        match view.attr("lang").map(str::trim) {
            None | Some("") => findings.element(&view, "root element has no lang attribute"),
            Some(lang) if !is_valid_lang(lang) => {
                findings.element(&view, format!("root lang=\"{lang}\" is not a valid language tag"))
            }
            Some(_) => {}
        }
    }
}

/// `lang` overrides below the root must be well-formed too.
pub struct LangOfParts;

impl LangOfParts {
    pub fn rule() -> PageRule<Self> {
        PageRule::new(
            RuleDescriptor::new("3.1.2", "lang-of-parts", WcagLevel::AA, Severity::Low)
                .title("Language changes must use valid language tags")
                .remediation("Use a BCP 47 tag such as \"fr\" or \"pt-BR\" on passages in another language."),
            LangOfParts,
        )
    }
}

impl PageCheck for LangOfParts {
    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>) {
        let root = snapshot.root().map(|node| node.id);
        for view in snapshot.elements_matching(|view| view.has_attr("lang")) {
            if Some(view.id()) == root {
                continue;
            }
            let lang = view.attr("lang").unwrap_or_default();
            if !is_valid_lang(lang) {
                findings.element(&view, format!("lang=\"{}\" is not a valid language tag", lang.trim()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::run_page;
    use a11y_snapshot_model::SnapshotBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn language_tag_pattern() {
        for valid in ["en", "eng", "en-US", "pt-BR", "zh-Hans", " fr "] {
            assert!(is_valid_lang(valid), "{valid}");
        }
        for invalid in ["", "EN", "english", "en_US", "en-", "x-klingon", "en-US-x-private"] {
            assert!(!is_valid_lang(invalid), "{invalid}");
        }
    }

    #[test]
    fn root_without_lang_is_one_finding() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        let quote = builder.child(root, "blockquote");
        builder.attr(quote, "lang", "it");
        let snapshot = builder.build();

        let findings = run_page(&HtmlLang::rule(), &snapshot);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].criterion_id, "3.1.1");
        assert_eq!(findings[0].element.node(), Some(root));
        assert!(run_page(&LangOfParts::rule(), &snapshot).is_empty());
    }

    #[test]
    fn malformed_lang_values() {
        let mut builder = SnapshotBuilder::new("https://shop.test/");
        let root = builder.root("html");
        builder.attr(root, "lang", "English");
        let part = builder.child(root, "span");
        builder.attr(part, "lang", "");
        let snapshot = builder.build();

        let root_findings = run_page(&HtmlLang::rule(), &snapshot);
        assert_eq!(root_findings[0].message, "root lang=\"English\" is not a valid language tag");
        let parts = run_page(&LangOfParts::rule(), &snapshot);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].element.node(), Some(part));
    }
}
