use a11y_core_types::{Principle, Severity, WcagLevel};
use a11y_snapshot_model::{ElementView, NodeId, Snapshot};
use serde::{Deserialize, Serialize};

/// Where a finding points: one element of one page, or the page as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ElementRef {
    Element {
        page: String,
        node: NodeId,
        selector: String,
    },
    Page {
        page: String,
    },
}

impl ElementRef {
    pub fn element(view: &ElementView<'_>) -> Self {
        ElementRef::Element {
            page: view.snapshot().url.clone(),
            node: view.id(),
            selector: view.selector(),
        }
    }

    pub fn page(snapshot: &Snapshot) -> Self {
        ElementRef::Page {
            page: snapshot.url.clone(),
        }
    }

    pub fn page_url(&self) -> &str {
        match self {
            ElementRef::Element { page, .. } | ElementRef::Page { page } => page,
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        match self {
            ElementRef::Element { node, .. } => Some(*node),
            ElementRef::Page { .. } => None,
        }
    }

    /// Selector string, or `"page-level"` for page findings.
    pub fn selector(&self) -> &str {
        match self {
            ElementRef::Element { selector, .. } => selector,
            ElementRef::Page { .. } => "page-level",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    Violation,
    EvaluatorError,
}

/// One detected violation, immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub criterion_id: String,
    pub rule: String,
    pub level: WcagLevel,
    pub severity: Severity,
    pub kind: FindingKind,
    pub element: ElementRef,
    pub message: String,
    pub remediation: String,
}

impl Finding {
    pub fn is_evaluator_error(&self) -> bool {
        self.kind == FindingKind::EvaluatorError
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = remediation.into();
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleScope {
    Page,
    CrossPage,
}

/// Static metadata of a rule, fixed at registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub criterion_id: String,
    pub variant: String,
    pub level: WcagLevel,
    pub severity: Severity,
    pub scope: RuleScope,
    pub title: String,
    pub remediation: String,
    pub tags: Vec<String>,
}

impl RuleDescriptor {
    pub fn new(criterion_id: &str, variant: &str, level: WcagLevel, severity: Severity) -> Self {
        let mut tags = Vec::new();
        if let Some(principle) = Principle::of_criterion(criterion_id) {
            tags.push(principle.tag().to_string());
        }
        tags.push(
            match level {
                WcagLevel::A => "wcag2a",
                WcagLevel::AA => "wcag2aa",
            }
            .to_string(),
        );
        tags.push(format!("wcag{}", criterion_id.replace('.', "")));
        tags.push(variant.to_string());
        Self {
            criterion_id: criterion_id.to_string(),
            variant: variant.to_string(),
            level,
            severity,
            scope: RuleScope::Page,
            title: String::new(),
            remediation: String::new(),
            tags,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn remediation(mut self, remediation: &str) -> Self {
        self.remediation = remediation.to_string();
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        if !self.tags.iter().any(|existing| existing == tag) {
            self.tags.push(tag.to_string());
        }
        self
    }

    pub fn cross_page(mut self) -> Self {
        self.scope = RuleScope::CrossPage;
        self.tag("cross-page")
    }

    /// Registry key, `criterion/variant`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.criterion_id, self.variant)
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.is_empty()
            || tags
                .iter()
                .any(|wanted| self.tags.iter().any(|tag| tag.eq_ignore_ascii_case(wanted)))
    }

    pub fn finding(&self, element: ElementRef, message: impl Into<String>) -> Finding {
        Finding {
            criterion_id: self.criterion_id.clone(),
            rule: self.key(),
            level: self.level,
            severity: self.severity,
            kind: FindingKind::Violation,
            element,
            message: message.into(),
            remediation: self.remediation.clone(),
        }
    }

    /// The finding substituted for a rule that failed or panicked.
    pub fn evaluator_error(&self, element: ElementRef, detail: &str) -> Finding {
        Finding {
            criterion_id: self.criterion_id.clone(),
            rule: self.key(),
            level: self.level,
            severity: self.severity,
            kind: FindingKind::EvaluatorError,
            element,
            message: format!("rule {} could not be evaluated: {detail}", self.key()),
            remediation: "Coverage for this criterion is incomplete; inspect the rule and the snapshot that triggered the failure.".to_string(),
        }
    }
}
