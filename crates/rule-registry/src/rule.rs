use a11y_snapshot_model::{ElementView, Snapshot};

use crate::errors::RuleError;
use crate::model::{ElementRef, Finding, RuleDescriptor, RuleScope};

/// What a rule evaluates: one page, or every page of a run in visitation order.
#[derive(Clone, Copy, Debug)]
pub enum RuleInput<'a> {
    Page(&'a Snapshot),
    Pages(&'a [&'a Snapshot]),
}

impl<'a> RuleInput<'a> {
    pub fn page(&self) -> Option<&'a Snapshot> {
        match self {
            RuleInput::Page(snapshot) => Some(*snapshot),
            RuleInput::Pages(_) => None,
        }
    }

    pub fn pages(&self) -> Option<&'a [&'a Snapshot]> {
        match self {
            RuleInput::Pages(pages) => Some(*pages),
            RuleInput::Page(_) => None,
        }
    }

    pub fn scope(&self) -> RuleScope {
        match self {
            RuleInput::Page(_) => RuleScope::Page,
            RuleInput::Pages(_) => RuleScope::CrossPage,
        }
    }

    /// Page the failure of a rule is attributed to.
    pub fn anchor(&self) -> ElementRef {
        match self {
            RuleInput::Page(snapshot) => ElementRef::page(snapshot),
            RuleInput::Pages(pages) => match pages.first() {
                Some(first) => ElementRef::page(first),
                None => ElementRef::Page {
                    page: String::new(),
                },
            },
        }
    }
}

/// A registered unit of audit logic. Implementations hold no mutable state.
pub trait Rule: Send + Sync {
    fn descriptor(&self) -> &RuleDescriptor;

    fn applies_to(&self, input: &RuleInput<'_>) -> bool {
        input.scope() == self.descriptor().scope
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RuleError>;
}

/// Collects findings for one rule while it walks a snapshot.
pub struct Findings<'a> {
    descriptor: &'a RuleDescriptor,
    items: Vec<Finding>,
}

impl<'a> Findings<'a> {
    pub fn new(descriptor: &'a RuleDescriptor) -> Self {
        Self {
            descriptor,
            items: Vec::new(),
        }
    }

    pub fn element(&mut self, view: &ElementView<'_>, message: impl Into<String>) {
        self.items
            .push(self.descriptor.finding(ElementRef::element(view), message));
    }

    pub fn element_with(
        &mut self,
        view: &ElementView<'_>,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) {
        self.items.push(
            self.descriptor
                .finding(ElementRef::element(view), message)
                .with_remediation(remediation),
        );
    }

    pub fn page(&mut self, snapshot: &Snapshot, message: impl Into<String>) {
        self.items
            .push(self.descriptor.finding(ElementRef::page(snapshot), message));
    }

    pub fn page_with(
        &mut self,
        snapshot: &Snapshot,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) {
        self.items.push(
            self.descriptor
                .finding(ElementRef::page(snapshot), message)
                .with_remediation(remediation),
        );
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.items
    }
}

/// Single-page evaluation logic, wrapped into a [`Rule`] by [`PageRule`].
pub trait PageCheck: Send + Sync {
    fn applies(&self, _snapshot: &Snapshot) -> bool {
        true
    }

    fn check(&self, snapshot: &Snapshot, findings: &mut Findings<'_>);
}

/// Multi-page evaluation logic, wrapped into a [`Rule`] by [`SiteRule`].
pub trait SiteCheck: Send + Sync {
    fn applies(&self, pages: &[&Snapshot]) -> bool {
        pages.len() >= 2
    }

    fn check(&self, pages: &[&Snapshot], findings: &mut Findings<'_>);
}

pub struct PageRule<C> {
    descriptor: RuleDescriptor,
    check: C,
}

impl<C: PageCheck> PageRule<C> {
    pub fn new(descriptor: RuleDescriptor, check: C) -> Self {
        Self { descriptor, check }
    }
}

impl<C: PageCheck> Rule for PageRule<C> {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    fn applies_to(&self, input: &RuleInput<'_>) -> bool {
        input.page().map_or(false, |snapshot| self.check.applies(snapshot))
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RuleError> {
        let snapshot = input.page().ok_or_else(|| {
            RuleError::InputMismatch(format!("{} expects a single page", self.descriptor.key()))
        })?;
        let mut findings = Findings::new(&self.descriptor);
        self.check.check(snapshot, &mut findings);
        Ok(findings.into_vec())
    }
}

pub struct SiteRule<C> {
    descriptor: RuleDescriptor,
    check: C,
}

impl<C: SiteCheck> SiteRule<C> {
    /// Forces the descriptor to cross-page scope.
    pub fn new(descriptor: RuleDescriptor, check: C) -> Self {
        let descriptor = if descriptor.scope == RuleScope::CrossPage {
            descriptor
        } else {
            descriptor.cross_page()
        };
        Self { descriptor, check }
    }
}

impl<C: SiteCheck> Rule for SiteRule<C> {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    fn applies_to(&self, input: &RuleInput<'_>) -> bool {
        input.pages().map_or(false, |pages| self.check.applies(pages))
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Result<Vec<Finding>, RuleError> {
        let pages = input.pages().ok_or_else(|| {
            RuleError::InputMismatch(format!("{} expects multiple pages", self.descriptor.key()))
        })?;
        let mut findings = Findings::new(&self.descriptor);
        self.check.check(pages, &mut findings);
        Ok(findings.into_vec())
    }
}
