use std::collections::HashSet;
use std::sync::Arc;

use a11y_core_types::LevelFilter;
use a11y_policy_center::AuditPolicy;
use tracing::debug;

use crate::errors::RegistryError;
use crate::rule::Rule;

/// Level, tag and criterion filters applied when selecting rules for a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSelection {
    pub levels: LevelFilter,
    pub tags: Vec<String>,
    pub criteria: Vec<String>,
    pub disabled: Vec<String>,
}

impl RuleSelection {
    pub fn levels(levels: LevelFilter) -> Self {
        Self {
            levels,
            ..Self::default()
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|tag| tag.to_string()).collect();
        self
    }

    pub fn with_criteria(mut self, criteria: &[&str]) -> Self {
        self.criteria = criteria.iter().map(|c| c.to_string()).collect();
        self
    }

    fn admits(&self, rule: &dyn Rule) -> bool {
        let descriptor = rule.descriptor();
        self.levels.admits(descriptor.level)
            && descriptor.has_any_tag(&self.tags)
            && (self.criteria.is_empty()
                || self
                    .criteria
                    .iter()
                    .any(|criterion| criterion == &descriptor.criterion_id))
            && !self.disabled.iter().any(|key| *key == descriptor.key())
    }
}

impl From<&AuditPolicy> for RuleSelection {
    fn from(policy: &AuditPolicy) -> Self {
        Self {
            levels: policy.scope.levels,
            tags: policy.scope.tags.clone(),
            criteria: policy.scope.criteria.clone(),
            disabled: policy.rules.disabled.clone(),
        }
    }
}

/// Append-only rule list; iteration follows registration order.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
    keys: HashSet<String>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<R>(&mut self, rule: R) -> Result<(), RegistryError>
    where
        R: Rule + 'static,
    {
        self.register_arc(Arc::new(rule))
    }

    pub fn register_arc(&mut self, rule: Arc<dyn Rule>) -> Result<(), RegistryError> {
        let descriptor = rule.descriptor();
        let key = descriptor.key();
        if self.keys.contains(&key) {
            return Err(RegistryError::DuplicateRule {
                criterion_id: descriptor.criterion_id.clone(),
                variant: descriptor.variant.clone(),
            });
        }
        debug!(rule = %key, level = %descriptor.level, "rule registered");
        self.keys.insert(key);
        self.rules.push(rule);
        Ok(())
    }

    pub fn register_all<I>(&mut self, rules: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn Rule>>,
    {
        for rule in rules {
            self.register_arc(rule)?;
        }
        Ok(())
    }

    /// Registered rules matching `levels` and any of `tags`, in registration order.
    pub fn rules_for(&self, levels: LevelFilter, tags: &[String]) -> Vec<Arc<dyn Rule>> {
        let selection = RuleSelection {
            levels,
            tags: tags.to_vec(),
            ..RuleSelection::default()
        };
        self.select(&selection)
    }

    pub fn select(&self, selection: &RuleSelection) -> Vec<Arc<dyn Rule>> {
        self.rules
            .iter()
            .filter(|rule| selection.admits(rule.as_ref()))
            .cloned()
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.rules.iter().map(|rule| rule.descriptor().key()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
