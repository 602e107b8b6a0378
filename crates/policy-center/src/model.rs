use std::collections::BTreeMap;

use a11y_core_types::{LevelFilter, WcagLevel};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuditPolicy {
    pub rev: u64,
    pub scope: ScopePolicy,
    pub thresholds: ThresholdPolicy,
    pub rules: RulePolicy,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provenance: BTreeMap<String, PolicyProvenance>,
}

/// Which rules a run covers.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct ScopePolicy {
    pub levels: LevelFilter,
    /// Any-of match against rule tags; empty admits every rule.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Criterion ids such as `"1.4.3"`; empty admits every criterion.
    #[serde(default)]
    pub criteria: Vec<String>,
}

impl ScopePolicy {
    pub fn admits_level(&self, level: WcagLevel) -> bool {
        self.levels.admits(level)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ThresholdPolicy {
    pub contrast_normal: f64,
    pub contrast_large: f64,
    pub contrast_non_text: f64,
    pub large_text_px: f64,
    pub large_bold_text_px: f64,
    pub bold_weight: u16,
    pub reflow_width_px: f64,
    pub zoom_factor: f64,
    pub overflow_tolerance_px: f64,
    pub trap_repeat_limit: usize,
    pub focus_jump_tolerance_px: f64,
    pub target_min_px: f64,
    pub max_focus_presses: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct RulePolicy {
    /// Rule keys in `criterion/variant` form.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl RulePolicy {
    pub fn is_disabled(&self, key: &str) -> bool {
        self.disabled.iter().any(|entry| entry == key)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PolicyProvenance {
    pub path: String,
    pub source: PolicySource,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PolicySource {
    Builtin,
    File,
    Env,
    Override,
}

impl AuditPolicy {
    pub fn set_provenance(&mut self, path: &str, source: PolicySource) {
        self.provenance.insert(
            path.to_string(),
            PolicyProvenance {
                path: path.to_string(),
                source,
            },
        );
    }

    pub fn source_of(&self, path: &str) -> Option<PolicySource> {
        self.provenance.get(path).map(|entry| entry.source)
    }
}
