use a11y_core_types::LevelFilter;
use serde_json::Value;
use tracing::debug;

use crate::errors::PolicyError;
use crate::model::{AuditPolicy, PolicySource};

/// Programmatic override of one dotted policy path; bumps the revision when anything changed.
pub fn apply_override(
    policy: &mut AuditPolicy,
    path: &str,
    value: &Value,
) -> Result<bool, PolicyError> {
    let changed = apply_override_to_policy(policy, path, value, PolicySource::Override)?;
    if changed {
        policy.rev = policy.rev.saturating_add(1);
        debug!(path, rev = policy.rev, "policy override applied");
    }
    Ok(changed)
}

pub(crate) fn apply_override_to_policy(
    policy: &mut AuditPolicy,
    path: &str,
    value: &Value,
    source: PolicySource,
) -> Result<bool, PolicyError> {
    let thresholds = &mut policy.thresholds;
    let changed = match path {
        "scope.levels" => merge(&mut policy.scope.levels, to_level_filter(value)?),
        "scope.tags" => merge(&mut policy.scope.tags, to_string_list(value)?),
        "scope.criteria" => merge(&mut policy.scope.criteria, to_string_list(value)?),
        "rules.disabled" => merge(&mut policy.rules.disabled, to_string_list(value)?),
        "thresholds.contrast_normal" => merge(&mut thresholds.contrast_normal, to_ratio(value)?),
        "thresholds.contrast_large" => merge(&mut thresholds.contrast_large, to_ratio(value)?),
        "thresholds.contrast_non_text" => {
            merge(&mut thresholds.contrast_non_text, to_ratio(value)?)
        }
        "thresholds.large_text_px" => merge(&mut thresholds.large_text_px, to_f64(value)?),
        "thresholds.large_bold_text_px" => {
            merge(&mut thresholds.large_bold_text_px, to_f64(value)?)
        }
        "thresholds.bold_weight" => merge(&mut thresholds.bold_weight, to_u16(value)?),
        "thresholds.reflow_width_px" => merge(&mut thresholds.reflow_width_px, to_f64(value)?),
        "thresholds.zoom_factor" => merge(&mut thresholds.zoom_factor, to_f64(value)?),
        "thresholds.overflow_tolerance_px" => {
            merge(&mut thresholds.overflow_tolerance_px, to_f64(value)?)
        }
        "thresholds.trap_repeat_limit" => {
            merge(&mut thresholds.trap_repeat_limit, to_usize(value)?)
        }
        "thresholds.focus_jump_tolerance_px" => {
            merge(&mut thresholds.focus_jump_tolerance_px, to_f64(value)?)
        }
        "thresholds.target_min_px" => merge(&mut thresholds.target_min_px, to_f64(value)?),
        "thresholds.max_focus_presses" => {
            merge(&mut thresholds.max_focus_presses, to_usize(value)?)
        }
        path => return Err(PolicyError::UnsupportedPath(path.to_string())),
    };
    if changed {
        policy.set_provenance(path, source);
    }
    Ok(changed)
}

fn merge<T: PartialEq>(target: &mut T, candidate: T) -> bool {
    if *target == candidate {
        return false;
    }
    *target = candidate;
    true
}

fn to_f64(value: &Value) -> Result<f64, PolicyError> {
    let parsed = match value {
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };
    parsed
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected non-negative number, got {value}")))
}

fn to_ratio(value: &Value) -> Result<f64, PolicyError> {
    let ratio = to_f64(value)?;
    if (1.0..=21.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(PolicyError::InvalidValue(format!(
            "contrast ratio {ratio} outside 1..=21"
        )))
    }
}

fn to_usize(value: &Value) -> Result<usize, PolicyError> {
    value
        .as_u64()
        .map(|v| v as usize)
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected integer, got {value}")))
}

fn to_u16(value: &Value) -> Result<u16, PolicyError> {
    value
        .as_u64()
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected integer, got {value}")))
        .and_then(|v| {
            u16::try_from(v).map_err(|_| PolicyError::InvalidValue(format!("value {v} exceeds u16")))
        })
}

fn to_level_filter(value: &Value) -> Result<LevelFilter, PolicyError> {
    value
        .as_str()
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected level string, got {value}")))?
        .parse::<LevelFilter>()
        .map_err(|err| PolicyError::InvalidValue(err.to_string()))
}

fn to_string_list(value: &Value) -> Result<Vec<String>, PolicyError> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|s| s.trim().to_string())
                    .ok_or_else(|| PolicyError::InvalidValue(format!("expected string, got {item}")))
            })
            .collect(),
        Value::String(raw) => Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(PolicyError::InvalidValue(format!(
            "expected list of strings, got {other}"
        ))),
    }
}
