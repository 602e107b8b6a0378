use a11y_core_types::LevelFilter;

use crate::model::{AuditPolicy, RulePolicy, ScopePolicy, ThresholdPolicy};

pub fn default_policy() -> AuditPolicy {
    AuditPolicy {
        rev: 1,
        scope: ScopePolicy {
            levels: LevelFilter::All,
            tags: Vec::new(),
            criteria: Vec::new(),
        },
        thresholds: ThresholdPolicy {
            contrast_normal: 4.5,
            contrast_large: 3.0,
            contrast_non_text: 3.0,
            // 18pt and 14pt at 96dpi
            large_text_px: 24.0,
            large_bold_text_px: 14.0 * 96.0 / 72.0,
            bold_weight: 700,
            reflow_width_px: 320.0,
            zoom_factor: 2.0,
            overflow_tolerance_px: 10.0,
            trap_repeat_limit: 3,
            focus_jump_tolerance_px: 200.0,
            target_min_px: 24.0,
            max_focus_presses: 80,
        },
        rules: RulePolicy::default(),
        provenance: Default::default(),
    }
}
