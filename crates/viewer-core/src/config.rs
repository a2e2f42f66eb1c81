use std::str::FromStr;

use crate::constants::*;
use crate::triggers::TriggerMap;

/// Controller tuning. Defaults come from `constants.rs`; the web layer overlays
/// `data-*` attributes found on the host element.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    /// Spin the model while the UI is idle. The minimal page variant turns this off.
    pub auto_rotate: bool,
    pub auto_rotate_deg_per_sec: f64,
    pub rotate_step_deg: f64,
    pub rotate_duration_ms: f64,
    pub idle_hide_delay_ms: f64,
    pub crossfade_ms: u32,
    pub primary_pose_keyword: String,
    pub secondary_pose_keyword: String,
    pub placement_indicator_patterns: Vec<String>,
    pub triggers: TriggerMap,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            auto_rotate_deg_per_sec: AUTO_ROTATE_DEG_PER_SEC,
            rotate_step_deg: ROTATE_STEP_DEG,
            rotate_duration_ms: ROTATE_DURATION_MS,
            idle_hide_delay_ms: IDLE_HIDE_DELAY_MS,
            crossfade_ms: CROSSFADE_MS,
            primary_pose_keyword: PRIMARY_POSE_KEYWORD.to_string(),
            secondary_pose_keyword: SECONDARY_POSE_KEYWORD.to_string(),
            placement_indicator_patterns: PLACEMENT_INDICATOR_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            triggers: TriggerMap::default(),
        }
    }
}

impl ViewerConfig {
    /// Defaults overlaid with whatever `lookup` returns for the known `data-*` attributes.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(v) = lookup("data-auto-rotate") {
            match v.trim() {
                "" | "true" | "1" | "on" => cfg.auto_rotate = true,
                "false" | "0" | "off" => cfg.auto_rotate = false,
                other => log::warn!("[init] data-auto-rotate={:?} not understood", other),
            }
        }
        let non_negative = |v: &f64| v.is_finite() && *v >= 0.0;
        overlay_number(
            &lookup,
            "data-auto-rotate-speed",
            &mut cfg.auto_rotate_deg_per_sec,
            non_negative,
        );
        overlay_number(&lookup, "data-rotate-step", &mut cfg.rotate_step_deg, non_negative);
        overlay_number(&lookup, "data-idle-delay", &mut cfg.idle_hide_delay_ms, non_negative);
        overlay_number(&lookup, "data-crossfade", &mut cfg.crossfade_ms, |_| true);
        cfg
    }
}

/// Parse `attr` into `slot`; unparsable or rejected values leave the default in place.
fn overlay_number<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    attr: &str,
    slot: &mut T,
    accept: impl Fn(&T) -> bool,
) {
    if let Some(raw) = lookup(attr) {
        match raw.trim().parse::<T>() {
            Ok(v) if accept(&v) => *slot = v,
            Ok(_) => log::warn!("[init] {}={:?} is out of range; keeping default", attr, raw),
            Err(_) => log::warn!("[init] {}={:?} is not a number; keeping default", attr, raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_override_defaults() {
        let cfg = ViewerConfig::from_attributes(|name| match name {
            "data-auto-rotate" => Some("false".into()),
            "data-idle-delay" => Some("1500".into()),
            "data-rotate-step" => Some("45".into()),
            _ => None,
        });
        assert!(!cfg.auto_rotate);
        assert_eq!(cfg.idle_hide_delay_ms, 1500.0);
        assert_eq!(cfg.rotate_step_deg, 45.0);
        assert_eq!(cfg.crossfade_ms, CROSSFADE_MS);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let cfg = ViewerConfig::from_attributes(|name| match name {
            "data-auto-rotate-speed" => Some("fast".into()),
            "data-auto-rotate" => Some("maybe".into()),
            _ => None,
        });
        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn non_finite_and_negative_values_keep_defaults() {
        for raw in ["NaN", "inf", "-inf", "-5"] {
            let cfg = ViewerConfig::from_attributes(|name| match name {
                "data-auto-rotate-speed" | "data-rotate-step" | "data-idle-delay" => {
                    Some(raw.into())
                }
                _ => None,
            });
            assert_eq!(cfg, ViewerConfig::default(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn zero_is_accepted() {
        let cfg = ViewerConfig::from_attributes(|name| match name {
            "data-auto-rotate-speed" => Some("0".into()),
            _ => None,
        });
        assert_eq!(cfg.auto_rotate_deg_per_sec, 0.0);
    }
}
