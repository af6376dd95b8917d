//! Balance configuration.

use super::constants::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tunable knobs for combat, estimation and leveling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceConfig {
    /// Damage removed per point of defense
    pub defense_reduction: f64,

    /// Evasion gained per point of speed advantage
    pub speed_evade_coef: f64,

    /// Cap on the speed-derived evasion bonus
    pub speed_evade_cap: f64,

    /// Hard cap on total evasion
    pub max_evade: f64,

    /// Fights per win-rate estimate
    pub sample_count: u32,

    /// Experience per level
    pub exp_per_level: u64,

    /// Turns before a fight is called a stalemate
    pub turn_limit: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            defense_reduction: DEFENSE_REDUCTION,
            speed_evade_coef: SPEED_EVADE_COEF,
            speed_evade_cap: SPEED_EVADE_CAP,
            max_evade: MAX_EVADE,
            sample_count: SAMPLE_COUNT,
            exp_per_level: EXP_PER_LEVEL,
            turn_limit: TURN_LIMIT,
        }
    }
}

impl BalanceConfig {
    /// Defaults overridden by `DEFENSE_REDUCTION`, `SPEED_EVADE_COEF`,
    /// `SPEED_EVADE_CAP`, `MAX_EVADE`, `BATTLE_SAMPLES`, `EXP_PER_LEVEL`
    /// and `TURN_LIMIT` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            defense_reduction: read_ratio(&lookup, "DEFENSE_REDUCTION", defaults.defense_reduction),
            speed_evade_coef: read_ratio(&lookup, "SPEED_EVADE_COEF", defaults.speed_evade_coef),
            speed_evade_cap: read_probability(&lookup, "SPEED_EVADE_CAP", defaults.speed_evade_cap),
            max_evade: read_probability(&lookup, "MAX_EVADE", defaults.max_evade),
            sample_count: read_positive(&lookup, "BATTLE_SAMPLES", defaults.sample_count),
            exp_per_level: read_positive(&lookup, "EXP_PER_LEVEL", defaults.exp_per_level),
            turn_limit: read_positive(&lookup, "TURN_LIMIT", defaults.turn_limit),
        }
    }

    /// Quick config for deterministic tests with a smaller estimator budget.
    pub fn quick(sample_count: u32) -> Self {
        Self {
            sample_count,
            ..Default::default()
        }
    }
}

fn read_ratio(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            warn!(key, value = %raw, "ignoring invalid balance override");
            default
        }
    }
}

/// A ratio that is also a probability, so at most 1.
fn read_probability(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if (0.0..=1.0).contains(&v) => v,
        _ => {
            warn!(key, value = %raw, "ignoring invalid balance override");
            default
        }
    }
}

fn read_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + PartialOrd + Default + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) if v > T::default() => v,
        _ => {
            warn!(key, value = %raw, "ignoring invalid balance override");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = BalanceConfig::default();
        assert_eq!(config.defense_reduction, 0.5);
        assert_eq!(config.speed_evade_coef, 0.01);
        assert_eq!(config.speed_evade_cap, 0.2);
        assert_eq!(config.max_evade, 0.6);
        assert_eq!(config.sample_count, 300);
        assert_eq!(config.exp_per_level, 100);
        assert_eq!(config.turn_limit, 1000);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = BalanceConfig::from_lookup(lookup_from(&[
            ("DEFENSE_REDUCTION", "0.75"),
            ("BATTLE_SAMPLES", "1000"),
            ("TURN_LIMIT", "50"),
        ]));
        assert_eq!(config.defense_reduction, 0.75);
        assert_eq!(config.sample_count, 1000);
        assert_eq!(config.turn_limit, 50);
        assert_eq!(config.max_evade, MAX_EVADE);
    }

    #[test]
    fn test_invalid_overrides_fall_back() {
        let config = BalanceConfig::from_lookup(lookup_from(&[
            ("MAX_EVADE", "lots"),
            ("BATTLE_SAMPLES", "0"),
            ("EXP_PER_LEVEL", "-5"),
            ("SPEED_EVADE_COEF", "-0.1"),
        ]));
        assert_eq!(config, BalanceConfig::default());
    }

    #[test]
    fn test_probability_overrides_above_one_fall_back() {
        let config = BalanceConfig::from_lookup(lookup_from(&[
            ("MAX_EVADE", "1.5"),
            ("SPEED_EVADE_CAP", "2"),
        ]));
        assert_eq!(config.max_evade, MAX_EVADE);
        assert_eq!(config.speed_evade_cap, SPEED_EVADE_CAP);

        let config = BalanceConfig::from_lookup(lookup_from(&[("MAX_EVADE", "1")]));
        assert_eq!(config.max_evade, 1.0);
    }

    #[test]
    fn test_quick_keeps_formula_constants() {
        let config = BalanceConfig::quick(25);
        assert_eq!(config.sample_count, 25);
        assert_eq!(config.defense_reduction, DEFENSE_REDUCTION);
    }
}
