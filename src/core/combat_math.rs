//! Shared combat math for the resolver, the estimator and the preview.
//!
//! These pure functions calculate combat outcomes without side effects.
//! Silent and logged fights both go through them, so estimator statistics
//! always match real fights.

use super::config::BalanceConfig;
use crate::combat::types::StatProfile;
use rand::Rng;

/// Clamp a probability into [0, 1]. NaN becomes 0.
pub fn clamp01(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Bernoulli trial with probability `p` (clamped into [0, 1]).
pub fn bernoulli(p: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < clamp01(p)
}

/// Chance that `defender` evades a hit from `attacker`.
///
/// `clamp(base + clamp((def.speed - atk.speed) * coef, 0, cap), 0, min(max_evade, 1))`
pub fn evade_chance(defender: &StatProfile, attacker: &StatProfile, config: &BalanceConfig) -> f64 {
    let speed_bonus = ((defender.speed - attacker.speed) * config.speed_evade_coef)
        .min(config.speed_evade_cap)
        .max(0.0);
    let total = defender.evade + speed_bonus;
    if total.is_nan() {
        return 0.0;
    }
    clamp01(total.min(config.max_evade))
}

/// Damage of one landed hit. Never below 1.
///
/// `max(1, floor(attack * (crit ? crit_mult : 1) - defense * defense_reduction))`
pub fn hit_damage(
    attacker: &StatProfile,
    defender: &StatProfile,
    is_crit: bool,
    config: &BalanceConfig,
) -> u32 {
    let mult = if is_crit { attacker.crit_mult } else { 1.0 };
    let raw = attacker.attack * mult - defender.defense * config.defense_reduction;
    let floored = raw.floor();
    if floored.is_nan() || floored < 1.0 {
        1
    } else if floored >= u32::MAX as f64 {
        u32::MAX
    } else {
        floored as u32
    }
}

/// Result of one attack attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub evade_chance: f64,
    pub evaded: bool,
    pub crit: bool,
    /// 0 when evaded.
    pub damage: u32,
}

/// Roll one attack: evasion first, then crit, then damage.
pub fn roll_strike(
    attacker: &StatProfile,
    defender: &StatProfile,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> Strike {
    let evade_chance = evade_chance(defender, attacker, config);
    if bernoulli(evade_chance, rng) {
        return Strike {
            evade_chance,
            evaded: true,
            crit: false,
            damage: 0,
        };
    }
    let crit = bernoulli(attacker.crit_chance, rng);
    Strike {
        evade_chance,
        evaded: false,
        crit,
        damage: hit_damage(attacker, defender, crit, config),
    }
}
