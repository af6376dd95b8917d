//! Battle preview: win rate plus the numbers behind it.

use crate::combat::types::StatProfile;
use crate::core::combat_math::{evade_chance, hit_damage};
use crate::core::config::BalanceConfig;
use crate::rewards::ExpectedReward;
use serde::{Deserialize, Serialize};

pub const DAMAGE_FORMULA: &str =
    "damage = max(1, floor(attack * (crit ? critMult : 1) - defense * defenseReduction))";
pub const EVADE_FORMULA: &str = "evade = clamp(baseEvade + clamp((defSpeed - atkSpeed) * speedEvadeCoef, 0, speedEvadeCap), 0, maxEvade)";

/// One-shot numbers for a single attack direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeSample {
    pub evade: f64,
    pub non_crit_damage: u32,
    pub crit_damage: u32,
}

impl StrikeSample {
    pub fn between(attacker: &StatProfile, defender: &StatProfile, config: &BalanceConfig) -> Self {
        Self {
            evade: evade_chance(defender, attacker, config),
            non_crit_damage: hit_damage(attacker, defender, false, config),
            crit_damage: hit_damage(attacker, defender, true, config),
        }
    }
}

/// Constants, formulas and illustrative one-shot calculations for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatCalc {
    pub defense_reduction: f64,
    pub speed_evade_coef: f64,
    pub speed_evade_cap: f64,
    pub max_evade: f64,
    pub damage_formula: String,
    pub evade_formula: String,
    pub hero_to_opponent: StrikeSample,
    pub opponent_to_hero: StrikeSample,
}

impl CombatCalc {
    pub fn new(hero: &StatProfile, opponent: &StatProfile, config: &BalanceConfig) -> Self {
        Self {
            defense_reduction: config.defense_reduction,
            speed_evade_coef: config.speed_evade_coef,
            speed_evade_cap: config.speed_evade_cap,
            max_evade: config.max_evade,
            damage_formula: DAMAGE_FORMULA.to_string(),
            evade_formula: EVADE_FORMULA.to_string(),
            hero_to_opponent: StrikeSample::between(hero, opponent, config),
            opponent_to_hero: StrikeSample::between(opponent, hero, config),
        }
    }
}

/// Everything a client needs before committing to a fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlePreview {
    pub win_rate: f64,
    pub samples: u32,
    pub expected: ExpectedReward,
    pub hero: StatProfile,
    pub opponent: StatProfile,
    pub calc: CombatCalc,
}
