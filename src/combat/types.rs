use crate::rewards::RewardDescriptor;
use serde::{Deserialize, Serialize};

/// Canonical combat stats of one side of a fight.
///
/// Always fully populated; see `combat::normalize` for how loose records
/// are coerced into one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatProfile {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    /// Probability in [0, 1].
    pub crit_chance: f64,
    pub crit_mult: f64,
    /// Probability in [0, 1].
    pub evade: f64,
}

impl StatProfile {
    /// Defaults for any hero stat the character record does not carry.
    pub const HERO_DEFAULTS: StatProfile = StatProfile {
        hp: 100.0,
        attack: 10.0,
        defense: 3.0,
        speed: 2.0,
        crit_chance: 0.1,
        crit_mult: 1.5,
        evade: 0.05,
    };

    /// Defaults for any opponent stat the catalog record does not carry.
    pub const OPPONENT_DEFAULTS: StatProfile = StatProfile {
        hp: 50.0,
        attack: 5.0,
        defense: 2.0,
        speed: 1.0,
        crit_chance: 0.05,
        crit_mult: 1.5,
        evade: 0.02,
    };

    /// Stand-in hero for previews and fights without a logged-in user.
    pub const OPEN_HERO: StatProfile = StatProfile {
        hp: 120.0,
        attack: 12.0,
        defense: 4.0,
        speed: 3.0,
        crit_chance: 0.1,
        crit_mult: 1.5,
        evade: 0.05,
    };
}

/// Which side of the fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Hero,
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Hero => Side::Opponent,
            Side::Opponent => Side::Hero,
        }
    }
}

/// One turn of a logged fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatEvent {
    /// 1-based.
    pub turn: u32,
    pub actor: Side,
    pub target: Side,
    pub evasion_chance: f64,
    pub evaded: bool,
    pub crit: bool,
    pub damage: u32,
    /// Clamped at 0 for display.
    pub actor_hp_remaining: f64,
    /// Clamped at 0 for display.
    pub defender_hp_remaining: f64,
}

impl CombatEvent {
    pub fn hero_hp(&self) -> f64 {
        match self.actor {
            Side::Hero => self.actor_hp_remaining,
            Side::Opponent => self.defender_hp_remaining,
        }
    }

    pub fn opponent_hp(&self) -> f64 {
        match self.actor {
            Side::Hero => self.defender_hp_remaining,
            Side::Opponent => self.actor_hp_remaining,
        }
    }
}

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    HeroWon,
    OpponentWon,
    /// Turn limit reached with both sides standing.
    Stalemate,
}

/// Result of one logged fight. Built fresh per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightResult {
    pub outcome: Outcome,
    pub hero_hp_remaining: f64,
    pub opponent_hp_remaining: f64,
    pub turns: u32,
    pub log: Vec<CombatEvent>,
    /// Set by the engine when the hero won.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards_granted: Option<RewardDescriptor>,
}

impl FightResult {
    /// `None` for a stalemate.
    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            Outcome::HeroWon => Some(Side::Hero),
            Outcome::OpponentWon => Some(Side::Opponent),
            Outcome::Stalemate => None,
        }
    }

    pub fn hero_won(&self) -> bool {
        self.outcome == Outcome::HeroWon
    }
}
