//! Balance defaults shared by the resolver, estimator and ledger.
//!
//! Every value here can be overridden through `BalanceConfig`.

// =============================================================================
// COMBAT FORMULAS
// =============================================================================

/// Damage removed per point of defender defense.
pub const DEFENSE_REDUCTION: f64 = 0.5;

/// Extra evasion per point of speed the defender has over the attacker.
pub const SPEED_EVADE_COEF: f64 = 0.01;

/// Cap on the evasion bonus coming from speed.
pub const SPEED_EVADE_CAP: f64 = 0.2;

/// Hard cap on total evasion chance.
pub const MAX_EVADE: f64 = 0.6;

/// Safety bound on turns per fight. Reaching it is a stalemate.
pub const TURN_LIMIT: u32 = 1000;

/// Silent fights run per win-rate estimate.
pub const SAMPLE_COUNT: u32 = 300;

// =============================================================================
// LEVELING
// =============================================================================

/// Experience needed for each level-up. Flat, not a curve.
pub const EXP_PER_LEVEL: u64 = 100;

/// Stat growth applied on every level-up: (hp, speed, damage, armor).
pub const LEVEL_UP_GROWTH: (u32, u32, u32, u32) = (10, 1, 5, 2);

// =============================================================================
// DAILY ROTATION
// =============================================================================

/// Daily quests shown per calendar day.
pub const DAILY_QUEST_COUNT: usize = 10;

pub const ROTATION_QUEST_MULTIPLIER: u64 = 9301;
pub const ROTATION_SEED_MULTIPLIER: u64 = 49297;
pub const ROTATION_MODULUS: u64 = 233_280;

/// Name fragment identifying the always-available login quest.
pub const LOGIN_QUEST_PATTERN: &str = "login";
