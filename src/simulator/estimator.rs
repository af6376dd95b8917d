//! Monte Carlo win-rate estimation.

use crate::combat::logic::simulate_outcome;
use crate::combat::types::{Outcome, StatProfile};
use crate::core::config::BalanceConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tally of a batch of silent fights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinRateEstimate {
    pub samples: u32,
    pub wins: u32,
    /// Fights that hit the turn limit. Counted as non-wins.
    pub stalemates: u32,
    /// `wins / samples`, 0 for an empty batch.
    pub win_rate: f64,
}

/// Run `samples` independent silent fights and tally the hero's wins.
///
/// Every fight draws fresh randomness from `rng`; seeding it makes the
/// estimate reproducible.
pub fn estimate(
    hero: &StatProfile,
    opponent: &StatProfile,
    samples: u32,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> WinRateEstimate {
    let mut wins = 0u32;
    let mut stalemates = 0u32;

    for _ in 0..samples {
        match simulate_outcome(hero, opponent, config, rng) {
            Outcome::HeroWon => wins += 1,
            Outcome::Stalemate => stalemates += 1,
            Outcome::OpponentWon => {}
        }
    }

    let win_rate = if samples == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(samples)
    };

    debug!(samples, wins, stalemates, win_rate, "estimated win rate");

    WinRateEstimate {
        samples,
        wins,
        stalemates,
        win_rate,
    }
}

/// Win probability in [0, 1].
pub fn estimate_win_rate(
    hero: &StatProfile,
    opponent: &StatProfile,
    samples: u32,
    config: &BalanceConfig,
    rng: &mut impl Rng,
) -> f64 {
    estimate(hero, opponent, samples, config, rng).win_rate
}
