//! Win-rate estimation for battle previews.
//!
//! Runs many silent fights through the same resolver real fights use,
//! so the displayed odds match actual gameplay.

mod estimator;
mod preview;

pub use estimator::{estimate, estimate_win_rate, WinRateEstimate};
pub use preview::{BattlePreview, CombatCalc, StrikeSample, DAMAGE_FORMULA, EVADE_FORMULA};
