//! Quest catalog types, claims and the daily rotation.

pub mod claim;
pub mod rotation;
pub mod types;

pub use claim::{claim, eligibility, record_completion, ClaimOutcome, Eligibility};
pub use rotation::select_daily_quests;
pub use types::*;
