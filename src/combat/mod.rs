//! Combat system types and logic.

pub mod logic;
pub mod normalize;
pub mod types;

pub use logic::{first_actor, hero_wins, resolve_logged, simulate_outcome};
pub use normalize::{normalize_hero, normalize_opponent, normalize_profile};
pub use types::*;
