//! Skirmish - combat simulation and reward settlement engine
//!
//! Resolves turn-based fights between a hero and a catalog opponent,
//! estimates win rates by sampling, and settles rewards into wallets,
//! character progression and quest claims.

pub mod build_info;
pub mod catalog;
pub mod combat;
pub mod core;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod quests;
pub mod rewards;
pub mod simulator;
pub mod store;
pub mod utils;

pub use engine::{rng_for, Engine, FightReport};
pub use error::{EngineError, Result};
