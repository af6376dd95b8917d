//! Balance constants, configuration and shared combat math.

pub mod combat_math;
pub mod config;
pub mod constants;

pub use config::BalanceConfig;
