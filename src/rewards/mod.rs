//! Reward descriptors and their parser.

pub mod parser;
pub mod types;

pub use parser::{parse_reward, parse_text};
pub use types::*;
