//! Wallets, character progression and reward settlement.

pub mod classes;
pub mod progression;
pub mod settlement;
pub mod types;

pub use classes::{find_class, ClassDef, CLASSES};
pub use progression::{apply_exp, grow_stats};
pub use settlement::settle;
pub use types::*;
