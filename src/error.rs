//! Engine error taxonomy.
//!
//! Malformed reward data never shows up here: the reward parser is total.
//! An already-claimed quest is an expected outcome (`ClaimOutcome`), not an error.

use crate::ledger::types::UserId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("opponent {0} not found")]
    OpponentNotFound(String),
    #[error("no character for user {0}")]
    CharacterNotFound(UserId),
    #[error("no account for user {0}")]
    AccountNotFound(UserId),
    #[error("quest {0} not found")]
    QuestNotFound(u32),
    #[error("user {0} already has a character")]
    CharacterExists(UserId),
    #[error("unknown character class {0:?}")]
    UnknownClass(String),
    #[error("failed to read store from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write store to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse store: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
