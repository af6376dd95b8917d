//! Persistence seam.
//!
//! The engine reads snapshots and writes through `LedgerStore::transact`.
//! A transaction sees one user's account, character and quest progress,
//! and its changes are committed together only if the closure succeeds.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::catalog::OpponentRecord;
use crate::error::Result;
use crate::ledger::types::{AccountRecord, ProgressionRecord, UserId};
use crate::quests::types::{QuestDefinition, QuestProgress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mutable view of one user's records inside a transaction.
#[derive(Debug)]
pub struct LedgerTxn<'a> {
    pub user_id: &'a UserId,
    pub account: &'a mut AccountRecord,
    /// `None` until a class is selected.
    pub character: &'a mut Option<ProgressionRecord>,
    /// Keyed by quest id.
    pub progress: &'a mut BTreeMap<u32, QuestProgress>,
}

/// Everything a store holds, in its on-disk JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    pub accounts: BTreeMap<UserId, AccountRecord>,
    pub characters: BTreeMap<UserId, ProgressionRecord>,
    pub progress: BTreeMap<UserId, BTreeMap<u32, QuestProgress>>,
    pub opponents: Vec<OpponentRecord>,
    pub quests: Vec<QuestDefinition>,
}

pub trait LedgerStore {
    fn opponent(&self, id: &str) -> Result<Option<OpponentRecord>>;

    fn opponents(&self) -> Result<Vec<OpponentRecord>>;

    fn quest(&self, quest_id: u32) -> Result<Option<QuestDefinition>>;

    fn quests(&self) -> Result<Vec<QuestDefinition>>;

    fn account(&self, user_id: &UserId) -> Result<Option<AccountRecord>>;

    fn character(&self, user_id: &UserId) -> Result<Option<ProgressionRecord>>;

    fn quest_progress(&self, user_id: &UserId) -> Result<BTreeMap<u32, QuestProgress>>;

    /// Run `f` against the user's records as one atomic unit.
    ///
    /// Concurrent transactions for the same store are serialized. Fails with
    /// `AccountNotFound` when the user has no account.
    fn transact<T, F>(&self, user_id: &UserId, f: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerTxn<'_>) -> Result<T>;
}
