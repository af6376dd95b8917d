use super::{LedgerStore, LedgerTxn, StoreSnapshot};
use crate::catalog::OpponentRecord;
use crate::error::{EngineError, Result};
use crate::ledger::types::{AccountRecord, ProgressionRecord, UserId};
use crate::quests::types::{QuestDefinition, QuestProgress};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-process store. One lock guards everything, and transactions work on
/// copies that are written back only on success.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            state: Mutex::new(snapshot),
        }
    }

    /// Copy of the full state.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().clone()
    }

    pub fn insert_account(&self, user_id: UserId, account: AccountRecord) {
        self.lock().accounts.insert(user_id, account);
    }

    pub fn insert_character(&self, user_id: UserId, character: ProgressionRecord) {
        self.lock().characters.insert(user_id, character);
    }

    pub fn insert_opponent(&self, opponent: OpponentRecord) {
        self.lock().opponents.push(opponent);
    }

    /// Insert or replace by quest id.
    pub fn upsert_quest(&self, quest: QuestDefinition) {
        let mut state = self.lock();
        match state.quests.iter_mut().find(|q| q.quest_id == quest.quest_id) {
            Some(existing) => *existing = quest,
            None => state.quests.push(quest),
        }
    }

    /// Remove a character, as if deleted elsewhere.
    pub fn remove_character(&self, user_id: &UserId) -> Option<ProgressionRecord> {
        self.lock().characters.remove(user_id)
    }

    /// Like `transact`, but hands the committed state to `on_commit` while
    /// still holding the lock.
    pub(crate) fn transact_then<T, F, C>(&self, user_id: &UserId, f: F, on_commit: C) -> Result<T>
    where
        F: FnOnce(&mut LedgerTxn<'_>) -> Result<T>,
        C: FnOnce(&StoreSnapshot) -> Result<()>,
    {
        let mut state = self.lock();

        let mut account = state
            .accounts
            .get(user_id)
            .cloned()
            .ok_or_else(|| EngineError::AccountNotFound(user_id.clone()))?;
        let mut character = state.characters.get(user_id).cloned();
        let mut progress = state.progress.get(user_id).cloned().unwrap_or_default();

        let value = f(&mut LedgerTxn {
            user_id,
            account: &mut account,
            character: &mut character,
            progress: &mut progress,
        })?;

        let prev_account = state.accounts.insert(user_id.clone(), account);
        let prev_character = match character {
            Some(character) => state.characters.insert(user_id.clone(), character),
            None => state.characters.remove(user_id),
        };
        let prev_progress = if progress.is_empty() {
            state.progress.remove(user_id)
        } else {
            state.progress.insert(user_id.clone(), progress)
        };

        if let Err(e) = on_commit(&state) {
            restore(&mut state.accounts, user_id, prev_account);
            restore(&mut state.characters, user_id, prev_character);
            restore(&mut state.progress, user_id, prev_progress);
            return Err(e);
        }
        Ok(value)
    }

    fn lock(&self) -> MutexGuard<'_, StoreSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Put back the entry a failed commit replaced.
fn restore<V>(map: &mut BTreeMap<UserId, V>, user_id: &UserId, previous: Option<V>) {
    match previous {
        Some(value) => map.insert(user_id.clone(), value),
        None => map.remove(user_id),
    };
}

impl LedgerStore for MemoryStore {
    fn opponent(&self, id: &str) -> Result<Option<OpponentRecord>> {
        Ok(self
            .lock()
            .opponents
            .iter()
            .find(|o| o.id().as_deref() == Some(id))
            .cloned())
    }

    fn opponents(&self) -> Result<Vec<OpponentRecord>> {
        Ok(self.lock().opponents.clone())
    }

    fn quest(&self, quest_id: u32) -> Result<Option<QuestDefinition>> {
        Ok(self
            .lock()
            .quests
            .iter()
            .find(|q| q.quest_id == quest_id)
            .cloned())
    }

    fn quests(&self) -> Result<Vec<QuestDefinition>> {
        Ok(self.lock().quests.clone())
    }

    fn account(&self, user_id: &UserId) -> Result<Option<AccountRecord>> {
        Ok(self.lock().accounts.get(user_id).cloned())
    }

    fn character(&self, user_id: &UserId) -> Result<Option<ProgressionRecord>> {
        Ok(self.lock().characters.get(user_id).cloned())
    }

    fn quest_progress(&self, user_id: &UserId) -> Result<BTreeMap<u32, QuestProgress>> {
        Ok(self.lock().progress.get(user_id).cloned().unwrap_or_default())
    }

    fn transact<T, F>(&self, user_id: &UserId, f: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerTxn<'_>) -> Result<T>,
    {
        self.transact_then(user_id, f, |_| Ok(()))
    }
}
