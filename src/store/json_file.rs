use super::memory::MemoryStore;
use super::{LedgerStore, LedgerTxn, StoreSnapshot};
use crate::catalog::OpponentRecord;
use crate::error::{EngineError, Result};
use crate::ledger::types::{AccountRecord, ProgressionRecord, UserId};
use crate::quests::types::{QuestDefinition, QuestProgress};
use crate::utils::persistence::{data_path, read_json_or_default, write_json};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const STORE_FILE: &str = "store.json";

/// A `MemoryStore` backed by one JSON document.
///
/// The file is rewritten after every committed transaction. If the write
/// fails, the in-memory commit is undone and the error returned.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Load from `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot: StoreSnapshot = read_json_or_default(&path)?;
        debug!(
            path = %path.display(),
            accounts = snapshot.accounts.len(),
            opponents = snapshot.opponents.len(),
            quests = snapshot.quests.len(),
            "opened store"
        );
        Ok(Self {
            path,
            inner: MemoryStore::from_snapshot(snapshot),
        })
    }

    /// Open ~/.skirmish/store.json.
    pub fn open_default() -> Result<Self> {
        let path = data_path(STORE_FILE).map_err(|source| EngineError::Read {
            path: PathBuf::from(STORE_FILE),
            source,
        })?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Direct access for seeding accounts and catalogs. Changes made here
    /// reach disk on the next `save` or committed transaction.
    pub fn memory(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn save(&self) -> Result<()> {
        write_json(&self.path, &self.inner.snapshot())
    }
}

impl LedgerStore for JsonFileStore {
    fn opponent(&self, id: &str) -> Result<Option<OpponentRecord>> {
        self.inner.opponent(id)
    }

    fn opponents(&self) -> Result<Vec<OpponentRecord>> {
        self.inner.opponents()
    }

    fn quest(&self, quest_id: u32) -> Result<Option<QuestDefinition>> {
        self.inner.quest(quest_id)
    }

    fn quests(&self) -> Result<Vec<QuestDefinition>> {
        self.inner.quests()
    }

    fn account(&self, user_id: &UserId) -> Result<Option<AccountRecord>> {
        self.inner.account(user_id)
    }

    fn character(&self, user_id: &UserId) -> Result<Option<ProgressionRecord>> {
        self.inner.character(user_id)
    }

    fn quest_progress(&self, user_id: &UserId) -> Result<BTreeMap<u32, QuestProgress>> {
        self.inner.quest_progress(user_id)
    }

    fn transact<T, F>(&self, user_id: &UserId, f: F) -> Result<T>
    where
        F: FnOnce(&mut LedgerTxn<'_>) -> Result<T>,
    {
        self.inner
            .transact_then(user_id, f, |state| write_json(&self.path, state))
    }
}
