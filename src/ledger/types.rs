use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable user identifier supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Account balances. Only ever credited by settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletRecord {
    pub gold: u64,
    pub gems: u64,
}

/// Account aggregate as far as this engine cares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    #[serde(default)]
    pub username: String,
    #[serde(flatten)]
    pub wallet: WalletRecord,
    /// Experience credited to users who have no character yet.
    #[serde(default, rename = "exp")]
    pub legacy_exp: u64,
}

/// Character stats that grow with level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub hp: u32,
    pub speed: u32,
    pub damage: u32,
    pub armor: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buff: Option<String>,
}

/// Character aggregate: level, experience and stats.
///
/// After settlement `exp` is always below the per-level threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    #[serde(default)]
    pub class: String,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub exp: u64,
    pub stats: CharacterStats,
}

fn first_level() -> u32 {
    1
}

impl ProgressionRecord {
    pub fn new(class: impl Into<String>, stats: CharacterStats) -> Self {
        Self {
            class: class.into(),
            level: 1,
            exp: 0,
            stats,
        }
    }
}

/// Where a settlement's experience went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpTarget {
    Character,
    /// No character: credited to `AccountRecord::legacy_exp`.
    LegacyAccount,
}

/// Amounts actually written by one settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedReward {
    pub exp: u64,
    pub gold: u64,
    pub gems: u64,
}

/// Post-settlement snapshot for caller display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    pub applied: AppliedReward,
    pub exp_target: ExpTarget,
    pub levels_gained: u32,
    pub wallet: WalletRecord,
    pub progression: Option<ProgressionRecord>,
    pub legacy_exp: u64,
}
