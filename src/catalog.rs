//! Read-only opponent catalog records.

use crate::combat::normalize::{as_number, normalize_opponent};
use crate::combat::types::StatProfile;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opponent definition as authored, shape and all.
///
/// Stats and rewards stay untyped until the normalizer and the reward
/// parser look at them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpponentRecord(pub Value);

impl OpponentRecord {
    /// `id`, falling back to `_id`. Numbers are rendered as text.
    pub fn id(&self) -> Option<String> {
        ["id", "_id"]
            .iter()
            .find_map(|key| match self.0.get(*key)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn name(&self) -> &str {
        self.0.get("name").and_then(Value::as_str).unwrap_or("")
    }

    pub fn level(&self) -> u32 {
        self.0
            .get("level")
            .and_then(as_number)
            .map(|l| l.max(0.0) as u32)
            .unwrap_or(0)
    }

    pub fn rewards(&self) -> Option<&Value> {
        self.0.get("rewards")
    }

    pub fn profile(&self) -> StatProfile {
        normalize_opponent(&self.0)
    }
}

/// Catalog order for listings: by level, then name.
pub fn sort_by_level(opponents: &mut [OpponentRecord]) {
    opponents.sort_by(|a, b| {
        a.level()
            .cmp(&b.level())
            .then_with(|| a.name().cmp(b.name()))
    });
}
