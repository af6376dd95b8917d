use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only quest catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestDefinition {
    pub quest_id: u32,
    pub name: String,
    /// Catalog type: daily, main, enchange, event, special, newbie.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirement: Value,
    /// Loosely typed; see `rewards::parse_reward`.
    #[serde(default)]
    pub reward: Value,
    #[serde(default)]
    pub is_repeatable: bool,
}

impl QuestDefinition {
    pub fn is_daily(&self) -> bool {
        self.kind.eq_ignore_ascii_case("daily")
    }

    /// Repeatable quests become claimable again each calendar day.
    pub fn resets_daily(&self) -> bool {
        self.is_repeatable || self.is_daily()
    }

    /// Whether this quest's type matches a listing filter, synonyms included.
    /// `all` matches everything.
    pub fn matches_kind(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        if filter.is_empty() || filter == "all" {
            return true;
        }
        kind_synonyms(&filter)
            .iter()
            .any(|s| self.kind.eq_ignore_ascii_case(s))
    }
}

const ENHANCE_SYNONYMS: &[&str] = &[
    "enhance",
    "enchange",
    "enchance",
    "enhange",
    "enchant",
    "enchantment",
    "upgrade",
];

/// Spellings accepted for a quest type filter.
fn kind_synonyms(filter: &str) -> Vec<&str> {
    match filter {
        "enhance" | "enchange" => ENHANCE_SYNONYMS.to_vec(),
        "main" => vec!["main", "story"],
        "newbie" => vec!["newbie", "beginner"],
        other => vec![other],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestStatus {
    InProgress,
    Completed,
}

/// Per user and quest. `claimed` implies `Completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestProgress {
    pub status: QuestStatus,
    #[serde(default)]
    pub claimed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl QuestProgress {
    pub fn completed(at: DateTime<Utc>) -> Self {
        Self {
            status: QuestStatus::Completed,
            claimed: false,
            completed_at: Some(at),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == QuestStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quest(kind: &str) -> QuestDefinition {
        serde_json::from_value(json!({
            "questId": 1,
            "name": "Test",
            "type": kind,
            "reward": { "exp": 10 }
        }))
        .unwrap()
    }

    #[test]
    fn test_kind_filter_synonyms() {
        assert!(quest("enchange").matches_kind("enhance"));
        assert!(quest("upgrade").matches_kind("Enchange"));
        assert!(quest("story").matches_kind("main"));
        assert!(quest("Daily").matches_kind("daily"));
        assert!(quest("event").matches_kind("all"));
        assert!(quest("event").matches_kind(""));
        assert!(!quest("event").matches_kind("daily"));
    }

    #[test]
    fn test_daily_resets() {
        assert!(quest("daily").resets_daily());
        assert!(!quest("main").resets_daily());
        let mut repeatable = quest("event");
        repeatable.is_repeatable = true;
        assert!(repeatable.resets_daily());
    }
}
