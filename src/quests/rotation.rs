//! Daily quest rotation.
//!
//! Every caller on the same calendar day sees the same daily quests, and
//! the set moves on the next day. No state is kept: the date alone seeds
//! the pick.

use super::types::QuestDefinition;
use crate::core::constants::{
    DAILY_QUEST_COUNT, LOGIN_QUEST_PATTERN, ROTATION_MODULUS, ROTATION_QUEST_MULTIPLIER,
    ROTATION_SEED_MULTIPLIER,
};
use chrono::NaiveDate;
use tracing::debug;

/// Sum of the character codes of the date as `YYYY-MM-DD`.
pub fn date_seed(date: NaiveDate) -> u64 {
    date.format("%Y-%m-%d")
        .to_string()
        .chars()
        .map(u64::from)
        .sum()
}

/// Deterministic per-day score of one quest. Lower sorts first.
pub fn rotation_score(quest_id: u32, seed: u64) -> u64 {
    (u64::from(quest_id) * ROTATION_QUEST_MULTIPLIER + seed * ROTATION_SEED_MULTIPLIER)
        % ROTATION_MODULUS
}

fn is_login_quest(quest: &QuestDefinition) -> bool {
    quest.name.to_lowercase().contains(LOGIN_QUEST_PATTERN)
}

/// Pick today's daily quests from `all_daily`.
///
/// Quests are ordered by score (ties by quest id) and the first
/// `DAILY_QUEST_COUNT` are kept. If a login quest exists but was not picked,
/// it takes the last slot.
pub fn select_daily_quests(all_daily: &[QuestDefinition], date: NaiveDate) -> Vec<QuestDefinition> {
    let seed = date_seed(date);
    let mut scored: Vec<(u64, &QuestDefinition)> = all_daily
        .iter()
        .map(|q| (rotation_score(q.quest_id, seed), q))
        .collect();
    scored.sort_by_key(|(score, q)| (*score, q.quest_id));

    let mut picked: Vec<QuestDefinition> = scored
        .iter()
        .take(DAILY_QUEST_COUNT)
        .map(|(_, q)| (*q).clone())
        .collect();

    let login_picked = picked.iter().any(is_login_quest);
    if !login_picked {
        let best_login = scored.iter().map(|(_, q)| *q).find(|q| is_login_quest(q));
        if let (Some(login), Some(last)) = (best_login, picked.last_mut()) {
            debug!(quest_id = login.quest_id, "forcing login quest into daily rotation");
            *last = login.clone();
        }
    }

    debug!(
        date = %date,
        seed,
        total = all_daily.len(),
        picked = picked.len(),
        "selected daily quests"
    );
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quest(id: u32, name: &str) -> QuestDefinition {
        serde_json::from_value(json!({
            "questId": id,
            "name": name,
            "type": "daily",
            "reward": "EXP +20, Coin +10",
            "isRepeatable": true
        }))
        .unwrap()
    }

    fn catalog(n: u32) -> Vec<QuestDefinition> {
        (1..=n).map(|id| quest(id, &format!("Daily Task {}", id))).collect()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_seed_sums_char_codes() {
        // "2024-01-01": digits 2,0,2,4,0,1,0,1 plus two '-' (45)
        let expected: u64 = "2024-01-01".chars().map(|c| c as u64).sum();
        assert_eq!(date_seed(day(2024, 1, 1)), expected);
        assert_eq!(expected, 8 * 48 + 10 + 2 * 45);
    }

    #[test]
    fn test_rotation_score_formula() {
        assert_eq!(rotation_score(1, 0), 9301);
        assert_eq!(rotation_score(0, 1), 49297);
        assert_eq!(rotation_score(30, 0), (30 * 9301) % 233_280);
    }

    #[test]
    fn test_small_catalog_returns_everything() {
        let picked = select_daily_quests(&catalog(4), day(2024, 5, 5));
        assert_eq!(picked.len(), 4);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(select_daily_quests(&[], day(2024, 5, 5)).is_empty());
    }

    #[test]
    fn test_picks_ten_sorted_by_score() {
        let date = day(2024, 5, 5);
        let seed = date_seed(date);
        let picked = select_daily_quests(&catalog(40), date);
        assert_eq!(picked.len(), 10);
        let scores: Vec<u64> = picked
            .iter()
            .map(|q| rotation_score(q.quest_id, seed))
            .collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_login_quest_forced_into_last_slot() {
        let date = day(2024, 5, 5);
        let seed = date_seed(date);
        let mut all = catalog(40);
        // Find the worst-scoring id and make it the login quest.
        let worst = all
            .iter()
            .max_by_key(|q| rotation_score(q.quest_id, seed))
            .map(|q| q.quest_id)
            .unwrap();
        let idx = all.iter().position(|q| q.quest_id == worst).unwrap();
        all[idx].name = "Daily Login".to_string();

        let picked = select_daily_quests(&all, date);
        assert_eq!(picked.len(), 10);
        assert_eq!(picked.last().unwrap().quest_id, worst);
        assert_eq!(picked.iter().filter(|q| q.quest_id == worst).count(), 1);
    }
}
