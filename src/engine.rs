//! Caller-facing operations.
//!
//! `Engine` ties the pure combat, reward and rotation code to a
//! `LedgerStore`. Everything that writes goes through one store
//! transaction per call, so a fight's settlement or a quest claim either
//! lands completely or not at all.
//!
//! Randomness is injected per call: pass a seed for a reproducible run, or
//! `None` to draw from system entropy.

use crate::catalog::{sort_by_level, OpponentRecord};
use crate::combat::logic::resolve_logged;
use crate::combat::normalize::normalize_hero;
use crate::combat::types::{FightResult, StatProfile};
use crate::core::config::BalanceConfig;
use crate::error::{EngineError, Result};
use crate::ledger::classes::find_class;
use crate::ledger::settlement::settle;
use crate::ledger::types::{ProgressionRecord, SettlementReport, UserId};
use crate::quests::claim::{claim, record_completion, ClaimOutcome};
use crate::quests::rotation;
use crate::quests::types::QuestDefinition;
use crate::rewards::{parse_reward, RewardDescriptor};
use crate::simulator::{estimate, BattlePreview, CombatCalc};
use crate::store::LedgerStore;
use chrono::{DateTime, NaiveDate, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of a real fight and whatever it paid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightReport {
    pub result: FightResult,
    /// Zero unless the hero won.
    pub rewards: RewardDescriptor,
    pub settlement: Option<SettlementReport>,
}

/// Seeded RNG for reproducible runs, entropy otherwise.
pub fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub struct Engine<S> {
    store: S,
    config: BalanceConfig,
}

impl<S: LedgerStore> Engine<S> {
    /// Engine with default balance settings.
    pub fn new(store: S) -> Self {
        Self::with_config(store, BalanceConfig::default())
    }

    pub fn with_config(store: S, config: BalanceConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    fn opponent(&self, opponent_id: &str) -> Result<OpponentRecord> {
        self.store
            .opponent(opponent_id)?
            .ok_or_else(|| EngineError::OpponentNotFound(opponent_id.to_string()))
    }

    fn quest(&self, quest_id: u32) -> Result<QuestDefinition> {
        self.store
            .quest(quest_id)?
            .ok_or(EngineError::QuestNotFound(quest_id))
    }

    /// The user's character as a combat profile.
    pub fn hero_profile(&self, user_id: &UserId) -> Result<StatProfile> {
        let character = self
            .store
            .character(user_id)?
            .ok_or_else(|| EngineError::CharacterNotFound(user_id.clone()))?;
        Ok(normalize_hero(&serde_json::to_value(&character)?))
    }

    /// Probability that `hero` beats the opponent, from silent fights.
    pub fn estimate_win_rate(
        &self,
        hero: &StatProfile,
        opponent_id: &str,
        sample_count: Option<u32>,
        seed: Option<u64>,
    ) -> Result<f64> {
        let opponent = self.opponent(opponent_id)?.profile();
        let samples = sample_count.unwrap_or(self.config.sample_count);
        let mut rng = rng_for(seed);
        Ok(estimate(hero, &opponent, samples, &self.config, &mut rng).win_rate)
    }

    /// Battle preview for the user's own character.
    pub fn preview(&self, user_id: &UserId, opponent_id: &str, seed: Option<u64>) -> Result<BattlePreview> {
        let hero = self.hero_profile(user_id)?;
        self.preview_for(hero, opponent_id, seed)
    }

    /// Battle preview for the stock hero. Needs no account.
    pub fn preview_open(&self, opponent_id: &str, seed: Option<u64>) -> Result<BattlePreview> {
        self.preview_for(StatProfile::OPEN_HERO, opponent_id, seed)
    }

    fn preview_for(&self, hero: StatProfile, opponent_id: &str, seed: Option<u64>) -> Result<BattlePreview> {
        let record = self.opponent(opponent_id)?;
        let opponent = record.profile();
        let mut rng = rng_for(seed);
        let tally = estimate(&hero, &opponent, self.config.sample_count, &self.config, &mut rng);
        let reward = parse_reward(record.rewards());

        Ok(BattlePreview {
            win_rate: tally.win_rate,
            samples: tally.samples,
            expected: reward.expected(tally.win_rate),
            calc: CombatCalc::new(&hero, &opponent, &self.config),
            hero,
            opponent,
        })
    }

    /// Logged fight against a catalog opponent. Nothing is persisted.
    pub fn resolve_fight(&self, hero: &StatProfile, opponent_id: &str, seed: Option<u64>) -> Result<FightResult> {
        let record = self.opponent(opponent_id)?;
        let mut rng = rng_for(seed);
        let mut result = resolve_logged(hero, &record.profile(), &self.config, &mut rng);
        if result.hero_won() {
            result.rewards_granted = Some(parse_reward(record.rewards()));
        }
        Ok(result)
    }

    /// Fight with the user's character and settle the opponent's reward on a win.
    pub fn fight(&self, user_id: &UserId, opponent_id: &str, seed: Option<u64>) -> Result<FightReport> {
        let hero = self.hero_profile(user_id)?;
        let result = self.resolve_fight(&hero, opponent_id, seed)?;

        info!(
            user = %user_id,
            opponent = opponent_id,
            outcome = ?result.outcome,
            turns = result.turns,
            "fight resolved"
        );

        let Some(rewards) = result.rewards_granted.clone() else {
            return Ok(FightReport {
                result,
                rewards: RewardDescriptor::default(),
                settlement: None,
            });
        };

        let settlement = self.settle_reward(user_id, &rewards)?;
        Ok(FightReport {
            result,
            rewards,
            settlement: Some(settlement),
        })
    }

    /// Credit `reward` to the user in one transaction.
    pub fn settle_reward(&self, user_id: &UserId, reward: &RewardDescriptor) -> Result<SettlementReport> {
        self.store
            .transact(user_id, |txn| Ok(settle(txn, reward, &self.config)))
    }

    /// Mark a quest completed for the user at `now`.
    ///
    /// Returns whether anything changed. A repeatable quest completed on an
    /// earlier day is re-opened for claiming.
    pub fn complete_quest(&self, user_id: &UserId, quest_id: u32, now: DateTime<Utc>) -> Result<bool> {
        let quest = self.quest(quest_id)?;
        let changed = self
            .store
            .transact(user_id, |txn| Ok(record_completion(txn, &quest, now)))?;
        if changed {
            info!(user = %user_id, quest_id, "quest completed");
        }
        Ok(changed)
    }

    /// Claim a completed quest's reward, exactly once per eligibility window.
    pub fn claim_quest(&self, user_id: &UserId, quest_id: u32, now: DateTime<Utc>) -> Result<ClaimOutcome> {
        let quest = self.quest(quest_id)?;
        let reward = parse_reward(Some(&quest.reward));
        let outcome = self
            .store
            .transact(user_id, |txn| Ok(claim(txn, &quest, &reward, now, &self.config)))?;
        if !outcome.claimed() {
            info!(user = %user_id, quest_id, outcome = ?outcome, "claim rejected");
        }
        Ok(outcome)
    }

    /// Today's daily quests for everyone.
    pub fn select_daily_quests(&self, date: NaiveDate) -> Result<Vec<QuestDefinition>> {
        let daily: Vec<QuestDefinition> = self
            .store
            .quests()?
            .into_iter()
            .filter(QuestDefinition::is_daily)
            .collect();
        Ok(rotation::select_daily_quests(&daily, date))
    }

    /// Catalog quests of a type, by quest id. `None` or `"all"` lists everything.
    pub fn list_quests(&self, kind: Option<&str>) -> Result<Vec<QuestDefinition>> {
        let mut quests: Vec<QuestDefinition> = self
            .store
            .quests()?
            .into_iter()
            .filter(|q| kind.map_or(true, |k| q.matches_kind(k)))
            .collect();
        quests.sort_by_key(|q| q.quest_id);
        Ok(quests)
    }

    /// Quests the user has completed, claimed or not.
    pub fn list_completed_quests(&self, user_id: &UserId) -> Result<Vec<QuestDefinition>> {
        let progress = self.store.quest_progress(user_id)?;
        let mut quests: Vec<QuestDefinition> = self
            .store
            .quests()?
            .into_iter()
            .filter(|q| progress.get(&q.quest_id).is_some_and(|p| p.is_completed()))
            .collect();
        quests.sort_by_key(|q| q.quest_id);
        Ok(quests)
    }

    /// Opponent catalog by level, then name.
    pub fn list_opponents(&self) -> Result<Vec<OpponentRecord>> {
        let mut opponents = self.store.opponents()?;
        sort_by_level(&mut opponents);
        Ok(opponents)
    }

    /// Create the user's character from a starting class.
    pub fn select_class(&self, user_id: &UserId, class_name: &str) -> Result<ProgressionRecord> {
        let class = find_class(class_name).ok_or_else(|| EngineError::UnknownClass(class_name.to_string()))?;
        let record = self.store.transact(user_id, |txn| {
            if txn.character.is_some() {
                return Err(EngineError::CharacterExists(user_id.clone()));
            }
            let record = ProgressionRecord::new(class.name, class.starting_stats());
            *txn.character = Some(record.clone());
            Ok(record)
        })?;
        info!(user = %user_id, class = class.name, "character created");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::AccountRecord;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn engine() -> (Engine<MemoryStore>, UserId) {
        let store = MemoryStore::new();
        let user = UserId::from("u1");
        store.insert_account(user.clone(), AccountRecord::default());
        store.insert_opponent(OpponentRecord(json!({
            "id": "slime",
            "name": "Slime",
            "level": 1,
            "stats": { "hp": 50, "attack": 5, "defense": 2, "speed": 1, "critChance": 0.05, "evade": 0.02 },
            "rewards": { "exp": 40, "gold": 15 }
        })));
        (Engine::new(store), user)
    }

    #[test]
    fn test_unknown_opponent() {
        let (engine, _) = engine();
        let err = engine
            .estimate_win_rate(&StatProfile::HERO_DEFAULTS, "dragon", Some(10), Some(1))
            .unwrap_err();
        assert!(matches!(err, EngineError::OpponentNotFound(id) if id == "dragon"));
    }

    #[test]
    fn test_preview_needs_character() {
        let (engine, user) = engine();
        assert!(matches!(
            engine.preview(&user, "slime", Some(1)),
            Err(EngineError::CharacterNotFound(_))
        ));
        assert!(engine.preview_open("slime", Some(1)).is_ok());
    }

    #[test]
    fn test_select_class_once() {
        let (engine, user) = engine();
        let record = engine.select_class(&user, "archer").unwrap();
        assert_eq!(record.class, "Archer");
        assert_eq!(record.level, 1);
        assert!(matches!(
            engine.select_class(&user, "Mage"),
            Err(EngineError::CharacterExists(_))
        ));
        assert!(matches!(
            engine.select_class(&UserId::from("u2"), "Bard"),
            Err(EngineError::UnknownClass(_))
        ));
    }

    #[test]
    fn test_hero_profile_from_character_stats() {
        let (engine, user) = engine();
        engine.select_class(&user, "Tanker").unwrap();
        let hero = engine.hero_profile(&user).unwrap();
        assert_eq!(hero.hp, 90.0);
        assert_eq!(hero.attack, 50.0);
        assert_eq!(hero.defense, 80.0);
        assert_eq!(hero.speed, 30.0);
        assert_eq!(hero.crit_mult, StatProfile::HERO_DEFAULTS.crit_mult);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let (engine, _) = engine();
        let hero = StatProfile::HERO_DEFAULTS;
        let a = engine.estimate_win_rate(&hero, "slime", Some(200), Some(9)).unwrap();
        let b = engine.estimate_win_rate(&hero, "slime", Some(200), Some(9)).unwrap();
        assert_eq!(a, b);

        let f1 = engine.resolve_fight(&hero, "slime", Some(4)).unwrap();
        let f2 = engine.resolve_fight(&hero, "slime", Some(4)).unwrap();
        assert_eq!(f1, f2);
    }
}
