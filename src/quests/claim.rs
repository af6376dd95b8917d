//! Quest completion and the exactly-once claim protocol.
//!
//! Both run inside a store transaction, so the eligibility check, the
//! `claimed` flip and the settlement commit together or not at all.

use super::types::{QuestDefinition, QuestProgress};
use crate::core::config::BalanceConfig;
use crate::ledger::settlement::settle;
use crate::ledger::types::SettlementReport;
use crate::rewards::RewardDescriptor;
use crate::store::LedgerTxn;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of a claim request. Only `Claimed` moves any balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum ClaimOutcome {
    Claimed(SettlementReport),
    AlreadyClaimed,
    NotCompleted,
    /// Repeatable quest last completed on an earlier day.
    Stale,
}

impl ClaimOutcome {
    pub fn claimed(&self) -> bool {
        matches!(self, ClaimOutcome::Claimed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    AlreadyClaimed,
    NotCompleted,
    Stale,
}

/// Can `progress` be claimed on `today`?
pub fn eligibility(
    quest: &QuestDefinition,
    progress: Option<&QuestProgress>,
    today: NaiveDate,
) -> Eligibility {
    let Some(progress) = progress.filter(|p| p.is_completed()) else {
        return Eligibility::NotCompleted;
    };
    if quest.resets_daily() {
        let completed_today = progress
            .completed_at
            .is_some_and(|at| at.date_naive() == today);
        if !completed_today {
            return Eligibility::Stale;
        }
    }
    if progress.claimed {
        Eligibility::AlreadyClaimed
    } else {
        Eligibility::Eligible
    }
}

/// Record a completion at `now`.
///
/// A repeatable quest last completed on an earlier day starts a fresh,
/// unclaimed window. Anything else already completed is left untouched.
/// Returns whether the record changed.
pub fn record_completion(txn: &mut LedgerTxn<'_>, quest: &QuestDefinition, now: DateTime<Utc>) -> bool {
    let today = now.date_naive();
    match txn.progress.get_mut(&quest.quest_id) {
        Some(existing) if existing.is_completed() => {
            let earlier_day = existing
                .completed_at
                .map_or(true, |at| at.date_naive() < today);
            if quest.resets_daily() && earlier_day {
                *existing = QuestProgress::completed(now);
                true
            } else {
                false
            }
        }
        Some(existing) => {
            *existing = QuestProgress::completed(now);
            true
        }
        None => {
            txn.progress.insert(quest.quest_id, QuestProgress::completed(now));
            true
        }
    }
}

/// Check, flip and settle in one step.
pub fn claim(
    txn: &mut LedgerTxn<'_>,
    quest: &QuestDefinition,
    reward: &RewardDescriptor,
    now: DateTime<Utc>,
    config: &BalanceConfig,
) -> ClaimOutcome {
    let verdict = eligibility(quest, txn.progress.get(&quest.quest_id), now.date_naive());
    match verdict {
        Eligibility::Eligible => {}
        Eligibility::AlreadyClaimed => return ClaimOutcome::AlreadyClaimed,
        Eligibility::NotCompleted => return ClaimOutcome::NotCompleted,
        Eligibility::Stale => return ClaimOutcome::Stale,
    }

    if let Some(progress) = txn.progress.get_mut(&quest.quest_id) {
        progress.claimed = true;
    }
    let report = settle(txn, reward, config);
    info!(
        user = %txn.user_id,
        quest_id = quest.quest_id,
        exp = report.applied.exp,
        gold = report.applied.gold,
        "quest reward claimed"
    );
    ClaimOutcome::Claimed(report)
}
