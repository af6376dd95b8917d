//! Reward settlement.
//!
//! Credits the wallet and applies experience, both against the same
//! transaction. Users without a character get their experience on the
//! account's legacy `exp` field instead; that path is logged.

use super::progression::apply_exp;
use super::types::{AppliedReward, ExpTarget, SettlementReport};
use crate::core::config::BalanceConfig;
use crate::rewards::RewardDescriptor;
use crate::store::LedgerTxn;
use tracing::{info, warn};

/// Apply `reward` to the user's wallet and progression.
///
/// Balances only ever go up. Runs inside the caller's transaction, so a
/// failure anywhere else in it discards this credit too.
pub fn settle(
    txn: &mut LedgerTxn<'_>,
    reward: &RewardDescriptor,
    config: &BalanceConfig,
) -> SettlementReport {
    let wallet = &mut txn.account.wallet;
    wallet.gold = wallet.gold.saturating_add(reward.currency_minor);
    wallet.gems = wallet.gems.saturating_add(reward.gems);

    let (exp_target, levels_gained) = match txn.character.as_mut() {
        Some(character) => {
            let levels = apply_exp(character, reward.exp, config.exp_per_level);
            (ExpTarget::Character, levels)
        }
        None => {
            if reward.exp > 0 {
                warn!(
                    user = %txn.user_id,
                    exp = reward.exp,
                    "no character, crediting experience to the account"
                );
            }
            txn.account.legacy_exp = txn.account.legacy_exp.saturating_add(reward.exp);
            (ExpTarget::LegacyAccount, 0)
        }
    };

    let report = SettlementReport {
        applied: AppliedReward {
            exp: reward.exp,
            gold: reward.currency_minor,
            gems: reward.gems,
        },
        exp_target,
        levels_gained,
        wallet: txn.account.wallet,
        progression: txn.character.clone(),
        legacy_exp: txn.account.legacy_exp,
    };

    info!(
        user = %txn.user_id,
        exp = reward.exp,
        gold = reward.currency_minor,
        gems = reward.gems,
        levels_gained,
        "settled reward"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{AccountRecord, CharacterStats, ProgressionRecord, UserId};
    use std::collections::BTreeMap;

    fn reward(exp: u64, gold: u64, gems: u64) -> RewardDescriptor {
        RewardDescriptor {
            exp,
            currency_minor: gold,
            gems,
            ..Default::default()
        }
    }

    fn tanker() -> ProgressionRecord {
        ProgressionRecord::new(
            "Tanker",
            CharacterStats {
                hp: 90,
                speed: 30,
                damage: 50,
                armor: 80,
                buff: None,
            },
        )
    }

    #[test]
    fn test_settle_with_character() {
        let user = UserId::from("u1");
        let mut account = AccountRecord::default();
        let mut character = Some(tanker());
        let mut progress = BTreeMap::new();
        let mut txn = LedgerTxn {
            user_id: &user,
            account: &mut account,
            character: &mut character,
            progress: &mut progress,
        };

        let report = settle(&mut txn, &reward(250, 40, 3), &BalanceConfig::default());
        assert_eq!(report.exp_target, ExpTarget::Character);
        assert_eq!(report.levels_gained, 2);
        assert_eq!(report.wallet.gold, 40);
        assert_eq!(report.wallet.gems, 3);
        let progression = report.progression.unwrap();
        assert_eq!(progression.level, 3);
        assert_eq!(progression.exp, 50);
        assert_eq!(account.legacy_exp, 0);
    }

    #[test]
    fn test_settle_without_character_uses_legacy_exp() {
        let user = UserId::from("u2");
        let mut account = AccountRecord {
            legacy_exp: 5,
            ..Default::default()
        };
        let mut character = None;
        let mut progress = BTreeMap::new();
        let mut txn = LedgerTxn {
            user_id: &user,
            account: &mut account,
            character: &mut character,
            progress: &mut progress,
        };

        let report = settle(&mut txn, &reward(30, 7, 0), &BalanceConfig::default());
        assert_eq!(report.exp_target, ExpTarget::LegacyAccount);
        assert_eq!(report.legacy_exp, 35);
        assert_eq!(report.wallet.gold, 7);
        assert!(report.progression.is_none());
    }
}
