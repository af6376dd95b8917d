//! Level-up cascade.

use super::types::{CharacterStats, ProgressionRecord};
use crate::core::constants::LEVEL_UP_GROWTH;

/// Applies experience to the character and processes any level-ups.
/// Returns the number of levels gained.
///
/// A single grant can cross several thresholds; every crossed level takes
/// its growth, and `exp` ends below `exp_per_level`.
pub fn apply_exp(record: &mut ProgressionRecord, exp: u64, exp_per_level: u64) -> u32 {
    record.level = record.level.max(1);
    let total = record.exp.saturating_add(exp);

    if exp_per_level == 0 {
        record.exp = total;
        return 0;
    }

    let levels = u32::try_from(total / exp_per_level).unwrap_or(u32::MAX);
    record.exp = total % exp_per_level;
    record.level = record.level.saturating_add(levels);
    grow_stats(&mut record.stats, levels);
    levels
}

/// Per-level stat growth, `levels` times over.
pub fn grow_stats(stats: &mut CharacterStats, levels: u32) {
    let (hp, speed, damage, armor) = LEVEL_UP_GROWTH;
    stats.hp = stats.hp.saturating_add(hp.saturating_mul(levels));
    stats.speed = stats.speed.saturating_add(speed.saturating_mul(levels));
    stats.damage = stats.damage.saturating_add(damage.saturating_mul(levels));
    stats.armor = stats.armor.saturating_add(armor.saturating_mul(levels));
}
