//! Coerces loosely shaped combatant records into a `StatProfile`.
//!
//! Catalog opponents and stored characters disagree on field names and
//! nesting. All of that is resolved here and nowhere else: for each field
//! the nested `stats` object wins, then top-level synonyms, then the side's
//! default. Key matching ignores ASCII case, so `hp` also finds `HP`.
//!
//! Characters store offense and defense as `damage` and `armor` (the fields
//! level-ups grow), so heroes look those up before `attack` and `defense`.

use super::types::StatProfile;
use crate::core::combat_math::clamp01;
use serde_json::{Map, Value};

const HP_KEYS: &[&str] = &["hp", "health"];
const ATTACK_KEYS: &[&str] = &["attack", "atk", "damage"];
const DEFENSE_KEYS: &[&str] = &["defense", "def", "armor"];
const HERO_ATTACK_KEYS: &[&str] = &["damage", "attack", "atk"];
const HERO_DEFENSE_KEYS: &[&str] = &["armor", "defense", "def"];
const SPEED_KEYS: &[&str] = &["speed", "spd", "agi"];
const CRIT_CHANCE_KEYS: &[&str] = &["critChance", "crit"];
const CRIT_MULT_KEYS: &[&str] = &["critMult"];
const EVADE_KEYS: &[&str] = &["evade", "dodge"];

/// Normalize a hero (character) record.
pub fn normalize_hero(record: &Value) -> StatProfile {
    normalize_with(
        record,
        &StatProfile::HERO_DEFAULTS,
        HERO_ATTACK_KEYS,
        HERO_DEFENSE_KEYS,
    )
}

/// Normalize an opponent catalog record.
pub fn normalize_opponent(record: &Value) -> StatProfile {
    normalize_profile(record, &StatProfile::OPPONENT_DEFAULTS)
}

/// Normalize any record against the given defaults. Never fails.
pub fn normalize_profile(record: &Value, defaults: &StatProfile) -> StatProfile {
    normalize_with(record, defaults, ATTACK_KEYS, DEFENSE_KEYS)
}

fn normalize_with(
    record: &Value,
    defaults: &StatProfile,
    attack_keys: &[&str],
    defense_keys: &[&str],
) -> StatProfile {
    let top = record.as_object();
    let nested = top.and_then(|obj| lookup(obj, "stats")).and_then(Value::as_object);
    let field = |keys: &[&str], default: f64| resolve(nested, top, keys).unwrap_or(default);

    StatProfile {
        hp: non_negative(field(HP_KEYS, defaults.hp)),
        attack: non_negative(field(attack_keys, defaults.attack)),
        defense: non_negative(field(defense_keys, defaults.defense)),
        speed: non_negative(field(SPEED_KEYS, defaults.speed)),
        crit_chance: clamp01(field(CRIT_CHANCE_KEYS, defaults.crit_chance)),
        crit_mult: non_negative(field(CRIT_MULT_KEYS, defaults.crit_mult)),
        evade: clamp01(field(EVADE_KEYS, defaults.evade)),
    }
}

fn resolve(
    nested: Option<&Map<String, Value>>,
    top: Option<&Map<String, Value>>,
    keys: &[&str],
) -> Option<f64> {
    [nested, top]
        .into_iter()
        .flatten()
        .find_map(|obj| keys.iter().find_map(|key| lookup(obj, key).and_then(as_number)))
}

/// Exact key first, then a case-insensitive match.
fn lookup<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).or_else(|| {
        obj.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

/// Numbers and numeric strings. Anything else counts as absent.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn non_negative(v: f64) -> f64 {
    v.max(0.0)
}
