//! Reward descriptor parsing.
//!
//! Reward records are authored by hand and arrive in many shapes:
//! `{ "exp": 50, "gold": 20 }`, `{ "Exp": "EXP +80" }`, `"EXP +50, Coin +50"`.
//! Parsing is total. Anything unrecognized contributes zero.
//!
//! When the same reward is encoded more than once (a numeric key plus an
//! annotated string, say) the larger value wins, so a duplicate encoding can
//! never shrink what a player receives.

use super::types::RewardDescriptor;
use serde_json::{Map, Value};

const EXP_KEYS: &[&str] = &["exp", "xp", "experience", "exp+"];
const CURRENCY_KEYS: &[&str] = &["gold", "coins", "coin"];
const GEM_KEYS: &[&str] = &["gems", "gem"];

/// Parse a reward record of any shape.
pub fn parse_reward(record: Option<&Value>) -> RewardDescriptor {
    match record {
        Some(Value::Object(obj)) => parse_object(obj),
        Some(Value::String(s)) => parse_text(s),
        _ => RewardDescriptor::default(),
    }
}

/// Parse a delimited reward string such as `"EXP +50; Gem +2"`.
pub fn parse_text(text: &str) -> RewardDescriptor {
    let mut reward = RewardDescriptor::default();
    for segment in split_list(text) {
        merge_annotated(&mut reward, segment);
    }
    reward
}

fn parse_object(raw: &Map<String, Value>) -> RewardDescriptor {
    let obj: Map<String, Value> = raw
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.clone()))
        .collect();
    // A null key counts as absent so its synonyms still apply
    let first = |keys: &[&str]| {
        keys.iter()
            .filter_map(|k| obj.get(*k))
            .find(|v| !v.is_null())
            .map(amount_of)
            .unwrap_or(0)
    };

    let mut reward = RewardDescriptor {
        exp: first(EXP_KEYS),
        currency_minor: first(CURRENCY_KEYS),
        gems: first(GEM_KEYS),
        item: obj.get("item").and_then(display_text),
        loot: obj.get("loot").map(loot_list).unwrap_or_default(),
    };

    for value in obj.values() {
        if let Value::String(s) = value {
            merge_annotated(&mut reward, s);
        }
    }
    reward
}

/// Classify one annotated string by substring and max-merge its amount.
fn merge_annotated(reward: &mut RewardDescriptor, text: &str) {
    let lower = text.to_lowercase();
    let amount = first_signed_int(text).map(non_negative).unwrap_or(0);
    if lower.contains("exp") {
        reward.exp = reward.exp.max(amount);
    }
    if lower.contains("coin") || lower.contains("gold") {
        reward.currency_minor = reward.currency_minor.max(amount);
    }
    if lower.contains("gem") {
        reward.gems = reward.gems.max(amount);
    }
}

/// Amount carried by a single reward value.
fn amount_of(value: &Value) -> u64 {
    match value {
        Value::Number(n) => match (n.as_u64(), n.as_f64()) {
            (Some(v), _) => v,
            (None, Some(f)) if f.is_finite() && f > 0.0 => f as u64,
            _ => 0,
        },
        Value::String(s) => first_signed_int(s).map(non_negative).unwrap_or(0),
        _ => 0,
    }
}

fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn loot_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(display_text).collect(),
        Value::String(s) => split_list(s).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split([';', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn non_negative(v: i64) -> u64 {
    v.max(0) as u64
}

/// First optionally signed run of ASCII digits, e.g. `"EXP +50"` -> 50.
/// Saturates instead of overflowing.
pub fn first_signed_int(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let start = (0..bytes.len()).find(|&i| {
        bytes[i].is_ascii_digit()
            || (matches!(bytes[i], b'+' | b'-')
                && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit()))
    })?;

    let negative = bytes[start] == b'-';
    let digits_from = if bytes[start].is_ascii_digit() { start } else { start + 1 };
    let magnitude = bytes[digits_from..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    Some(if negative { -magnitude } else { magnitude })
}
