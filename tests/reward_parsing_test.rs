//! Integration test: reward records of every shape
//!
//! Parsing never fails; odd shapes collapse to zero, duplicate encodings
//! take the larger amount

use skirmish::rewards::{parse_reward, parse_text, RewardDescriptor};
use serde_json::{json, Value};

#[test]
fn test_annotated_string() {
    let reward = parse_reward(Some(&json!("EXP +50, Coin +50")));
    assert_eq!(reward.exp, 50);
    assert_eq!(reward.currency_minor, 50);
    assert_eq!(reward.gems, 0);
}

#[test]
fn test_mixed_case_object() {
    let reward = parse_reward(Some(&json!({ "Exp": "80", "GOLD": 20 })));
    assert_eq!(reward.exp, 80);
    assert_eq!(reward.currency_minor, 20);
    assert_eq!(reward.gems, 0);
}

#[test]
fn test_unrecognized_shapes_are_zero() {
    let shapes: Vec<Option<Value>> = vec![
        None,
        Some(Value::Null),
        Some(json!(42)),
        Some(json!(true)),
        Some(json!([1, 2, 3])),
        Some(json!({})),
        Some(json!({ "banana": 7 })),
        Some(json!("")),
        Some(json!("nothing to see")),
    ];
    for shape in shapes {
        let reward = parse_reward(shape.as_ref());
        assert!(reward.is_zero(), "{:?} gave {:?}", shape, reward);
        assert_eq!(reward, RewardDescriptor::default());
    }
}

#[test]
fn test_negative_amounts_clamp_to_zero() {
    let reward = parse_reward(Some(&json!({ "exp": -30, "gold": "-5" })));
    assert_eq!(reward.exp, 0);
    assert_eq!(reward.currency_minor, 0);

    let reward = parse_text("Exp -10; Gem -1");
    assert!(reward.is_zero());
}

#[test]
fn test_string_values_under_any_key_are_scanned() {
    let reward = parse_reward(Some(&json!({
        "description": "Bonus gems 4",
        "extra": "double EXP +120",
        "exp": 100
    })));
    assert_eq!(reward.exp, 120);
    assert_eq!(reward.gems, 4);
}

#[test]
fn test_duplicate_encodings_never_shrink() {
    let reward = parse_reward(Some(&json!({
        "gold": 60,
        "label": "Gold +25"
    })));
    assert_eq!(reward.currency_minor, 60);
}

#[test]
fn test_experience_synonyms() {
    for key in ["exp", "XP", "Experience", "EXP+"] {
        let reward = parse_reward(Some(&json!({ key: 33 })));
        assert_eq!(reward.exp, 33, "key {}", key);
    }
    for key in ["gold", "Coins", "COIN"] {
        let reward = parse_reward(Some(&json!({ key: 8 })));
        assert_eq!(reward.currency_minor, 8, "key {}", key);
    }
    for key in ["gems", "Gem"] {
        let reward = parse_reward(Some(&json!({ key: 2 })));
        assert_eq!(reward.gems, 2, "key {}", key);
    }
}

#[test]
fn test_null_amounts_defer_to_synonyms() {
    let reward = parse_reward(Some(&json!({
        "EXP": null,
        "experience": 75,
        "gold": null,
        "coin": "12",
        "gems": null
    })));
    assert_eq!(reward.exp, 75);
    assert_eq!(reward.currency_minor, 12);
    assert_eq!(reward.gems, 0);
}

#[test]
fn test_item_and_loot_carried_through() {
    let reward = parse_reward(Some(&json!({
        "exp": 5,
        "item": "Rusty Sword",
        "loot": ["Fang", "Hide"]
    })));
    assert_eq!(reward.item.as_deref(), Some("Rusty Sword"));
    assert_eq!(reward.loot, vec!["Fang".to_string(), "Hide".to_string()]);
}

#[test]
fn test_fractional_numbers_truncate() {
    let reward = parse_reward(Some(&json!({ "exp": 12.9, "gold": 0.5 })));
    assert_eq!(reward.exp, 12);
    assert_eq!(reward.currency_minor, 0);
}
