use serde::{Deserialize, Serialize};

/// Numeric reward extracted from a loosely typed reward record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardDescriptor {
    pub exp: u64,
    /// Gold, in the wallet's smallest unit.
    pub currency_minor: u64,
    pub gems: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default)]
    pub loot: Vec<String>,
}

impl RewardDescriptor {
    pub fn is_zero(&self) -> bool {
        self.exp == 0 && self.currency_minor == 0 && self.gems == 0
    }

    /// Expected value of this reward at the given win probability.
    pub fn expected(&self, win_rate: f64) -> ExpectedReward {
        ExpectedReward {
            exp: win_rate * self.exp as f64,
            currency: win_rate * self.currency_minor as f64,
        }
    }
}

/// Win-rate-weighted reward shown in battle previews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectedReward {
    pub exp: f64,
    pub currency: f64,
}
