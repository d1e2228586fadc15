//! Diamond sources outside the streak tracker: ads, packs, social follows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{StoreError, ValidationError};
use crate::profile::UserProfile;

/// Where a diamond credit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiamondSource {
    Ad,
    Pack,
    Social(SocialPlatform),
}

/// Platforms with a one-time follow reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    X,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 3] = [
        SocialPlatform::Instagram,
        SocialPlatform::Facebook,
        SocialPlatform::X,
    ];
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::X => "X",
        };
        f.write_str(name)
    }
}

impl FromStr for SocialPlatform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" | "ig" => Ok(SocialPlatform::Instagram),
            "facebook" | "fb" => Ok(SocialPlatform::Facebook),
            "x" | "twitter" => Ok(SocialPlatform::X),
            other => Err(ValidationError::InvalidValue {
                field: "platform".to_string(),
                message: format!("unknown platform '{other}'"),
            }),
        }
    }
}

/// A purchasable bundle of diamonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiamondPack {
    pub diamonds: u64,
    /// Display price in the store currency.
    pub price: u32,
}

pub const DIAMOND_PACKS: [DiamondPack; 4] = [
    DiamondPack { diamonds: 200, price: 25 },
    DiamondPack { diamonds: 500, price: 40 },
    DiamondPack { diamonds: 1200, price: 80 },
    DiamondPack { diamonds: 3000, price: 150 },
];

/// Amounts for the fixed-value sources.
///
/// Stored under `[wallet]` in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    #[serde(default = "default_ad_reward")]
    pub ad_reward: u64,
    #[serde(default = "default_social_reward")]
    pub social_reward: u64,
}

fn default_ad_reward() -> u64 {
    25
}
fn default_social_reward() -> u64 {
    100
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            ad_reward: default_ad_reward(),
            social_reward: default_social_reward(),
        }
    }
}

/// Outcome of a credit: amount added and the resulting balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub amount: u64,
    pub source: DiamondSource,
    pub balance: u64,
}

pub fn watch_ad(profile: &mut UserProfile, config: &WalletConfig) -> Credit {
    let balance = profile.credit(config.ad_reward);
    Credit {
        amount: config.ad_reward,
        source: DiamondSource::Ad,
        balance,
    }
}

/// Credit the pack at `index` in [`DIAMOND_PACKS`].
///
/// Payment happens outside the app; this only books the diamonds.
pub fn buy_pack(profile: &mut UserProfile, index: usize) -> Result<Credit, ValidationError> {
    let pack = DIAMOND_PACKS
        .get(index)
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "pack".to_string(),
            message: format!("no pack #{} (have {})", index.saturating_add(1), DIAMOND_PACKS.len()),
        })?;
    let balance = profile.credit(pack.diamonds);
    Ok(Credit {
        amount: pack.diamonds,
        source: DiamondSource::Pack,
        balance,
    })
}

/// Follow reward, at most once per platform.
pub fn claim_social(
    profile: &mut UserProfile,
    platform: SocialPlatform,
    config: &WalletConfig,
) -> Result<Credit, StoreError> {
    if profile.claimed_social_rewards.contains(&platform) {
        return Err(StoreError::AlreadyClaimed(platform));
    }
    profile.claimed_social_rewards.insert(platform);
    let balance = profile.credit(config.social_reward);
    Ok(Credit {
        amount: config.social_reward,
        source: DiamondSource::Social(platform),
        balance,
    })
}
