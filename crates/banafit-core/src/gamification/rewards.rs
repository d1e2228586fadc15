//! Reward policy and the transient notifications it produces.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::wallet::DiamondSource;

/// Upper bound for banner display times (ten minutes).
pub const MAX_BANNER_MS: u64 = 600_000;

/// Tunable reward constants.
///
/// Stored under `[rewards]` in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPolicy {
    /// Diamonds for every completed day.
    #[serde(default = "default_base_reward")]
    pub base_reward: u64,
    /// A streak that is a multiple of this earns a bonus chest.
    #[serde(default = "default_milestone_interval")]
    pub milestone_interval: u32,
    #[serde(default = "default_bonus_min")]
    pub bonus_min: u64,
    /// Inclusive upper bound.
    #[serde(default = "default_bonus_max")]
    pub bonus_max: u64,
    #[serde(default = "default_completion_banner_ms")]
    pub completion_banner_ms: u64,
    #[serde(default = "default_reward_banner_ms")]
    pub reward_banner_ms: u64,
}

fn default_base_reward() -> u64 {
    15
}
fn default_milestone_interval() -> u32 {
    5
}
fn default_bonus_min() -> u64 {
    50
}
fn default_bonus_max() -> u64 {
    200
}
fn default_completion_banner_ms() -> u64 {
    3500
}
fn default_reward_banner_ms() -> u64 {
    4000
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            base_reward: default_base_reward(),
            milestone_interval: default_milestone_interval(),
            bonus_min: default_bonus_min(),
            bonus_max: default_bonus_max(),
            completion_banner_ms: default_completion_banner_ms(),
            reward_banner_ms: default_reward_banner_ms(),
        }
    }
}

impl RewardPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.milestone_interval == 0 {
            return Err(ConfigError::InvalidValue {
                key: "rewards.milestone_interval".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        for (key, value) in [
            ("rewards.completion_banner_ms", self.completion_banner_ms),
            ("rewards.reward_banner_ms", self.reward_banner_ms),
        ] {
            if value > MAX_BANNER_MS {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("{value} ms is above the {MAX_BANNER_MS} ms limit"),
                });
            }
        }
        if self.bonus_min > self.bonus_max {
            return Err(ConfigError::InvalidValue {
                key: "rewards.bonus_min".to_string(),
                message: format!(
                    "{} is above rewards.bonus_max ({})",
                    self.bonus_min, self.bonus_max
                ),
            });
        }
        Ok(())
    }

    /// Whether reaching `streak` opens a bonus chest.
    pub fn is_milestone(&self, streak: u32) -> bool {
        self.milestone_interval > 0 && streak > 0 && streak % self.milestone_interval == 0
    }

    /// Draw a bonus uniformly from `bonus_min..=bonus_max`.
    pub fn roll_bonus<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.bonus_min >= self.bonus_max {
            return self.bonus_min;
        }
        rng.gen_range(self.bonus_min..=self.bonus_max)
    }
}

/// One-shot payload shown in the streak modal after a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardNotification {
    /// Streak length that earned the chest.
    pub day: u32,
    pub diamonds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
    /// Completion animation for an ordinary day.
    DayCompleted {
        date: NaiveDate,
        streak: u32,
        diamonds: u64,
    },
    /// Chest banner for a milestone day.
    MilestoneReward(RewardNotification),
    /// Diamonds credited from outside the tracker.
    DiamondsEarned { amount: u64, source: DiamondSource },
}

/// A banner that clears itself after its display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub shown_at: DateTime<Utc>,
    pub display_ms: u64,
}

impl Notification {
    pub fn new(kind: NotificationKind, shown_at: DateTime<Utc>, display_ms: u64) -> Self {
        Self {
            kind,
            shown_at,
            display_ms,
        }
    }

    /// Saturates at the latest representable instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.display_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|delta| self.shown_at.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// The milestone payload, if this banner carries one.
    pub fn reward(&self) -> Option<RewardNotification> {
        match self.kind {
            NotificationKind::MilestoneReward(reward) => Some(reward),
            _ => None,
        }
    }
}
