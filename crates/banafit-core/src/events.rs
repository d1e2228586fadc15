use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gamification::{Activation, CosmeticItem, Credit, Frame, RewardNotification};

/// Every state change in the session produces an Event.
/// Front ends render them; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Registered {
        name: String,
    },
    LoggedIn {
        name: String,
    },
    LoggedOut,
    OnboardingCompleted,
    PlanImported {
        rest_days: usize,
        weekly_calories: u32,
    },
    ExerciseToggled {
        day: usize,
        exercise: String,
        done: bool,
        done_count: usize,
        total: usize,
    },
    DayCompleted {
        date: NaiveDate,
        previous_streak: u32,
        streak: u32,
        diamonds: u64,
    },
    /// Completion requested for a date that is already booked.
    DayAlreadyCompleted {
        date: NaiveDate,
    },
    MilestoneReached(RewardNotification),
    DiamondsEarned(Credit),
    CosmeticPurchased {
        item: CosmeticItem,
        price: u64,
        balance: u64,
    },
    CosmeticActivated {
        activation: Activation,
    },
    FrameCleared {
        frame: Option<Frame>,
    },
    NotificationDismissed,
}
