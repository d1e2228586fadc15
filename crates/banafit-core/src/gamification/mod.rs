mod clock;
mod cosmetics;
mod rewards;
mod streak_path;
mod tracker;
pub mod wallet;

pub use clock::{Clock, FixedClock, SystemClock};
pub use cosmetics::{Accessory, Activation, CosmeticItem, Frame, Inventory, Theme};
pub use rewards::{Notification, NotificationKind, RewardNotification, RewardPolicy};
pub use streak_path::{CellState, PathCell, StreakPath};
pub use tracker::{
    current_streak, run_ending_at, DayCompletion, DayProgress, StreakTracker, ToggleOutcome,
};
pub use wallet::{
    Credit, DiamondPack, DiamondSource, SocialPlatform, WalletConfig, DIAMOND_PACKS,
};
