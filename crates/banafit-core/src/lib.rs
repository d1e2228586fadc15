//! # BanaFit Core Library
//!
//! Business logic for the BanaFit fitness coach. Plans are generated by a
//! hosted AI service; this crate takes over once a plan exists and tracks how
//! the user follows it. The CLI binary and any GUI are thin layers over the
//! same library.
//!
//! ## Architecture
//!
//! - **Streak Tracker**: derives day completion from ticked exercises and
//!   books streaks and diamond rewards at most once per calendar date
//! - **Wallet & Cosmetics**: other diamond sources and the cosmetic shop
//! - **Session Store**: reducer-style state with explicit actions and events
//! - **Storage**: TOML configuration and JSON session persistence
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: completion and streak bookkeeping
//! - [`AppStore`]: session state and the [`Action`]s that change it
//! - [`Config`]: reward policy and wallet amounts
//! - [`SessionFile`]: session persistence between runs

pub mod error;
pub mod events;
pub mod gamification;
pub mod plan;
pub mod profile;
pub mod storage;
pub mod store;

pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use gamification::{
    Clock, CosmeticItem, DayCompletion, DayProgress, FixedClock, Inventory, RewardNotification,
    RewardPolicy, SocialPlatform, StreakPath, StreakTracker, SystemClock,
};
pub use plan::{DailyDiet, DailyWorkout, Exercise, Meal, WorkoutPlan};
pub use profile::{ProfileDetails, UserProfile};
pub use storage::{Config, SessionFile, SessionState};
pub use store::{Action, AppStore};
