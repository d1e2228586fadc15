//! Core error types for banafit-core.
//!
//! The streak tracker itself only fails on bad input; everything else here
//! covers the session store, configuration and persistence layers.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::gamification::{CosmeticItem, SocialPlatform};

/// Core error type for banafit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session store errors
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by session-level actions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// An action needed a logged-in user
    #[error("No active session: register or log in first")]
    NoSession,

    /// An action needed a workout plan
    #[error("No workout plan: import or generate a plan first")]
    NoPlan,

    /// Balance too low for a purchase
    #[error("Not enough diamonds: need {needed}, have {available}")]
    InsufficientDiamonds { needed: u64, available: u64 },

    /// One-time social reward already taken
    #[error("Reward for following on {0} was already claimed")]
    AlreadyClaimed(SocialPlatform),

    /// Cosmetic bought twice
    #[error("{0} is already owned")]
    AlreadyOwned(CosmeticItem),

    /// Activation of a cosmetic that was never bought
    #[error("{0} is not owned")]
    NotOwned(CosmeticItem),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dotted key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home or data directory could not be resolved
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Plan list had the wrong number of days
    #[error("{list} must contain exactly {expected} days, found {found}")]
    WrongDayCount {
        list: &'static str,
        expected: usize,
        found: usize,
    },

    /// Day index outside of the plan
    #[error("Day {index} out of bounds (plan has {len} days)")]
    DayOutOfBounds { index: usize, len: usize },

    /// Exercise not part of the given day
    #[error("'{exercise}' is not an exercise of {day}")]
    UnknownExercise { day: String, exercise: String },

    /// Same exercise listed twice in one day
    #[error("Duplicate exercise '{exercise}' on {day}")]
    DuplicateExercise { day: String, exercise: String },

    /// Completion for a date earlier than one already booked
    #[error("Cannot complete {date}: {latest} is already completed")]
    CompletionBeforeLatest { date: NaiveDate, latest: NaiveDate },

    /// Empty or otherwise unusable value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
