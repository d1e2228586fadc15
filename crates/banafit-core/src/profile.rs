//! User profile: onboarding answers plus gamification state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::StoreError;
use crate::gamification::{Inventory, SocialPlatform};

/// Answers collected by the onboarding questionnaire.
///
/// Free text mirrors what the assistant asks; the plan generator consumes
/// these verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    pub age: u32,
    /// Kilograms
    pub weight: f64,
    /// Centimetres
    pub height: f64,
    /// "lose weight", "build muscle", ...
    pub goal: String,
    /// "beginner", "intermediate", "advanced"
    pub fitness_level: String,
    /// "dumbbells, yoga mat", "full gym", "none"
    pub available_equipment: String,
    pub physical_limitations: String,
    /// "3 times a week", "daily"
    pub exercise_habits: String,
    pub allergies: String,
    /// Weekly food budget
    pub budget: f64,
    /// "vegetarian", "vegan", "none"
    pub food_preferences: String,
    pub gender: String,
}

impl Default for ProfileDetails {
    fn default() -> Self {
        Self {
            age: 0,
            weight: 0.0,
            height: 0.0,
            goal: String::new(),
            fitness_level: String::new(),
            available_equipment: String::new(),
            physical_limitations: "None".to_string(),
            exercise_habits: String::new(),
            allergies: "Ninguna".to_string(),
            budget: 0.0,
            food_preferences: String::new(),
            gender: String::new(),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(flatten)]
    pub details: ProfileDetails,

    /// Consecutive completed days ending at the latest completion.
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub diamonds: u64,
    /// One entry per calendar day the plan was fulfilled.
    #[serde(default)]
    pub completed_days: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub claimed_social_rewards: BTreeSet<SocialPlatform>,
}

impl UserProfile {
    /// Fresh profile as created at registration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: ProfileDetails::default(),
            streak: 0,
            diamonds: 0,
            completed_days: BTreeSet::new(),
            inventory: Inventory::default(),
            claimed_social_rewards: BTreeSet::new(),
        }
    }

    /// Profile for a login, named after the e-mail local part.
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or_default().trim();
        Self::new(if name.is_empty() { "User" } else { name })
    }

    /// Replace onboarding answers, keeping streak, balance and inventory.
    pub fn apply_details(&mut self, details: ProfileDetails) {
        self.details = details;
    }

    pub fn last_completed_day(&self) -> Option<NaiveDate> {
        self.completed_days.iter().next_back().copied()
    }

    pub fn has_completed(&self, date: NaiveDate) -> bool {
        self.completed_days.contains(&date)
    }

    /// Add diamonds, returning the new balance.
    pub fn credit(&mut self, amount: u64) -> u64 {
        self.diamonds = self.diamonds.saturating_add(amount);
        self.diamonds
    }

    /// Remove diamonds; leaves the balance untouched when it is too low.
    pub fn spend(&mut self, amount: u64) -> Result<u64, StoreError> {
        if amount > self.diamonds {
            return Err(StoreError::InsufficientDiamonds {
                needed: amount,
                available: self.diamonds,
            });
        }
        self.diamonds -= amount;
        Ok(self.diamonds)
    }
}
