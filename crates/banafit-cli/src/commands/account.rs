//! Account commands: register, login, logout, onboarding and profile view.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use banafit_core::gamification::current_streak;
use banafit_core::{Action, ProfileDetails, WorkoutPlan};
use chrono::NaiveDate;

use super::{describe_notification, print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum AccountAction {
    /// Create a new profile and start a session
    Register {
        /// Display name
        name: String,
    },
    /// Start a session for an existing user
    Login {
        /// E-mail address; the part before '@' becomes the display name
        email: String,
    },
    /// End the session and forget the profile
    Logout,
    /// Store questionnaire answers together with the generated plan
    Onboard(OnboardArgs),
    /// Show the profile and gamification state
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct OnboardArgs {
    /// Plan JSON produced for these answers
    #[arg(long)]
    plan: PathBuf,
    #[arg(long, default_value_t = 0)]
    age: u32,
    /// Kilograms
    #[arg(long, default_value_t = 0.0)]
    weight: f64,
    /// Centimetres
    #[arg(long, default_value_t = 0.0)]
    height: f64,
    #[arg(long, default_value = "")]
    goal: String,
    #[arg(long, default_value = "")]
    fitness_level: String,
    #[arg(long, default_value = "")]
    equipment: String,
    #[arg(long, default_value = "None")]
    limitations: String,
    #[arg(long, default_value = "")]
    habits: String,
    #[arg(long, default_value = "Ninguna")]
    allergies: String,
    #[arg(long, default_value_t = 0.0)]
    budget: f64,
    #[arg(long, default_value = "")]
    food_preferences: String,
    #[arg(long, default_value = "")]
    gender: String,
}

impl OnboardArgs {
    fn details(&self) -> ProfileDetails {
        ProfileDetails {
            age: self.age,
            weight: self.weight,
            height: self.height,
            goal: self.goal.clone(),
            fitness_level: self.fitness_level.clone(),
            available_equipment: self.equipment.clone(),
            physical_limitations: self.limitations.clone(),
            exercise_habits: self.habits.clone(),
            allergies: self.allergies.clone(),
            budget: self.budget,
            food_preferences: self.food_preferences.clone(),
            gender: self.gender.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileView<'a> {
    #[serde(flatten)]
    profile: &'a banafit_core::UserProfile,
    /// Streak as of today; zero once a day has been missed.
    current_streak: u32,
    has_plan: bool,
}

pub fn run(action: AccountAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    match action {
        AccountAction::Register { name } => session.run(Action::Register { name }),
        AccountAction::Login { email } => session.run(Action::Login { email }),
        AccountAction::Logout => session.run(Action::Logout),
        AccountAction::Onboard(args) => {
            let json = std::fs::read_to_string(&args.plan)?;
            let plan = WorkoutPlan::from_json(&json)?;
            session.run(Action::CompleteOnboarding {
                details: args.details(),
                plan,
            })
        }
        AccountAction::Show { json } => show(&mut session, json),
    }
}

fn show(session: &mut Session, json: bool) -> CmdResult {
    let today = session.store.clock().today();
    let has_plan = session.store.plan().is_some();
    let banner = session
        .store
        .active_notification()
        .map(|n| describe_notification(&n.kind));
    let profile = session
        .store
        .profile()
        .ok_or(banafit_core::StoreError::NoSession)?;
    let streak_today = current_streak(&profile.completed_days, today);

    if json {
        return print_json(&ProfileView {
            profile,
            current_streak: streak_today,
            has_plan,
        });
    }

    if let Some(banner) = banner {
        println!("🔔 {banner}");
    }
    println!("{}", profile.name);
    println!("  Streak:    {} 🔥", streak_today);
    println!("  Diamonds:  {} 💎", profile.diamonds);
    println!("  Days done: {}", profile.completed_days.len());
    if let Some(last) = profile.last_completed_day() {
        println!("  Last day:  {last}");
    }
    let inventory = &profile.inventory;
    println!("  Theme:     {:?}", inventory.active_theme());
    if let Some(frame) = inventory.active_frame() {
        println!("  Frame:     {frame:?}");
    }
    let accessories: Vec<String> = inventory
        .equipped_accessories()
        .map(|a| format!("{a:?}"))
        .collect();
    if !accessories.is_empty() {
        println!("  Bananín:   {}", accessories.join(", "));
    }
    if !has_plan {
        println!();
        println!("No plan yet. Run 'banafit plan import <file>' or 'banafit account onboard'.");
    }
    Ok(())
}
