pub mod account;
pub mod config;
pub mod diamonds;
pub mod plan;
pub mod shop;
pub mod workout;

use banafit_core::gamification::{Activation, NotificationKind};
use banafit_core::{Action, AppStore, Clock, Config, Event, FixedClock, SessionFile, SystemClock};
use chrono::NaiveDate;

pub type CmdResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// A loaded session: the store plus where to write it back.
pub struct Session {
    pub store: AppStore,
    file: SessionFile,
}

impl Session {
    pub fn open(today: Option<NaiveDate>) -> CmdResult<Self> {
        let config = Config::load()?;
        let file = SessionFile::open_default()?;
        let state = file.load()?;
        tracing::debug!(path = %file.path().display(), "session loaded");
        let clock: Box<dyn Clock> = match today {
            Some(date) => Box::new(FixedClock::on(date)),
            None => Box::new(SystemClock),
        };
        Ok(Self {
            store: AppStore::with_state(state, config, clock),
            file,
        })
    }

    /// Apply one action and persist the result.
    pub fn dispatch(&mut self, action: Action) -> CmdResult<Vec<Event>> {
        let events = self.store.dispatch(action)?;
        self.file.save(self.store.state())?;
        Ok(events)
    }

    /// Apply, persist and print.
    pub fn run(&mut self, action: Action) -> CmdResult {
        let events = self.dispatch(action)?;
        print_events(&events);
        Ok(())
    }
}

pub fn print_events(events: &[Event]) {
    for event in events {
        if let Some(line) = describe(event) {
            println!("{line}");
        }
    }
}

fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::Registered { name } => format!("Welcome, {name}! Import a plan to get started."),
        Event::LoggedIn { name } => format!("Logged in as {name}."),
        Event::LoggedOut => "Logged out.".to_string(),
        Event::OnboardingCompleted => "Onboarding complete.".to_string(),
        Event::PlanImported {
            rest_days,
            weekly_calories,
        } => format!("Plan imported: {rest_days} rest days, {weekly_calories} kcal per week."),
        Event::ExerciseToggled {
            exercise,
            done,
            done_count,
            total,
            ..
        } => format!(
            "[{}] {exercise} ({done_count}/{total})",
            if *done { "x" } else { " " }
        ),
        Event::DayCompleted {
            date,
            streak,
            diamonds,
            ..
        } => format!("Day {date} completed! Streak: {streak} 🔥  +{diamonds} 💎"),
        Event::DayAlreadyCompleted { date } => format!("{date} is already completed."),
        Event::MilestoneReached(reward) => format!(
            "Reward chest! {} days reached, you won {} 💎.",
            reward.day, reward.diamonds
        ),
        Event::DiamondsEarned(credit) => {
            format!("+{} 💎 (balance {})", credit.amount, credit.balance)
        }
        Event::CosmeticPurchased {
            item,
            price,
            balance,
        } => format!("Bought {item} for {price} 💎 (balance {balance})."),
        Event::CosmeticActivated { activation } => match activation {
            Activation::ThemeApplied(theme) => format!("Theme set to {theme:?}."),
            Activation::FrameApplied(frame) => format!("Frame set to {frame:?}."),
            Activation::AccessoryEquipped(a) => format!("Bananín is wearing the {a:?}."),
            Activation::AccessoryRemoved(a) => format!("Bananín took off the {a:?}."),
        },
        Event::FrameCleared { frame } => match frame {
            Some(frame) => format!("Removed the {frame:?} frame."),
            None => "No frame was active.".to_string(),
        },
        Event::NotificationDismissed => return None,
    };
    Some(line)
}

/// One-line rendering of a pending banner.
pub fn describe_notification(kind: &NotificationKind) -> String {
    match kind {
        NotificationKind::DayCompleted { streak, diamonds, .. } => {
            format!("Day completed, streak {streak}, +{diamonds} 💎")
        }
        NotificationKind::MilestoneReward(reward) => format!(
            "Reward chest for reaching {} days: {} 💎",
            reward.day, reward.diamonds
        ),
        NotificationKind::DiamondsEarned { amount, .. } => format!("+{amount} 💎"),
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
