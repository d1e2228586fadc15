use clap::Subcommand;

use banafit_core::gamification::{current_streak, CellState};
use banafit_core::{Action, StoreError, StreakPath, ValidationError};
use chrono::NaiveDate;

use super::{describe_notification, print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Tick or untick an exercise
    Toggle {
        /// Exercise name as listed in the plan
        exercise: String,
        /// Plan day: number (1-7) or label, defaults to today
        #[arg(long)]
        day: Option<String>,
    },
    /// Show today's checklist
    Status,
    /// Mark today as completed (rest days)
    Complete,
    /// Show the streak path and reward chests
    Streak {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Dismiss the pending banner
    Dismiss,
}

pub fn run(action: WorkoutAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    match action {
        WorkoutAction::Toggle { exercise, day } => {
            let day = resolve_day(&session, day.as_deref())?;
            session.run(Action::ToggleExercise { day, exercise })
        }
        WorkoutAction::Status => {
            let plan = session.store.plan().ok_or(StoreError::NoPlan)?;
            let index = session.store.today_index().unwrap_or_default();
            let workout = plan.workout(index)?;
            super::plan::print_workout(&session, index, workout);
            let today = session.store.clock().today();
            if session.store.profile().is_some_and(|p| p.has_completed(today)) {
                println!("Today is completed ✓");
            }
            Ok(())
        }
        WorkoutAction::Complete => session.run(Action::CompleteDay),
        WorkoutAction::Streak { json } => streak(&mut session, json),
        WorkoutAction::Dismiss => session.run(Action::DismissNotification),
    }
}

fn resolve_day(session: &Session, label: Option<&str>) -> CmdResult<usize> {
    let plan = session.store.plan().ok_or(StoreError::NoPlan)?;
    match label {
        Some(label) => plan.find_day(label).ok_or_else(|| {
            ValidationError::InvalidValue {
                field: "day".to_string(),
                message: format!("no plan day matches '{label}'"),
            }
            .into()
        }),
        None => Ok(session.store.today_index().unwrap_or_default()),
    }
}

fn streak(session: &mut Session, json: bool) -> CmdResult {
    let today = session.store.clock().today();
    let profile = session.store.profile().ok_or(StoreError::NoSession)?;
    let streak = current_streak(&profile.completed_days, today);
    let interval = session.store.tracker().policy().milestone_interval;
    let path = StreakPath::build(streak, interval);

    if json {
        return print_json(&path);
    }

    let banner = session
        .store
        .active_notification()
        .map(|n| describe_notification(&n.kind));

    println!("🔥 {}", path.headline());
    let row: Vec<String> = path
        .cells
        .iter()
        .map(|cell| match cell.state {
            CellState::Next => format!("[{}]", cell.glyph()),
            _ => cell.glyph(),
        })
        .collect();
    for line in row.chunks(7) {
        println!("  {}", line.join("  "));
    }
    if let Some(days) = path.days_to_next_reward() {
        println!("Next reward chest in {days} day(s).");
    }
    if let Some(banner) = banner {
        println!();
        println!("{banner}");
    }
    Ok(())
}
