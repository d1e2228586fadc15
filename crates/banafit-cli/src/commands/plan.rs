use clap::Subcommand;
use std::path::PathBuf;

use banafit_core::{Action, DailyWorkout, StoreError, WorkoutPlan};
use chrono::NaiveDate;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Import a generated plan from a JSON file
    Import {
        /// Path to the plan JSON (workoutSchedule + dietPlan)
        file: PathBuf,
    },
    /// Show the whole week
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show today's workout and meals
    Today {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    match action {
        PlanAction::Import { file } => {
            let json = std::fs::read_to_string(&file)?;
            let plan = WorkoutPlan::from_json(&json)?;
            session.run(Action::ImportPlan(plan))
        }
        PlanAction::Show { json } => {
            let plan = session.store.plan().ok_or(StoreError::NoPlan)?;
            if json {
                return print_json(plan);
            }
            for (i, workout) in plan.workout_schedule.iter().enumerate() {
                let kcal = plan.diet(i).map_or(0, |d| d.total_calories);
                let kind = if workout.is_rest_day() {
                    "rest".to_string()
                } else {
                    format!("{} exercises", workout.exercise_count())
                };
                println!("{}. {:<10} {:<24} {:<14} {} kcal", i + 1, workout.day, workout.focus, kind, kcal);
            }
            Ok(())
        }
        PlanAction::Today { json } => today_view(&session, json),
    }
}

fn today_view(session: &Session, json: bool) -> CmdResult {
    let store = &session.store;
    let plan = store.plan().ok_or(StoreError::NoPlan)?;
    let index = plan.day_index_for(store.clock().today());
    let workout = plan.workout(index)?;
    let diet = plan.diet(index);

    if json {
        return print_json(&serde_json::json!({
            "index": index,
            "workout": workout,
            "diet": diet,
            "done": store.state().progress.done(index).collect::<Vec<_>>(),
            "completedToday": store
                .profile()
                .is_some_and(|p| p.has_completed(store.clock().today())),
        }));
    }

    print_workout(session, index, workout);
    if let Some(diet) = diet {
        println!();
        println!("Diet ({} kcal)", diet.total_calories);
        for meal in &diet.meals {
            println!("  {:<10} {:>5} kcal  {}", meal.name, meal.calories, meal.description);
        }
    }
    Ok(())
}

pub fn print_workout(session: &Session, index: usize, workout: &DailyWorkout) {
    let progress = &session.store.state().progress;
    println!("{} (day {}): {}", workout.day, index + 1, workout.focus);
    if workout.is_rest_day() {
        println!("  Rest day. Run 'banafit workout complete' to keep the streak.");
        return;
    }
    if !workout.warmup.is_empty() {
        println!("  Warm-up: {}", workout.warmup);
    }
    for exercise in &workout.exercises {
        let mark = if progress.is_done(index, &exercise.name) { "x" } else { " " };
        println!(
            "  [{mark}] {}  {}x{}  rest {}",
            exercise.name, exercise.sets, exercise.reps, exercise.rest
        );
    }
    if !workout.cooldown.is_empty() {
        println!("  Cool-down: {}", workout.cooldown);
    }
}
