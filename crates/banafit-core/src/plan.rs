//! Seven-day workout and diet plan.
//!
//! Plans are produced by the hosted AI service and arrive as camelCase JSON.
//! This module only models and validates them; generation lives elsewhere.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;

/// Number of days in every plan.
pub const PLAN_DAYS: usize = 7;

/// A single exercise of a workout day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    /// Repetition count or a duration such as "30s".
    pub reps: String,
    /// Rest between sets, e.g. "60s".
    pub rest: String,
    #[serde(default)]
    pub description: String,
}

/// One day of the workout schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWorkout {
    /// Day label as written by the generator, e.g. "Lunes" or "Monday".
    pub day: String,
    /// "Upper Body Strength", "Rest", ...
    pub focus: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub warmup: String,
    #[serde(default)]
    pub cooldown: String,
}

impl DailyWorkout {
    /// A day without exercises is a rest day.
    pub fn is_rest_day(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn has_exercise(&self, name: &str) -> bool {
        self.exercises.iter().any(|e| e.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// "Breakfast", "Lunch", "Dinner", "Snack"
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDiet {
    pub day: String,
    #[serde(default)]
    pub meals: Vec<Meal>,
    pub total_calories: u32,
}

/// The full plan: seven workout days paired with seven diet days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub workout_schedule: Vec<DailyWorkout>,
    pub diet_plan: Vec<DailyDiet>,
}

impl WorkoutPlan {
    /// Parse and validate a plan from its JSON wire form.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let plan: WorkoutPlan = serde_json::from_str(json)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Check the structural invariants of a plan.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.workout_schedule.len() != PLAN_DAYS {
            return Err(ValidationError::WrongDayCount {
                list: "workoutSchedule",
                expected: PLAN_DAYS,
                found: self.workout_schedule.len(),
            });
        }
        if self.diet_plan.len() != PLAN_DAYS {
            return Err(ValidationError::WrongDayCount {
                list: "dietPlan",
                expected: PLAN_DAYS,
                found: self.diet_plan.len(),
            });
        }

        for workout in &self.workout_schedule {
            let mut seen = HashSet::new();
            for exercise in &workout.exercises {
                if exercise.name.trim().is_empty() {
                    return Err(ValidationError::InvalidValue {
                        field: format!("{}.exercises.name", workout.day),
                        message: "exercise name is empty".to_string(),
                    });
                }
                if !seen.insert(exercise.name.as_str()) {
                    return Err(ValidationError::DuplicateExercise {
                        day: workout.day.clone(),
                        exercise: exercise.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn workout(&self, index: usize) -> Result<&DailyWorkout, ValidationError> {
        self.workout_schedule
            .get(index)
            .ok_or(ValidationError::DayOutOfBounds {
                index,
                len: self.workout_schedule.len(),
            })
    }

    pub fn diet(&self, index: usize) -> Option<&DailyDiet> {
        self.diet_plan.get(index)
    }

    /// Resolve a day label ("lunes", "Monday") or a 1-based number to an index.
    pub fn find_day(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        if let Ok(n) = label.parse::<usize>() {
            return (1..=self.workout_schedule.len()).contains(&n).then(|| n - 1);
        }
        self.workout_schedule
            .iter()
            .position(|w| w.day.trim().to_lowercase() == label.to_lowercase())
    }

    /// Index of the plan day for `date`.
    ///
    /// Matches the weekday name in Spanish or English; falls back to the
    /// first day when the generator used some other labelling.
    pub fn day_index_for(&self, date: NaiveDate) -> usize {
        let weekday = date.weekday();
        let names = [spanish_weekday(weekday), english_weekday(weekday)];
        self.workout_schedule
            .iter()
            .position(|w| {
                let day = w.day.trim().to_lowercase();
                names.iter().any(|n| day == *n)
            })
            .unwrap_or(0)
    }

    /// Total planned calories over the week.
    pub fn weekly_calories(&self) -> u32 {
        self.diet_plan.iter().map(|d| d.total_calories).sum()
    }

    pub fn rest_days(&self) -> usize {
        self.workout_schedule.iter().filter(|w| w.is_rest_day()).count()
    }
}

fn spanish_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

fn english_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn exercise(name: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            sets: 3,
            reps: "12".to_string(),
            rest: "60s".to_string(),
            description: String::new(),
        }
    }

    /// Monday..Sunday in Spanish; day `i` gets `counts[i]` exercises.
    pub fn plan_with_counts(counts: [usize; 7]) -> WorkoutPlan {
        let days = ["Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo"];
        let workout_schedule = days
            .iter()
            .zip(counts)
            .map(|(day, n)| DailyWorkout {
                day: day.to_string(),
                focus: if n == 0 { "Rest".to_string() } else { "Full Body".to_string() },
                exercises: (0..n).map(|i| exercise(&format!("Exercise {}", i + 1))).collect(),
                warmup: "5 min jog".to_string(),
                cooldown: "Stretching".to_string(),
            })
            .collect();
        let diet_plan = days
            .iter()
            .map(|day| DailyDiet {
                day: day.to_string(),
                meals: vec![Meal {
                    name: "Breakfast".to_string(),
                    description: "Oats with banana".to_string(),
                    calories: 450,
                }],
                total_calories: 2000,
            })
            .collect();
        WorkoutPlan {
            workout_schedule,
            diet_plan,
        }
    }
}
