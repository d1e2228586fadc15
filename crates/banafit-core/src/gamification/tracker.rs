//! Day completion and streak bookkeeping.
//!
//! A day counts as complete once every exercise of the plan day has been
//! ticked, or when the user explicitly completes it (rest days). Completion
//! is booked against today's calendar date at most once:
//!
//! ```text
//! Incomplete --(all exercises done | explicit completion)--> Completed(date)
//! ```
//!
//! `Completed` is terminal for that date. Unticking an exercise afterwards
//! leaves the date and its rewards in place.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::clock::Clock;
use super::rewards::{Notification, NotificationKind, RewardNotification, RewardPolicy};
use crate::error::ValidationError;
use crate::plan::WorkoutPlan;
use crate::profile::UserProfile;

/// Exercises ticked per plan day during the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    days: BTreeMap<usize, BTreeSet<String>>,
}

impl DayProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `exercise` for `day`; returns whether it is now done.
    pub fn toggle(&mut self, day: usize, exercise: &str) -> bool {
        let done = self.days.entry(day).or_default();
        if done.remove(exercise) {
            false
        } else {
            done.insert(exercise.to_string());
            true
        }
    }

    pub fn is_done(&self, day: usize, exercise: &str) -> bool {
        self.days.get(&day).is_some_and(|d| d.contains(exercise))
    }

    pub fn done_count(&self, day: usize) -> usize {
        self.days.get(&day).map_or(0, BTreeSet::len)
    }

    pub fn done(&self, day: usize) -> impl Iterator<Item = &str> {
        self.days.get(&day).into_iter().flatten().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }
}

/// Everything a day completion changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCompletion {
    pub date: NaiveDate,
    pub previous_streak: u32,
    pub streak: u32,
    pub base_reward: u64,
    /// Milestone chest, when the new streak hit one.
    pub reward: Option<RewardNotification>,
    pub notification: Notification,
}

impl DayCompletion {
    pub fn total_diamonds(&self) -> u64 {
        self.base_reward + self.reward.map_or(0, |r| r.diamonds)
    }
}

/// Result of ticking or unticking one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub day: usize,
    pub exercise: String,
    pub done: bool,
    pub done_count: usize,
    pub total: usize,
    /// Set when this toggle finished the day and it was not yet booked.
    pub completion: Option<DayCompletion>,
}

/// Applies completion events to a profile under a [`RewardPolicy`].
#[derive(Debug, Clone, Default)]
pub struct StreakTracker {
    policy: RewardPolicy,
}

impl StreakTracker {
    pub fn new(policy: RewardPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    /// Tick or untick an exercise of plan day `day`.
    ///
    /// When the done-set reaches the day's exercise count the day is
    /// completed. Rest days have no exercises and never get here with a
    /// valid name.
    pub fn toggle_exercise<R: Rng + ?Sized>(
        &self,
        profile: &mut UserProfile,
        plan: &WorkoutPlan,
        progress: &mut DayProgress,
        day: usize,
        exercise: &str,
        clock: &dyn Clock,
        rng: &mut R,
    ) -> Result<ToggleOutcome, ValidationError> {
        let workout = plan.workout(day)?;
        if !workout.has_exercise(exercise) {
            return Err(ValidationError::UnknownExercise {
                day: workout.day.clone(),
                exercise: exercise.to_string(),
            });
        }

        let done = progress.toggle(day, exercise);
        let done_count = progress.done_count(day);
        let total = workout.exercise_count();
        tracing::debug!(day = %workout.day, exercise, done, done_count, total, "exercise toggled");

        let completion = if total > 0 && done_count == total {
            match self.complete_day(profile, clock, rng) {
                Ok(completion) => completion,
                Err(e) => {
                    progress.toggle(day, exercise);
                    return Err(e);
                }
            }
        } else {
            None
        };

        Ok(ToggleOutcome {
            day,
            exercise: exercise.to_string(),
            done,
            done_count,
            total,
            completion,
        })
    }

    /// Book today as completed.
    ///
    /// Returns `None` when today is already in `completed_days`, so repeated
    /// calls never stack rewards. Fails when a later date is already booked
    /// (the clock went backwards), leaving the profile untouched.
    pub fn complete_day<R: Rng + ?Sized>(
        &self,
        profile: &mut UserProfile,
        clock: &dyn Clock,
        rng: &mut R,
    ) -> Result<Option<DayCompletion>, ValidationError> {
        let today = clock.today();
        if profile.has_completed(today) {
            tracing::debug!(%today, "day already completed");
            return Ok(None);
        }
        if let Some(last) = profile.last_completed_day().filter(|last| *last > today) {
            return Err(ValidationError::CompletionBeforeLatest { date: today, latest: last });
        }

        let previous_streak = profile.streak;
        profile.completed_days.insert(today);
        let streak = run_ending_at(&profile.completed_days, today);

        let base_reward = self.policy.base_reward;
        let reward = self.policy.is_milestone(streak).then(|| RewardNotification {
            day: streak,
            diamonds: self.policy.roll_bonus(rng),
        });

        profile.streak = streak;
        profile.credit(base_reward + reward.map_or(0, |r| r.diamonds));

        let notification = match reward {
            Some(reward) => Notification::new(
                NotificationKind::MilestoneReward(reward),
                clock.now(),
                self.policy.reward_banner_ms,
            ),
            None => Notification::new(
                NotificationKind::DayCompleted {
                    date: today,
                    streak,
                    diamonds: base_reward,
                },
                clock.now(),
                self.policy.completion_banner_ms,
            ),
        };

        tracing::info!(%today, previous_streak, streak, base_reward, "day completed");
        if let Some(reward) = reward {
            tracing::info!(streak, bonus = reward.diamonds, "milestone chest opened");
        }

        Ok(Some(DayCompletion {
            date: today,
            previous_streak,
            streak,
            base_reward,
            reward,
            notification,
        }))
    }
}

/// Length of the run of consecutive dates in `days` that ends at `end`.
pub fn run_ending_at(days: &BTreeSet<NaiveDate>, end: NaiveDate) -> u32 {
    let mut len = 0;
    let mut cursor = Some(end);
    while let Some(date) = cursor.filter(|d| days.contains(d)) {
        len += 1;
        cursor = date.pred_opt();
    }
    len
}

/// Streak as it stands on `today`: the run ending at the latest completion,
/// or zero once that completion is older than yesterday.
pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    match days.iter().next_back() {
        Some(&last) if Some(last) == today.pred_opt() || last >= today => run_ending_at(days, last),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::clock::FixedClock;
    use crate::plan::fixtures::plan_with_counts;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn rng() -> Pcg64 {
        Pcg64::seed_from_u64(42)
    }

    fn profile_with(days: &[&str], streak: u32) -> UserProfile {
        let mut profile = UserProfile::new("Ana");
        profile.completed_days = days.iter().map(|d| date(d)).collect();
        profile.streak = streak;
        profile
    }

    #[test]
    fn complete_day_is_idempotent_per_date() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let mut profile = UserProfile::new("Ana");
        let mut rng = rng();

        assert!(tracker.complete_day(&mut profile, &clock, &mut rng).unwrap().is_some());
        let after_first = profile.clone();
        assert!(tracker.complete_day(&mut profile, &clock, &mut rng).unwrap().is_none());
        assert_eq!(profile, after_first);
        assert_eq!(profile.diamonds, 15);
        assert_eq!(profile.streak, 1);
    }

    #[test]
    fn first_completion_starts_streak() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-01-01"));
        let mut profile = UserProfile::new("Ana");

        let done = tracker.complete_day(&mut profile, &clock, &mut rng()).unwrap().unwrap();
        assert_eq!(done.previous_streak, 0);
        assert_eq!(done.streak, 1);
        assert_eq!(done.reward, None);
        assert_eq!(profile.completed_days.len(), 1);
    }

    #[test]
    fn yesterday_continues_streak() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let mut profile = profile_with(&["2024-07-21"], 1);

        let done = tracker.complete_day(&mut profile, &clock, &mut rng()).unwrap().unwrap();
        assert_eq!(done.streak, 2);
        assert_eq!(profile.streak, 2);
    }

    #[test]
    fn gap_resets_streak() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let mut profile = profile_with(&["2024-07-18", "2024-07-19", "2024-07-20"], 3);

        let done = tracker.complete_day(&mut profile, &clock, &mut rng()).unwrap().unwrap();
        assert_eq!(done.previous_streak, 3);
        assert_eq!(done.streak, 1);
        assert_eq!(profile.diamonds, 15);
    }

    #[test]
    fn completion_before_latest_booked_date_is_rejected() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let mut profile = profile_with(&["2024-07-21", "2024-07-25"], 1);
        let before = profile.clone();

        let err = tracker
            .complete_day(&mut profile, &clock, &mut rng())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::CompletionBeforeLatest {
                date: date("2024-07-22"),
                latest: date("2024-07-25"),
            }
        );
        assert_eq!(profile, before);
        let latest = profile.last_completed_day().unwrap();
        assert_eq!(profile.streak, run_ending_at(&profile.completed_days, latest));
    }

    #[test]
    fn rejected_completion_undoes_the_toggle() {
        let tracker = StreakTracker::default();
        let plan = plan_with_counts([1, 0, 0, 0, 0, 0, 0]);
        let clock = FixedClock::on(date("2024-07-22"));
        let mut profile = profile_with(&["2024-07-25"], 1);
        let mut progress = DayProgress::new();

        let result = tracker.toggle_exercise(
            &mut profile,
            &plan,
            &mut progress,
            0,
            "Exercise 1",
            &clock,
            &mut rng(),
        );
        assert!(matches!(result, Err(ValidationError::CompletionBeforeLatest { .. })));
        assert_eq!(progress.done_count(0), 0);
        assert_eq!(profile.completed_days.len(), 1);
    }

    #[test]
    fn streak_is_recomputed_from_history() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        // Stored streak is stale; the dates are the source of truth.
        let mut profile = profile_with(&["2024-07-20", "2024-07-21"], 9);

        let done = tracker.complete_day(&mut profile, &clock, &mut rng()).unwrap().unwrap();
        assert_eq!(done.streak, 3);
    }

    #[test]
    fn month_and_year_boundaries_are_consecutive() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2025-01-01"));
        let mut profile = profile_with(&["2024-12-30", "2024-12-31"], 2);

        let done = tracker.complete_day(&mut profile, &clock, &mut rng()).unwrap().unwrap();
        assert_eq!(done.streak, 3);
    }

    #[test]
    fn milestone_adds_bonus_in_range() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let mut profile = profile_with(
            &["2024-07-18", "2024-07-19", "2024-07-20", "2024-07-21"],
            4,
        );

        let done = tracker.complete_day(&mut profile, &clock, &mut rng()).unwrap().unwrap();
        assert_eq!(done.streak, 5);
        let reward = done.reward.expect("milestone reward");
        assert_eq!(reward.day, 5);
        assert!((50..=200).contains(&reward.diamonds));
        assert_eq!(profile.diamonds, 15 + reward.diamonds);
        assert_eq!(done.notification.reward(), Some(reward));
        assert_eq!(done.notification.display_ms, 4000);
    }

    #[test]
    fn non_milestone_adds_exactly_base() {
        let tracker = StreakTracker::default();
        let mut clock = FixedClock::on(date("2024-07-01"));
        let mut profile = UserProfile::new("Ana");
        let mut rng = rng();

        for expected in 1..=4 {
            let done = tracker.complete_day(&mut profile, &clock, &mut rng).unwrap().unwrap();
            assert_eq!(done.streak, expected);
            assert_eq!(done.total_diamonds(), 15);
            assert_eq!(done.notification.display_ms, 3500);
            clock.advance_days(1);
        }
        assert_eq!(profile.diamonds, 60);
    }

    #[test]
    fn spec_example_scenario() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let plan = plan_with_counts([4, 4, 4, 4, 4, 0, 0]);
        let mut profile = profile_with(&["2024-07-20", "2024-07-21"], 2);
        let mut progress = DayProgress::new();
        let mut rng = rng();
        let day = plan.day_index_for(clock.today());

        let mut completions = Vec::new();
        for n in 1..=4 {
            let outcome = tracker
                .toggle_exercise(
                    &mut profile,
                    &plan,
                    &mut progress,
                    day,
                    &format!("Exercise {n}"),
                    &clock,
                    &mut rng,
                )
                .unwrap();
            completions.push(outcome.completion);
        }

        assert!(completions[..3].iter().all(Option::is_none));
        assert!(completions[3].is_some());
        assert_eq!(profile.streak, 3);
        assert_eq!(profile.diamonds, 15);
        assert!(profile.has_completed(date("2024-07-22")));
    }

    #[test]
    fn retoggling_after_completion_does_not_double_reward() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let plan = plan_with_counts([2; 7]);
        let mut profile = UserProfile::new("Ana");
        let mut progress = DayProgress::new();
        let mut rng = rng();

        let mut toggle = |name: &str, profile: &mut UserProfile, progress: &mut DayProgress| {
            tracker
                .toggle_exercise(profile, &plan, progress, 0, name, &clock, &mut rng)
                .unwrap()
        };

        assert!(toggle("Exercise 1", &mut profile, &mut progress).completion.is_none());
        assert!(toggle("Exercise 2", &mut profile, &mut progress).completion.is_some());

        let off = toggle("Exercise 2", &mut profile, &mut progress);
        assert!(!off.done);
        assert_eq!(off.done_count, 1);
        // Unticking keeps the booked day.
        assert!(profile.has_completed(date("2024-07-22")));

        let on = toggle("Exercise 2", &mut profile, &mut progress);
        assert_eq!(on.done_count, 2);
        assert!(on.completion.is_none());
        assert_eq!(profile.diamonds, 15);
        assert_eq!(profile.streak, 1);
    }

    #[test]
    fn same_exercise_twice_is_not_progress() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let plan = plan_with_counts([2; 7]);
        let mut profile = UserProfile::new("Ana");
        let mut progress = DayProgress::new();
        let mut rng = rng();

        for _ in 0..3 {
            tracker
                .toggle_exercise(&mut profile, &plan, &mut progress, 0, "Exercise 1", &clock, &mut rng)
                .unwrap();
        }
        assert_eq!(progress.done_count(0), 1);
        assert!(profile.completed_days.is_empty());
    }

    #[test]
    fn rest_day_never_auto_completes() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let plan = plan_with_counts([0; 7]);
        let mut profile = UserProfile::new("Ana");
        let mut progress = DayProgress::new();

        let err = tracker
            .toggle_exercise(&mut profile, &plan, &mut progress, 0, "Plank", &clock, &mut rng())
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownExercise { .. }));
        assert!(profile.completed_days.is_empty());

        // Explicit acknowledgement is the only way through.
        assert!(tracker.complete_day(&mut profile, &clock, &mut rng()).unwrap().is_some());
    }

    #[test]
    fn bad_day_index_is_rejected_without_change() {
        let tracker = StreakTracker::default();
        let clock = FixedClock::on(date("2024-07-22"));
        let plan = plan_with_counts([1; 7]);
        let mut profile = UserProfile::new("Ana");
        let mut progress = DayProgress::new();

        let err = tracker
            .toggle_exercise(&mut profile, &plan, &mut progress, 9, "Exercise 1", &clock, &mut rng())
            .unwrap_err();
        assert_eq!(err, ValidationError::DayOutOfBounds { index: 9, len: 7 });
        assert_eq!(progress, DayProgress::new());
    }

    #[test]
    fn current_streak_expires_after_a_missed_day() {
        let days: BTreeSet<_> = ["2024-07-20", "2024-07-21"].iter().map(|d| date(d)).collect();
        assert_eq!(current_streak(&days, date("2024-07-21")), 2);
        assert_eq!(current_streak(&days, date("2024-07-22")), 2);
        assert_eq!(current_streak(&days, date("2024-07-23")), 0);
        assert_eq!(current_streak(&BTreeSet::new(), date("2024-07-23")), 0);
    }
}
