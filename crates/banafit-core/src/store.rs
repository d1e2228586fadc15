//! Session store.
//!
//! All mutations of the logged-in state go through [`AppStore::dispatch`]
//! with an [`Action`]. Each action either succeeds and returns the events it
//! produced, or fails and leaves the state untouched.
//!
//! ```ignore
//! let mut store = AppStore::new(config, Box::new(SystemClock));
//! store.dispatch(Action::Register { name: "Ana".into() })?;
//! store.dispatch(Action::ImportPlan(plan))?;
//! let events = store.dispatch(Action::ToggleExercise { day: 0, exercise: "Squats".into() })?;
//! ```

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::error::{Result, StoreError};
use crate::events::Event;
use crate::gamification::{
    wallet, Clock, CosmeticItem, DayCompletion, Notification, NotificationKind,
    RewardNotification, StreakTracker, WalletConfig,
};
use crate::plan::WorkoutPlan;
use crate::profile::{ProfileDetails, UserProfile};
use crate::storage::{Config, SessionState};

/// Mutations accepted by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Register { name: String },
    Login { email: String },
    /// Onboarding answers together with the plan generated from them.
    CompleteOnboarding {
        details: ProfileDetails,
        plan: WorkoutPlan,
    },
    ImportPlan(WorkoutPlan),
    Logout,
    ToggleExercise { day: usize, exercise: String },
    /// Explicit completion, the only way to complete a rest day.
    CompleteDay,
    WatchAd,
    BuyPack { pack: usize },
    ClaimSocial(wallet::SocialPlatform),
    PurchaseCosmetic(CosmeticItem),
    ActivateCosmetic(CosmeticItem),
    DeactivateFrame,
    DismissNotification,
}

pub struct AppStore {
    state: SessionState,
    tracker: StreakTracker,
    wallet: WalletConfig,
    clock: Box<dyn Clock>,
    rng: Pcg64,
}

impl AppStore {
    pub fn new(config: Config, clock: Box<dyn Clock>) -> Self {
        Self::with_state(SessionState::default(), config, clock)
    }

    /// Resume a stored session.
    pub fn with_state(state: SessionState, config: Config, clock: Box<dyn Clock>) -> Self {
        Self {
            state,
            tracker: StreakTracker::new(config.rewards),
            wallet: config.wallet,
            clock,
            rng: Pcg64::from_entropy(),
        }
    }

    /// Use a fixed seed for milestone bonuses.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = Pcg64::seed_from_u64(seed);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.state.profile.as_ref()
    }

    pub fn plan(&self) -> Option<&WorkoutPlan> {
        self.state.plan.as_ref()
    }

    pub fn tracker(&self) -> &StreakTracker {
        &self.tracker
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Plan day for today's date.
    pub fn today_index(&self) -> Option<usize> {
        self.plan().map(|p| p.day_index_for(self.clock.today()))
    }

    /// The pending banner, dropping it once its display time has passed.
    pub fn active_notification(&mut self) -> Option<&Notification> {
        let now: DateTime<Utc> = self.clock.now();
        if self
            .state
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.state.notification = None;
        }
        self.state.notification.as_ref()
    }

    /// Milestone payload for the streak modal, while its banner is up.
    pub fn last_reward(&mut self) -> Option<RewardNotification> {
        self.active_notification().and_then(Notification::reward)
    }

    // ── Actions ──────────────────────────────────────────────────────

    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Event>> {
        let result = self.apply(action);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "action rejected");
        }
        result
    }

    fn apply(&mut self, action: Action) -> Result<Vec<Event>> {
        match action {
            Action::Register { name } => {
                let profile = UserProfile::new(name.trim());
                let name = profile.name.clone();
                self.start_session(profile);
                tracing::info!(%name, "registered");
                Ok(vec![Event::Registered { name }])
            }
            Action::Login { email } => {
                let profile = UserProfile::from_email(&email);
                let name = profile.name.clone();
                self.start_session(profile);
                tracing::info!(%name, "logged in");
                Ok(vec![Event::LoggedIn { name }])
            }
            Action::CompleteOnboarding { details, plan } => {
                plan.validate()?;
                let profile = self.profile_mut()?;
                profile.apply_details(details);
                let imported = self.install_plan(plan);
                Ok(vec![Event::OnboardingCompleted, imported])
            }
            Action::ImportPlan(plan) => {
                plan.validate()?;
                self.profile_mut()?;
                Ok(vec![self.install_plan(plan)])
            }
            Action::Logout => {
                self.state = SessionState::default();
                tracing::info!("logged out");
                Ok(vec![Event::LoggedOut])
            }
            Action::ToggleExercise { day, exercise } => self.toggle_exercise(day, &exercise),
            Action::CompleteDay => {
                let today = self.clock.today();
                let state = &mut self.state;
                let profile = state.profile.as_mut().ok_or(StoreError::NoSession)?;
                match self
                    .tracker
                    .complete_day(profile, self.clock.as_ref(), &mut self.rng)?
                {
                    Some(completion) => Ok(self.record_completion(completion)),
                    None => Ok(vec![Event::DayAlreadyCompleted { date: today }]),
                }
            }
            Action::WatchAd => {
                let config = self.wallet.clone();
                let credit = wallet::watch_ad(self.profile_mut()?, &config);
                Ok(self.record_credit(credit))
            }
            Action::BuyPack { pack } => {
                let credit = wallet::buy_pack(self.profile_mut()?, pack)?;
                Ok(self.record_credit(credit))
            }
            Action::ClaimSocial(platform) => {
                let config = self.wallet.clone();
                let credit = wallet::claim_social(self.profile_mut()?, platform, &config)?;
                Ok(self.record_credit(credit))
            }
            Action::PurchaseCosmetic(item) => {
                let profile = self.profile_mut()?;
                if profile.inventory.owns(item) {
                    return Err(StoreError::AlreadyOwned(item).into());
                }
                let price = item.price();
                let balance = profile.spend(price)?;
                profile.inventory.grant(item)?;
                tracing::info!(%item, price, balance, "cosmetic purchased");
                Ok(vec![Event::CosmeticPurchased {
                    item,
                    price,
                    balance,
                }])
            }
            Action::ActivateCosmetic(item) => {
                let activation = self.profile_mut()?.inventory.activate(item)?;
                Ok(vec![Event::CosmeticActivated { activation }])
            }
            Action::DeactivateFrame => {
                let frame = self.profile_mut()?.inventory.clear_frame();
                Ok(vec![Event::FrameCleared { frame }])
            }
            Action::DismissNotification => {
                self.state.notification = None;
                Ok(vec![Event::NotificationDismissed])
            }
        }
    }

    fn profile_mut(&mut self) -> Result<&mut UserProfile, StoreError> {
        self.state.profile.as_mut().ok_or(StoreError::NoSession)
    }

    fn start_session(&mut self, profile: UserProfile) {
        self.state = SessionState {
            profile: Some(profile),
            ..SessionState::default()
        };
    }

    fn install_plan(&mut self, plan: WorkoutPlan) -> Event {
        let event = Event::PlanImported {
            rest_days: plan.rest_days(),
            weekly_calories: plan.weekly_calories(),
        };
        self.state.plan = Some(plan);
        self.state.progress.clear();
        event
    }

    fn toggle_exercise(&mut self, day: usize, exercise: &str) -> Result<Vec<Event>> {
        let state = &mut self.state;
        let profile = state.profile.as_mut().ok_or(StoreError::NoSession)?;
        let plan = state.plan.as_ref().ok_or(StoreError::NoPlan)?;

        let outcome = self.tracker.toggle_exercise(
            profile,
            plan,
            &mut state.progress,
            day,
            exercise,
            self.clock.as_ref(),
            &mut self.rng,
        )?;

        let mut events = vec![Event::ExerciseToggled {
            day: outcome.day,
            exercise: outcome.exercise,
            done: outcome.done,
            done_count: outcome.done_count,
            total: outcome.total,
        }];
        if let Some(completion) = outcome.completion {
            events.extend(self.record_completion(completion));
        }
        Ok(events)
    }

    fn record_completion(&mut self, completion: DayCompletion) -> Vec<Event> {
        let mut events = vec![Event::DayCompleted {
            date: completion.date,
            previous_streak: completion.previous_streak,
            streak: completion.streak,
            diamonds: completion.total_diamonds(),
        }];
        if let Some(reward) = completion.reward {
            events.push(Event::MilestoneReached(reward));
        }
        self.state.notification = Some(completion.notification);
        events
    }

    fn record_credit(&mut self, credit: wallet::Credit) -> Vec<Event> {
        tracing::info!(amount = credit.amount, balance = credit.balance, "diamonds earned");
        self.state.notification = Some(Notification::new(
            NotificationKind::DiamondsEarned {
                amount: credit.amount,
                source: credit.source,
            },
            self.clock.now(),
            self.tracker.policy().completion_banner_ms,
        ));
        vec![Event::DiamondsEarned(credit)]
    }
}
