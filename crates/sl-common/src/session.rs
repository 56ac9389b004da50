use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::criteria::{CriteriaWeights, RebalanceOutcome, WeightError};
use crate::notify::{Notification, NotificationCenter, NotificationKind};
use crate::progress::{self, insights, TickOutcome, SCREENING_COMPLETE};
use crate::schedule::{TimerId, Timeline};
use crate::shortlist::{
    self, Confirm, DiversityAssessment, FinalizeOutcome, ReviewAction, ShortlistError,
    FINALIZE_WARNING,
};
use crate::{CandidateStatus, DashboardState};

pub const COMING_SOON: &str = "Feature coming soon!";
pub const CRITERIA_SAVED: &str = "✓ Criteria saved! AI screening resumed with updated parameters.";
pub const REVIEW_ZONE_LOADING: &str = "Loading review zone candidates...";
pub const REVIEW_ZONE_LOADED: &str = "✓ 23 candidates loaded for review";
pub const REVIEW_ZONE_READY: &str =
    "Review zone candidates are now available for detailed evaluation.";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum View {
    Dashboard,
    Requisitions,
    Candidates,
    Analytics,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Modal {
    CriteriaSetup,
    Shortlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReviewZone {
    Collapsed,
    Loading,
    Loaded,
}

impl ReviewZone {
    pub fn label(self) -> &'static str {
        match self {
            ReviewZone::Collapsed => "Expand review zone",
            ReviewZone::Loading => REVIEW_ZONE_LOADING,
            ReviewZone::Loaded => REVIEW_ZONE_LOADED,
        }
    }
}

/// Dashboard stat cards shown once a shortlist has been handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessMetrics {
    pub time_saved: String,
    pub accuracy: String,
    pub success_rate: String,
    pub throughput: String,
}

impl SuccessMetrics {
    pub fn improved() -> Self {
        Self {
            time_saved: "25.7 hours".into(),
            accuracy: "91%".into(),
            success_rate: "14/16".into(),
            throughput: "+52%".into(),
        }
    }
}

/// Things that happen later, on the session clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    BackgroundTick,
    AcceleratedTick,
    CriteriaSaved,
    ReviewZoneLoaded,
    MetricsRefresh,
    Insight,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Weights(#[from] WeightError),
    #[error(transparent)]
    Shortlist(#[from] ShortlistError),
    #[error("modal not open: {0:?}")]
    ModalClosed(Modal),
}

/// One recruiter's dashboard session over caller-owned mock data.
///
/// Everything time-based runs on the session's [`Timeline`], and every
/// random draw comes from the injected RNG, so a seeded session replays
/// identically.
pub struct Session<R> {
    config: SessionConfig,
    state: DashboardState,
    notifications: NotificationCenter,
    timeline: Timeline<SessionEvent>,
    rng: R,
    view: View,
    open_modals: BTreeSet<Modal>,
    saving: bool,
    accelerated: Option<TimerId>,
    review_zone: ReviewZone,
    success_metrics: Option<SuccessMetrics>,
}

impl Session<StdRng> {
    /// Session over the sample requisition, seeded from `config.seed`.
    pub fn from_config(config: SessionConfig, start: DateTime<Utc>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Session::new(config, DashboardState::default(), rng, start)
    }
}

impl<R: Rng> Session<R> {
    pub fn new(config: SessionConfig, state: DashboardState, rng: R, start: DateTime<Utc>) -> Self {
        let mut timeline = Timeline::new(start);
        timeline.every(config.background_tick, SessionEvent::BackgroundTick);
        timeline.every(config.insight_interval, SessionEvent::Insight);

        info!(
            requisition_id = %state.requisition.id,
            screened = state.requisition.screened,
            applications = state.requisition.applications,
            "session started"
        );

        Self {
            config,
            state,
            notifications: NotificationCenter::default(),
            timeline,
            rng,
            view: View::Dashboard,
            open_modals: BTreeSet::new(),
            saving: false,
            accelerated: None,
            review_zone: ReviewZone::Collapsed,
            success_metrics: None,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn into_state(self) -> DashboardState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.timeline.now()
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.timeline.next_due()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        self.open_modals.contains(&modal)
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_accelerated(&self) -> bool {
        self.accelerated.is_some()
    }

    pub fn review_zone(&self) -> ReviewZone {
        self.review_zone
    }

    pub fn success_metrics(&self) -> Option<&SuccessMetrics> {
        self.success_metrics.as_ref()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn active_notifications(&self) -> Vec<&Notification> {
        self.notifications.active(self.timeline.now()).collect()
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let now = self.timeline.now();
        self.notifications.push(kind, message, now);
    }

    fn require_open(&self, modal: Modal) -> Result<(), SessionError> {
        if self.is_open(modal) {
            Ok(())
        } else {
            Err(SessionError::ModalClosed(modal))
        }
    }

    pub fn navigate(&mut self, view: View) {
        self.view = view;
        debug!(view = view.as_ref(), "navigated");
        if view != View::Dashboard {
            self.notify(NotificationKind::Toast, COMING_SOON);
        }
    }

    /// Open the criteria modal; the sliders show the current weights.
    pub fn open_criteria_setup(&mut self) -> &CriteriaWeights {
        self.open_modals.insert(Modal::CriteriaSetup);
        &self.state.requisition.criteria
    }

    pub fn close_criteria_setup(&mut self) {
        self.open_modals.remove(&Modal::CriteriaSetup);
    }

    /// Slider input: set one weight and rebalance the rest.
    pub fn set_criterion_weight(&mut self, name: &str, value: i64) -> Result<RebalanceOutcome, SessionError> {
        self.require_open(Modal::CriteriaSetup)?;
        let outcome = self.state.requisition.criteria.set_weight(name, value)?;
        info!(
            criterion = name,
            weight = value,
            outcome = outcome.as_ref(),
            criteria = %self.state.requisition.criteria,
            "criterion weight updated"
        );
        Ok(outcome)
    }

    /// Start the simulated save. Returns false when a save is already pending.
    pub fn save_criteria(&mut self) -> Result<bool, SessionError> {
        self.require_open(Modal::CriteriaSetup)?;
        if self.saving {
            return Ok(false);
        }
        self.saving = true;
        self.timeline
            .after(self.config.save_delay, SessionEvent::CriteriaSaved);
        info!(criteria = %self.state.requisition.criteria, "saving criteria");
        Ok(true)
    }

    /// Open the shortlist modal and return the refreshed diversity lines.
    pub fn open_shortlist(&mut self) -> DiversityAssessment {
        self.open_modals.insert(Modal::Shortlist);
        shortlist::assess(&self.state.diversity)
    }

    pub fn close_shortlist(&mut self) {
        self.open_modals.remove(&Modal::Shortlist);
    }

    pub fn diversity(&self) -> DiversityAssessment {
        shortlist::assess(&self.state.diversity)
    }

    pub fn review(&mut self, candidate_id: &str, action: ReviewAction) -> Result<CandidateStatus, SessionError> {
        self.require_open(Modal::Shortlist)?;
        let status = shortlist::apply_action(&mut self.state.candidates, candidate_id, action)?;
        self.notify(NotificationKind::Feedback, action.feedback());

        let approved = shortlist::approved_count(&self.state.candidates);
        shortlist::shift_after_review(&mut self.state.diversity, approved);
        Ok(status)
    }

    pub fn finalize_shortlist<C>(&mut self, confirmer: &mut C) -> Result<FinalizeOutcome, SessionError>
    where
        C: Confirm + ?Sized,
    {
        self.require_open(Modal::Shortlist)?;
        let outcome = match shortlist::finalize(&self.state.candidates, confirmer) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "shortlist not finalized");
                self.notify(NotificationKind::Toast, FINALIZE_WARNING);
                return Err(err.into());
            }
        };

        if let Some(message) = outcome.message() {
            self.close_shortlist();
            self.notify(NotificationKind::Success, message);
            self.timeline
                .after(self.config.metrics_delay, SessionEvent::MetricsRefresh);
        }
        Ok(outcome)
    }

    pub fn escape(&mut self) {
        self.open_modals.clear();
    }

    /// A click on a modal's backdrop closes that modal.
    pub fn click_backdrop(&mut self, modal: Modal) {
        self.open_modals.remove(&modal);
    }

    pub fn expand_review_zone(&mut self) -> ReviewZone {
        if self.review_zone == ReviewZone::Collapsed {
            self.review_zone = ReviewZone::Loading;
            self.timeline
                .after(self.config.review_zone_delay, SessionEvent::ReviewZoneLoaded);
        }
        self.review_zone
    }

    pub fn show_insight(&mut self) -> &'static str {
        let insight = insights::pick(&mut self.rng);
        self.notify(NotificationKind::Toast, insight);
        insight
    }

    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.timeline.now() + by;
        self.advance_to(until)
    }

    /// Run every event due up to `until`, then drop expired notifications.
    /// Returns how many events fired.
    pub fn advance_to(&mut self, until: DateTime<Utc>) -> usize {
        let mut fired = 0;
        while let Some((id, event)) = self.timeline.pop_due(until) {
            self.handle(id, event);
            fired += 1;
        }
        self.timeline.advance_to(until);
        self.notifications.prune(until);
        fired
    }

    fn handle(&mut self, id: TimerId, event: SessionEvent) {
        match event {
            SessionEvent::BackgroundTick => {
                progress::background_tick(&mut self.state.requisition, &mut self.rng);
            }
            SessionEvent::AcceleratedTick => {
                let outcome = progress::accelerated_tick(&mut self.state.requisition, &mut self.rng);
                if matches!(outcome, TickOutcome::Completed { .. } | TickOutcome::Idle) {
                    self.timeline.cancel(id);
                    self.accelerated = None;
                    self.notify(NotificationKind::Toast, SCREENING_COMPLETE);
                }
            }
            SessionEvent::CriteriaSaved => {
                self.saving = false;
                self.close_criteria_setup();
                self.notify(NotificationKind::Toast, CRITERIA_SAVED);
                if self.accelerated.is_none() {
                    let timer = self
                        .timeline
                        .every(self.config.accelerated_tick, SessionEvent::AcceleratedTick);
                    self.accelerated = Some(timer);
                }
                info!(criteria = %self.state.requisition.criteria, "criteria saved");
            }
            SessionEvent::ReviewZoneLoaded => {
                self.review_zone = ReviewZone::Loaded;
                self.notify(NotificationKind::Toast, REVIEW_ZONE_READY);
            }
            SessionEvent::MetricsRefresh => {
                self.success_metrics = Some(SuccessMetrics::improved());
                info!("dashboard metrics refreshed");
            }
            SessionEvent::Insight => {
                self.show_insight();
            }
        }
    }
}
