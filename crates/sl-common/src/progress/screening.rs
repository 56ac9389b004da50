use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Requisition;

/// Applications screened per background tick.
pub const BACKGROUND_STEP: RangeInclusive<u32> = 1..=3;
/// Applications screened per tick once criteria have been saved.
pub const ACCELERATED_STEP: RangeInclusive<u32> = 5..=12;

pub const SCREENING_COMPLETE: &str = "🎯 Screening complete! All candidates processed.";

/// Applications screened per hour of remaining work.
const APPLICATIONS_PER_HOUR: f64 = 100.0;
const MIN_REMAINING_HOURS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickOutcome {
    /// Nothing left to screen.
    Idle,
    Advanced { screened: u32 },
    /// This tick reached the total.
    Completed { screened: u32 },
}

pub fn percentage(requisition: &Requisition) -> f64 {
    if requisition.applications == 0 {
        return 0.0;
    }
    f64::from(requisition.screened) / f64::from(requisition.applications) * 100.0
}

pub fn progress_text(requisition: &Requisition) -> String {
    format!(
        "{} of {} applications screened",
        requisition.screened, requisition.applications
    )
}

pub fn time_remaining_hours(requisition: &Requisition) -> f64 {
    let remaining = requisition.applications.saturating_sub(requisition.screened);
    (f64::from(remaining) / APPLICATIONS_PER_HOUR).max(MIN_REMAINING_HOURS)
}

pub fn time_remaining_text(requisition: &Requisition) -> String {
    format!("{:.1} hours", time_remaining_hours(requisition))
}

fn advance<R>(requisition: &mut Requisition, step: RangeInclusive<u32>, rng: &mut R) -> TickOutcome
where
    R: Rng + ?Sized,
{
    if requisition.screened >= requisition.applications {
        return TickOutcome::Idle;
    }

    let added = rng.gen_range(step);
    requisition.screened = (requisition.screened + added).min(requisition.applications);

    if requisition.screened == requisition.applications {
        TickOutcome::Completed {
            screened: requisition.screened,
        }
    } else {
        TickOutcome::Advanced {
            screened: requisition.screened,
        }
    }
}

/// Slow ambient progress while the dashboard is open.
pub fn background_tick<R: Rng + ?Sized>(requisition: &mut Requisition, rng: &mut R) -> TickOutcome {
    let outcome = advance(requisition, BACKGROUND_STEP, rng);
    debug!(requisition_id = %requisition.id, ?outcome, "background screening tick");
    outcome
}

/// Fast progress after the recruiter saves new criteria.
pub fn accelerated_tick<R: Rng + ?Sized>(requisition: &mut Requisition, rng: &mut R) -> TickOutcome {
    let outcome = advance(requisition, ACCELERATED_STEP, rng);
    match outcome {
        TickOutcome::Completed { screened } => {
            info!(requisition_id = %requisition.id, screened, "screening complete")
        }
        _ => debug!(requisition_id = %requisition.id, ?outcome, "accelerated screening tick"),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn progress_text_and_percentage() {
        let requisition = Requisition::sample();
        assert_eq!(progress_text(&requisition), "347 of 523 applications screened");
        let pct = percentage(&requisition);
        assert!((pct - 66.347_992).abs() < 1e-6);
    }

    #[test]
    fn percentage_of_empty_requisition_is_zero() {
        let mut requisition = Requisition::sample();
        requisition.applications = 0;
        requisition.screened = 0;
        assert_eq!(percentage(&requisition), 0.0);
    }

    #[test]
    fn time_remaining_has_floor() {
        let mut requisition = Requisition::sample();
        assert_eq!(time_remaining_text(&requisition), "1.8 hours");

        requisition.screened = requisition.applications;
        assert_eq!(time_remaining_hours(&requisition), 0.1);
        assert_eq!(time_remaining_text(&requisition), "0.1 hours");
    }

    #[test]
    fn background_tick_stays_within_step() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut requisition = Requisition::sample();
        for _ in 0..20 {
            let before = requisition.screened;
            background_tick(&mut requisition, &mut rng);
            let added = requisition.screened - before;
            assert!(BACKGROUND_STEP.contains(&added), "added {added}");
        }
    }

    #[test]
    fn accelerated_ticks_clamp_and_complete() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut requisition = Requisition::sample();
        requisition.screened = requisition.applications - 3;

        let outcome = accelerated_tick(&mut requisition, &mut rng);
        assert_eq!(outcome, TickOutcome::Completed { screened: 523 });
        assert_eq!(requisition.screened, 523);

        assert_eq!(accelerated_tick(&mut requisition, &mut rng), TickOutcome::Idle);
        assert_eq!(background_tick(&mut requisition, &mut rng), TickOutcome::Idle);
    }
}
