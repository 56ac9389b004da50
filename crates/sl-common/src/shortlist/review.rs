use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use tracing::info;

use super::ShortlistError;
use crate::{Candidate, CandidateStatus};

/// Recruiter decision on a shortlisted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Hold,
    Reject,
}

impl ReviewAction {
    pub fn status(self) -> CandidateStatus {
        match self {
            ReviewAction::Approve => CandidateStatus::Approved,
            ReviewAction::Hold => CandidateStatus::Pending,
            ReviewAction::Reject => CandidateStatus::Rejected,
        }
    }

    /// Banner text shown right after the decision.
    pub fn feedback(self) -> &'static str {
        match self {
            ReviewAction::Approve => "✓ Candidate approved for interview",
            ReviewAction::Hold => "? Candidate marked for further review",
            ReviewAction::Reject => "× Candidate moved to rejected list",
        }
    }
}

pub fn apply_action(
    candidates: &mut [Candidate],
    candidate_id: &str,
    action: ReviewAction,
) -> Result<CandidateStatus, ShortlistError> {
    let candidate = candidates
        .iter_mut()
        .find(|candidate| candidate.id == candidate_id)
        .ok_or_else(|| ShortlistError::UnknownCandidate(candidate_id.to_string()))?;

    let previous = candidate.status;
    candidate.status = action.status();

    info!(
        candidate_id,
        action = action.as_ref(),
        from = previous.as_ref(),
        to = candidate.status.as_ref(),
        "candidate reviewed"
    );

    Ok(candidate.status)
}

pub fn approved_count(candidates: &[Candidate]) -> usize {
    candidates
        .iter()
        .filter(|candidate| candidate.status == CandidateStatus::Approved)
        .count()
}

/// Asks the recruiter to confirm a hand-off.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum FinalizeOutcome {
    Sent { count: usize },
    Cancelled,
}

impl FinalizeOutcome {
    pub fn message(&self) -> Option<String> {
        match self {
            FinalizeOutcome::Sent { count } => Some(format!(
                "🎉 Shortlist sent! {count} candidates forwarded to Hiring Manager."
            )),
            FinalizeOutcome::Cancelled => None,
        }
    }
}

pub const FINALIZE_WARNING: &str = "⚠️ Please approve at least one candidate before finalizing.";

/// Send the approved candidates to the hiring manager once confirmed.
pub fn finalize<C>(candidates: &[Candidate], confirmer: &mut C) -> Result<FinalizeOutcome, ShortlistError>
where
    C: Confirm + ?Sized,
{
    let count = approved_count(candidates);
    if count == 0 {
        return Err(ShortlistError::NoApprovedCandidates);
    }

    let prompt = format!("Send {count} candidates to Hiring Manager for review?");
    if confirmer.confirm(&prompt) {
        info!(approved = count, "shortlist finalized");
        Ok(FinalizeOutcome::Sent { count })
    } else {
        info!(approved = count, "shortlist finalize cancelled");
        Ok(FinalizeOutcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_map_to_statuses() {
        let mut candidates = Candidate::sample_shortlist();

        let status = apply_action(&mut candidates, "lisa", ReviewAction::Approve).unwrap();
        assert_eq!(status, CandidateStatus::Approved);

        apply_action(&mut candidates, "sarah", ReviewAction::Reject).unwrap();
        apply_action(&mut candidates, "mike", ReviewAction::Hold).unwrap();

        let statuses: Vec<_> = candidates.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                CandidateStatus::Rejected,
                CandidateStatus::Pending,
                CandidateStatus::Approved
            ]
        );
    }

    #[test]
    fn unknown_candidate_is_reported() {
        let mut candidates = Candidate::sample_shortlist();
        assert_eq!(
            apply_action(&mut candidates, "nobody", ReviewAction::Approve),
            Err(ShortlistError::UnknownCandidate("nobody".into()))
        );
    }

    #[test]
    fn action_parses_from_lowercase_name() {
        assert_eq!("hold".parse::<ReviewAction>().unwrap(), ReviewAction::Hold);
        assert!("maybe".parse::<ReviewAction>().is_err());
    }

    #[test]
    fn finalize_requires_an_approval() {
        let mut candidates = Candidate::sample_shortlist();
        for candidate in candidates.iter_mut() {
            candidate.status = CandidateStatus::Pending;
        }
        let mut asked = false;
        let result = finalize(&candidates, &mut |_: &str| {
            asked = true;
            true
        });
        assert_eq!(result, Err(ShortlistError::NoApprovedCandidates));
        assert!(!asked);
    }

    #[test]
    fn finalize_asks_with_approved_count() {
        let candidates = Candidate::sample_shortlist();
        let mut prompt_seen = String::new();
        let outcome = finalize(&candidates, &mut |prompt: &str| {
            prompt_seen = prompt.to_string();
            true
        })
        .unwrap();

        assert_eq!(prompt_seen, "Send 2 candidates to Hiring Manager for review?");
        assert_eq!(outcome, FinalizeOutcome::Sent { count: 2 });
        assert_eq!(
            outcome.message().as_deref(),
            Some("🎉 Shortlist sent! 2 candidates forwarded to Hiring Manager.")
        );
    }

    #[test]
    fn declined_confirmation_cancels() {
        let candidates = Candidate::sample_shortlist();
        let outcome = finalize(&candidates, &mut |_: &str| false).unwrap();
        assert_eq!(outcome, FinalizeOutcome::Cancelled);
        assert_eq!(outcome.message(), None);
    }
}
