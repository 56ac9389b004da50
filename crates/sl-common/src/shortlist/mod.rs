pub mod diversity;
pub mod review;

use thiserror::Error;

pub use diversity::{assess, shift_after_review, DiversityAssessment, DiversityLine, Standing};
pub use review::{
    apply_action, approved_count, finalize, Confirm, FinalizeOutcome, ReviewAction,
    FINALIZE_WARNING,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortlistError {
    #[error("unknown candidate: {0}")]
    UnknownCandidate(String),
    #[error("no candidates approved")]
    NoApprovedCandidates,
}
