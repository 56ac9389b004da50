use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use tracing::debug;

use crate::DiversityStats;

/// Women share stays "good" while within this many points of the pool.
pub const WOMEN_TOLERANCE: u32 = 2;
/// Underrepresented share stays "good" while within this many points of the pool.
pub const UR_TOLERANCE: u32 = 5;

const WOMEN_SHORTLIST_CEILING: u32 = 45;
const UR_SHORTLIST_FLOOR: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Standing {
    Good,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiversityLine {
    pub label: &'static str,
    pub text: String,
    pub standing: Standing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiversityAssessment {
    pub women: DiversityLine,
    pub underrepresented: DiversityLine,
}

fn standing(shortlist: u32, pool: u32, tolerance: u32) -> Standing {
    if shortlist >= pool.saturating_sub(tolerance) {
        Standing::Good
    } else {
        Standing::Warning
    }
}

pub fn assess(stats: &DiversityStats) -> DiversityAssessment {
    DiversityAssessment {
        women: DiversityLine {
            label: "Women representation",
            text: format!(
                "{}% women (vs {}% applicant pool)",
                stats.women_shortlist, stats.women_pool
            ),
            standing: standing(stats.women_shortlist, stats.women_pool, WOMEN_TOLERANCE),
        },
        underrepresented: DiversityLine {
            label: "Underrepresented minorities",
            text: format!(
                "{}% (vs {}% applicant pool)",
                stats.ur_shortlist, stats.ur_pool
            ),
            standing: standing(stats.ur_shortlist, stats.ur_pool, UR_TOLERANCE),
        },
    }
}

/// Nudge the simulated shortlist mix after a review decision.
///
/// Only moves when something is approved. Returns whether it moved.
pub fn shift_after_review(stats: &mut DiversityStats, approved: usize) -> bool {
    if approved == 0 {
        return false;
    }

    stats.women_shortlist = (stats.women_shortlist + 1).min(WOMEN_SHORTLIST_CEILING);
    stats.ur_shortlist = stats.ur_shortlist.saturating_sub(1).max(UR_SHORTLIST_FLOOR);

    debug!(
        women_shortlist = stats.women_shortlist,
        ur_shortlist = stats.ur_shortlist,
        "diversity stats shifted"
    );
    true
}
