pub mod config;
pub mod criteria;
pub mod logging;
pub mod notify;
pub mod progress;
pub mod render;
pub mod schedule;
pub mod session;
pub mod shortlist;

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use criteria::CriteriaWeights;

// Commonly used data models for the screening dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisition {
    pub id: String,
    pub title: String,
    pub applications: u32,
    pub screened: u32,
    pub criteria: CriteriaWeights,
}

impl Requisition {
    pub fn sample() -> Self {
        Self {
            id: "frontend-azure-001".into(),
            title: "Senior Frontend Engineer - Azure Portal Team".into(),
            applications: 523,
            screened: 347,
            criteria: CriteriaWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CandidateStatus {
    Approved,
    Pending,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CandidateTier {
    Top,
    Review,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub score: u8,
    pub summary: String,
    pub status: CandidateStatus,
    pub tier: CandidateTier,
}

impl Candidate {
    pub fn new(id: &str, name: &str, score: u8, summary: &str, status: CandidateStatus) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            score,
            summary: summary.to_string(),
            status,
            tier: CandidateTier::Top,
        }
    }

    pub fn sample_shortlist() -> Vec<Self> {
        vec![
            Self::new(
                "sarah",
                "Sarah Kim",
                94,
                "6yr React + startup experience, team lead at Airbnb",
                CandidateStatus::Approved,
            ),
            Self::new(
                "mike",
                "Mike Rodriguez",
                92,
                "MS intern → senior engineer, strong algorithmic background",
                CandidateStatus::Approved,
            ),
            Self::new(
                "lisa",
                "Lisa Wang",
                89,
                "Career changer + bootcamp, impressive portfolio projects",
                CandidateStatus::Pending,
            ),
        ]
    }
}

/// Shortlist representation against the applicant pool, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiversityStats {
    pub women_shortlist: u32,
    pub women_pool: u32,
    pub ur_shortlist: u32,
    pub ur_pool: u32,
}

impl Default for DiversityStats {
    fn default() -> Self {
        Self {
            women_shortlist: 42,
            women_pool: 38,
            ur_shortlist: 23,
            ur_pool: 31,
        }
    }
}

/// All mock data a session works on. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub requisition: Requisition,
    pub candidates: Vec<Candidate>,
    pub diversity: DiversityStats,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            requisition: Requisition::sample(),
            candidates: Candidate::sample_shortlist(),
            diversity: DiversityStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_state_matches_seeded_requisition() {
        let state = DashboardState::default();
        assert_eq!(state.requisition.id, "frontend-azure-001");
        assert_eq!(state.requisition.applications, 523);
        assert_eq!(state.requisition.screened, 347);
        assert_eq!(state.requisition.criteria.total(), 100);
        assert_eq!(state.candidates.len(), 3);
        assert_eq!(
            state
                .candidates
                .iter()
                .filter(|c| c.status == CandidateStatus::Approved)
                .count(),
            2
        );
    }

    #[test]
    fn state_serializes_with_lowercase_enums() {
        let json = serde_json::to_value(DashboardState::default()).unwrap();
        assert_eq!(json["candidates"][2]["status"], "pending");
        assert_eq!(json["candidates"][0]["tier"], "top");
        assert_eq!(json["requisition"]["criteria"]["technical"], 40);
    }

    #[test]
    fn state_with_slider_drift_round_trips() {
        let mut state = DashboardState::default();
        state.requisition.criteria.set_weight("technical", 70).unwrap();
        assert_eq!(state.requisition.criteria.total(), 101);

        let json = serde_json::to_string(&state).unwrap();
        let back: DashboardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
