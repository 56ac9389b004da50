pub mod rebalance;
pub mod weights;

pub use rebalance::{rebalance, RebalanceOutcome};
pub use weights::{CriteriaWeights, CriterionWeight, WeightError, DEFAULT_CRITERIA, WEIGHT_TOTAL};
