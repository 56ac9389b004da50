use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use super::weights::{CriteriaWeights, CriterionWeight, WeightError, WEIGHT_TOTAL};

/// Which path a rebalance took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RebalanceOutcome {
    /// The new value plus the others already made 100.
    Balanced,
    /// The others were rescaled proportionally.
    Scaled,
    /// The others summed to zero and were left alone.
    ZeroOthers,
}

/// Pure variant of [`CriteriaWeights::set_weight`]: returns the rebalanced
/// copy and leaves `weights` as it was.
pub fn rebalance(
    weights: &CriteriaWeights,
    changed_key: &str,
    new_value: i64,
) -> Result<CriteriaWeights, WeightError> {
    let mut next = weights.clone();
    next.set_weight(changed_key, new_value)?;
    Ok(next)
}

/// Rescale every entry except `changed` so the set sums to 100.
///
/// The changed entry must already hold its new value. Each other weight is
/// rounded independently, so the result can drift from 100 by up to the
/// number of other entries.
pub(crate) fn redistribute(entries: &mut [CriterionWeight], changed: usize) -> RebalanceOutcome {
    let new_value = entries[changed].weight;
    let others_sum: u32 = entries
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != changed)
        .map(|(_, entry)| entry.weight)
        .sum();

    if new_value + others_sum == WEIGHT_TOTAL {
        return RebalanceOutcome::Balanced;
    }
    if others_sum == 0 {
        return RebalanceOutcome::ZeroOthers;
    }

    let scale = f64::from(WEIGHT_TOTAL - new_value) / f64::from(others_sum);
    for (index, entry) in entries.iter_mut().enumerate() {
        if index != changed {
            entry.weight = (f64::from(entry.weight) * scale).round() as u32;
        }
    }

    RebalanceOutcome::Scaled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, u32)]) -> CriteriaWeights {
        CriteriaWeights::new(pairs.iter().map(|(name, weight)| (*name, *weight))).unwrap()
    }

    #[test]
    fn scales_others_proportionally_with_rounding_drift() {
        let before = CriteriaWeights::default();
        let after = rebalance(&before, "technical", 70).unwrap();

        assert_eq!(after.get("technical"), Some(70));
        assert_eq!(after.get("experience"), Some(13));
        assert_eq!(after.get("growth"), Some(10));
        assert_eq!(after.get("culture"), Some(8));
        assert_eq!(after.total(), 101);
        // the pure variant leaves its input alone
        assert_eq!(before, CriteriaWeights::default());
    }

    #[test]
    fn zero_others_are_left_at_zero() {
        let mut current = weights(&[("a", 100), ("b", 0), ("c", 0)]);
        let outcome = current.set_weight("a", 50).unwrap();

        assert_eq!(outcome, RebalanceOutcome::ZeroOthers);
        assert_eq!(current.get("a"), Some(50));
        assert_eq!(current.get("b"), Some(0));
        assert_eq!(current.get("c"), Some(0));
        assert_eq!(current.total(), 50);
    }

    #[test]
    fn unchanged_value_is_a_no_op() {
        let mut current = weights(&[("a", 50), ("b", 50)]);
        let outcome = current.set_weight("a", 50).unwrap();

        assert_eq!(outcome, RebalanceOutcome::Balanced);
        assert_eq!(current.get("b"), Some(50));
    }

    #[test]
    fn lowering_one_weight_grows_the_rest() {
        let after = rebalance(&CriteriaWeights::default(), "technical", 0).unwrap();
        // scale = 100 / 60
        assert_eq!(after.get("experience"), Some(42));
        assert_eq!(after.get("growth"), Some(33));
        assert_eq!(after.get("culture"), Some(25));
        assert_eq!(after.total(), 100);
    }

    #[test]
    fn full_weight_zeroes_everything_else() {
        let after = rebalance(&CriteriaWeights::default(), "culture", 100).unwrap();
        assert_eq!(after.get("culture"), Some(100));
        assert_eq!(after.total(), 100);
    }

    #[test]
    fn errors_leave_input_untouched() {
        let before = CriteriaWeights::default();
        assert_eq!(
            rebalance(&before, "missing", 10),
            Err(WeightError::InvalidKey("missing".into()))
        );
        assert!(matches!(
            rebalance(&before, "growth", 150),
            Err(WeightError::OutOfRange { value: 150, .. })
        ));
    }

    #[test]
    fn outcome_names_are_snake_case() {
        assert_eq!(RebalanceOutcome::ZeroOthers.as_ref(), "zero_others");
        assert_eq!(
            serde_json::to_string(&RebalanceOutcome::Scaled).unwrap(),
            "\"scaled\""
        );
    }
}
