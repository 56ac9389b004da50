use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use super::rebalance::{redistribute, RebalanceOutcome};

/// Every weight set sums to this at rest.
pub const WEIGHT_TOTAL: u32 = 100;

/// Distribution a new requisition starts with.
pub const DEFAULT_CRITERIA: [(&str, u32); 4] = [
    ("technical", 40),
    ("experience", 25),
    ("growth", 20),
    ("culture", 15),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightError {
    #[error("unknown criterion: {0}")]
    InvalidKey(String),
    #[error("weight for {key} must be within 0..=100, got {value}")]
    OutOfRange { key: String, value: i64 },
    #[error("duplicate criterion: {0}")]
    DuplicateKey(String),
    #[error("criteria weights must total 100, got {0}")]
    InvalidTotal(u32),
    #[error("malformed criteria weights: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionWeight {
    pub name: String,
    pub weight: u32,
}

/// Named integer percentages, kept in insertion order for display.
///
/// Construction enforces the sum-to-100 invariant. Updates through
/// [`CriteriaWeights::set_weight`] keep it up to rounding drift, which is
/// left uncorrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaWeights {
    entries: Vec<CriterionWeight>,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self {
            entries: DEFAULT_CRITERIA
                .iter()
                .map(|(name, weight)| CriterionWeight {
                    name: (*name).to_string(),
                    weight: *weight,
                })
                .collect(),
        }
    }
}

impl CriteriaWeights {
    pub fn new<I, S>(entries: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let weights = Self::from_entries_unchecked_total(entries)?;
        let total = weights.total();
        if total != WEIGHT_TOTAL {
            return Err(WeightError::InvalidTotal(total));
        }
        Ok(weights)
    }

    /// Like [`CriteriaWeights::new`] but accepts any total, so weights that
    /// drifted through [`CriteriaWeights::set_weight`] can be restored.
    /// Names must still be unique and each weight within `0..=100`.
    pub fn from_entries_unchecked_total<I, S>(entries: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut collected: Vec<CriterionWeight> = Vec::new();
        for (name, weight) in entries {
            let name = name.into();
            if collected.iter().any(|entry| entry.name == name) {
                return Err(WeightError::DuplicateKey(name));
            }
            if weight > WEIGHT_TOTAL {
                return Err(WeightError::OutOfRange {
                    key: name,
                    value: i64::from(weight),
                });
            }
            collected.push(CriterionWeight { name, weight });
        }

        if collected.is_empty() {
            return Err(WeightError::InvalidTotal(0));
        }

        Ok(Self { entries: collected })
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.weight))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set one criterion and rescale the others so the set sums to 100 again.
    ///
    /// Validation happens before anything is written, so a failed call leaves
    /// the weights untouched.
    pub fn set_weight(&mut self, key: &str, value: i64) -> Result<RebalanceOutcome, WeightError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.name == key)
            .ok_or_else(|| WeightError::InvalidKey(key.to_string()))?;

        if !(0..=i64::from(WEIGHT_TOTAL)).contains(&value) {
            return Err(WeightError::OutOfRange {
                key: key.to_string(),
                value,
            });
        }

        self.entries[index].weight = value as u32;
        let outcome = redistribute(&mut self.entries, index);

        debug!(
            criterion = key,
            weight = value,
            outcome = outcome.as_ref(),
            total = self.total(),
            "criteria weights rebalanced"
        );

        Ok(outcome)
    }
}

impl fmt::Display for CriteriaWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .entries
            .iter()
            .map(|entry| format!("{}={}", entry.name, entry.weight))
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// Parses `technical=40,experience=25,...`.
impl FromStr for CriteriaWeights {
    type Err = WeightError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for pair in raw.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| WeightError::Parse(format!("expected name=value, got {pair:?}")))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(WeightError::Parse(format!("missing name in {pair:?}")));
            }
            let value: u32 = value
                .trim()
                .parse()
                .map_err(|_| WeightError::Parse(format!("weight for {name} is not a number")))?;
            entries.push((name.to_string(), value));
        }
        Self::new(entries)
    }
}

impl Serialize for CriteriaWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.weight)?;
        }
        map.end()
    }
}

struct OrderedWeights;

impl<'de> Visitor<'de> for OrderedWeights {
    type Value = CriteriaWeights;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of criterion names to integer weights")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, u32)> = Vec::new();
        while let Some((name, weight)) = access.next_entry::<String, u32>()? {
            entries.push((name, weight));
        }
        CriteriaWeights::from_entries_unchecked_total(entries).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for CriteriaWeights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedWeights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_total() {
        let weights = CriteriaWeights::default();
        assert_eq!(weights.total(), WEIGHT_TOTAL);
        assert_eq!(
            weights.names().collect::<Vec<_>>(),
            vec!["technical", "experience", "growth", "culture"]
        );
    }

    #[test]
    fn new_rejects_bad_totals_and_duplicates() {
        assert_eq!(
            CriteriaWeights::new([("a", 60), ("b", 30)]),
            Err(WeightError::InvalidTotal(90))
        );
        assert_eq!(
            CriteriaWeights::new([("a", 50), ("a", 50)]),
            Err(WeightError::DuplicateKey("a".into()))
        );
        assert_eq!(
            CriteriaWeights::new([("a", 120), ("b", 0)]),
            Err(WeightError::OutOfRange {
                key: "a".into(),
                value: 120
            })
        );
        assert_eq!(
            CriteriaWeights::new(Vec::<(String, u32)>::new()),
            Err(WeightError::InvalidTotal(0))
        );
    }

    #[test]
    fn set_weight_rejects_unknown_key_without_mutation() {
        let mut weights = CriteriaWeights::default();
        let before = weights.clone();
        assert_eq!(
            weights.set_weight("salary", 10),
            Err(WeightError::InvalidKey("salary".into()))
        );
        assert_eq!(weights, before);
    }

    #[test]
    fn set_weight_rejects_out_of_range_without_mutation() {
        let mut weights = CriteriaWeights::default();
        let before = weights.clone();
        assert!(matches!(
            weights.set_weight("technical", 101),
            Err(WeightError::OutOfRange { value: 101, .. })
        ));
        assert!(matches!(
            weights.set_weight("technical", -1),
            Err(WeightError::OutOfRange { value: -1, .. })
        ));
        assert_eq!(weights, before);
    }

    #[test]
    fn parses_pairs_and_displays_them_back() {
        let weights: CriteriaWeights = " technical=40, experience=25,growth=20,culture=15 "
            .parse()
            .unwrap();
        assert_eq!(weights, CriteriaWeights::default());
        assert_eq!(
            weights.to_string(),
            "technical=40,experience=25,growth=20,culture=15"
        );
    }

    #[test]
    fn parse_reports_malformed_pairs() {
        assert!(matches!(
            "technical:40".parse::<CriteriaWeights>(),
            Err(WeightError::Parse(_))
        ));
        assert!(matches!(
            "technical=forty".parse::<CriteriaWeights>(),
            Err(WeightError::Parse(_))
        ));
        assert!(matches!(
            "=100".parse::<CriteriaWeights>(),
            Err(WeightError::Parse(_))
        ));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let weights = CriteriaWeights::default();
        let json = serde_json::to_string(&weights).unwrap();
        assert_eq!(
            json,
            r#"{"technical":40,"experience":25,"growth":20,"culture":15}"#
        );

        let back: CriteriaWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(back, weights);
    }

    #[test]
    fn drifted_weights_survive_a_json_round_trip() {
        let mut weights = CriteriaWeights::default();
        weights.set_weight("technical", 70).unwrap();
        assert_eq!(weights.total(), 101);

        let json = serde_json::to_string(&weights).unwrap();
        let back: CriteriaWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(back, weights);
    }

    #[test]
    fn deserialize_still_checks_each_entry() {
        let err = serde_json::from_str::<CriteriaWeights>(r#"{"a":50,"a":50}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate criterion: a"));
        let err = serde_json::from_str::<CriteriaWeights>(r#"{"a":150}"#).unwrap_err();
        assert!(err.to_string().contains("must be within 0..=100"));
        assert!(serde_json::from_str::<CriteriaWeights>("{}").is_err());
    }

    #[test]
    fn unchecked_total_constructor_keeps_drift_but_parse_does_not() {
        let drifted = CriteriaWeights::from_entries_unchecked_total([("a", 60), ("b", 41)]).unwrap();
        assert_eq!(drifted.total(), 101);
        assert_eq!(
            "a=60,b=41".parse::<CriteriaWeights>(),
            Err(WeightError::InvalidTotal(101))
        );
    }
}
