// src/core/types.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for an accepted record. Assigned once, never changed.
pub type RecordId = Uuid;

/// The weight a record gets when the caller supplies none.
pub const DEFAULT_WEIGHT: i64 = 1;

/// Ordering key of a rank entry.
///
/// `Exact` sorts above every weighted score. It is only produced by the
/// search for a query that lands on a record's terminal node without
/// spending any mismatches, so no weight can ever overtake it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Score {
    Weighted(i64),
    Exact,
}

impl Score {
    pub fn weight(self) -> Option<i64> {
        match self {
            Score::Weighted(weight) => Some(weight),
            Score::Exact => None,
        }
    }
}

/// A lightweight projection of a record used for ordering candidate lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rank {
    pub id: RecordId,
    pub score: Score,
}

impl Rank {
    pub fn weighted(id: RecordId, weight: i64) -> Self {
        Self { id, score: Score::Weighted(weight) }
    }

    pub fn exact(id: RecordId) -> Self {
        Self { id, score: Score::Exact }
    }
}

/// What a caller hands to the engine. `value` defaults to the normalized
/// text and `weight` to [`DEFAULT_WEIGHT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<V> {
    pub text: String,
    #[serde(default)]
    pub value: Option<V>,
    #[serde(default)]
    pub weight: Option<i64>,
}

impl<V> Record<V> {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), value: None, weight: None }
    }

    pub fn with_value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// A zero weight is treated the same as a missing one.
    pub(crate) fn resolved_weight(&self) -> i64 {
        match self.weight {
            Some(weight) if weight != 0 => weight,
            _ => DEFAULT_WEIGHT,
        }
    }
}

/// A record after the engine accepted it: normalized text, fresh id,
/// resolved payload and weight. This is what the update hook observes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeValue<V> {
    pub id: RecordId,
    pub text: String,
    pub value: V,
    pub weight: i64,
}
