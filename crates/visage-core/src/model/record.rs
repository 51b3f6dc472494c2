use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Embedding;

/// One enrolled identity: a label and the embedding of one face photo.
///
/// Immutable once created. Labels are not unique -- enrolling several
/// photos of the same person yields several records sharing a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Identity label supplied at enrollment time.
    pub label: String,

    /// Embedding of the enrolled face.
    #[serde(rename = "vector")]
    pub embedding: Embedding,
}

impl IdentityRecord {
    /// Create a record, rejecting empty labels.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRecord`] if the label is empty after
    /// trimming.
    pub fn new(label: impl Into<String>, embedding: Embedding) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(Error::InvalidRecord(
                "identity label must not be empty".to_string(),
            ));
        }
        Ok(Self { label, embedding })
    }
}

/// Outcome of a recognition request. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MatchDecision {
    /// The best gallery score exceeded the decision threshold.
    Matched { label: String, score: f32 },
    /// No face detected, or no gallery record scored above the threshold.
    NoMatch,
}

impl MatchDecision {
    /// Returns `true` for the [`Matched`](Self::Matched) variant.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}
