use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A face embedding vector.
///
/// A fixed-length sequence of floats produced by the embedding provider
/// for one detected face. The dimensionality is set by the provider and
/// must be identical across every stored and query vector; the gallery
/// enforces that invariant on insert.
///
/// Serialises transparently as a bare JSON array of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Validate and wrap a raw vector from an external boundary.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRecord`] if the vector is empty or
    /// contains a non-finite component.
    pub fn new(values: Vec<f32>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidRecord(
                "embedding vector must not be empty".to_string(),
            ));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidRecord(format!(
                "embedding component {pos} is not a finite number"
            )));
        }
        Ok(Self(values))
    }

    /// Number of components in the vector.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Euclidean magnitude of the vector.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        self.0.iter().map(|v| v * v).sum::<f32>().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_finite_vector() {
        let embedding = Embedding::new(vec![0.5, -0.25, 1.0]).unwrap();
        assert_eq!(embedding.dim(), 3);
        assert_eq!(embedding.as_slice(), &[0.5, -0.25, 1.0]);
    }

    #[test]
    fn test_new_rejects_empty_vector() {
        assert!(matches!(
            Embedding::new(vec![]),
            Err(Error::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_new_rejects_non_finite_components() {
        assert!(Embedding::new(vec![1.0, f32::NAN]).is_err());
        assert!(Embedding::new(vec![f32::INFINITY]).is_err());
    }

    #[test]
    fn test_magnitude() {
        let embedding = Embedding::new(vec![3.0, 4.0]).unwrap();
        assert_eq!(embedding.magnitude(), 5.0);
    }

    #[test]
    fn test_serialises_as_bare_array() {
        let embedding = Embedding::new(vec![1.0, 0.0]).unwrap();
        let json = serde_json::to_string(&embedding).unwrap();
        assert_eq!(json, "[1.0,0.0]");

        let back: Embedding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, embedding);
    }
}
