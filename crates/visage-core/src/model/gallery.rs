use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::IdentityRecord;

/// The full collection of enrolled identity records.
///
/// Insertion-ordered and append-only. Invariant: every embedding in the
/// gallery has the same dimensionality, established by the first record.
///
/// Serialises transparently as a JSON array of records, which is also
/// the durable on-disk format used by [`GalleryStore`].
///
/// [`GalleryStore`]: crate::store::GalleryStore
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallery {
    records: Vec<IdentityRecord>,
}

impl Gallery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The established embedding dimensionality, or `None` while empty.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.records.first().map(|r| r.embedding.dim())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[IdentityRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IdentityRecord> {
        self.records.iter()
    }

    /// Append a record, enforcing the gallery invariants.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRecord`] for an empty label and
    /// [`Error::DimensionMismatch`] when the embedding's dimensionality
    /// differs from the established gallery dimensionality.
    pub fn push(&mut self, record: IdentityRecord) -> Result<()> {
        if record.label.trim().is_empty() {
            return Err(Error::InvalidRecord(
                "identity label must not be empty".to_string(),
            ));
        }
        if record.embedding.dim() == 0 {
            return Err(Error::InvalidRecord(
                "embedding vector must not be empty".to_string(),
            ));
        }
        if let Some(expected) = self.dimension() {
            let actual = record.embedding.dim();
            if actual != expected {
                return Err(Error::DimensionMismatch { expected, actual });
            }
        }
        self.records.push(record);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Gallery {
    type Item = &'a IdentityRecord;
    type IntoIter = std::slice::Iter<'a, IdentityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Embedding;

    fn record(label: &str, values: Vec<f32>) -> IdentityRecord {
        IdentityRecord::new(label, Embedding::new(values).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_gallery_has_no_dimension() {
        let gallery = Gallery::new();
        assert!(gallery.is_empty());
        assert_eq!(gallery.dimension(), None);
    }

    #[test]
    fn test_first_record_establishes_dimension() {
        let mut gallery = Gallery::new();
        gallery.push(record("alice", vec![1.0, 0.0, 0.0])).unwrap();
        assert_eq!(gallery.dimension(), Some(3));
    }

    #[test]
    fn test_push_rejects_dimension_mismatch() {
        let mut gallery = Gallery::new();
        gallery.push(record("alice", vec![1.0, 0.0, 0.0])).unwrap();

        let result = gallery.push(record("bob", vec![1.0, 0.0]));
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
        assert_eq!(gallery.len(), 1);
    }

    #[test]
    fn test_duplicate_labels_allowed() {
        let mut gallery = Gallery::new();
        gallery.push(record("alice", vec![1.0, 0.0])).unwrap();
        gallery.push(record("alice", vec![0.0, 1.0])).unwrap();
        assert_eq!(gallery.len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut gallery = Gallery::new();
        gallery.push(record("alice", vec![1.0, 0.0])).unwrap();
        gallery.push(record("bob", vec![0.0, 1.0])).unwrap();

        let labels: Vec<&str> = gallery.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["alice", "bob"]);
    }
}
