//! Embedding similarity search for visage.
//!
//! Cosine scoring between embedding vectors and the linear best-match
//! scan over a gallery snapshot. The scan is deterministic and visits
//! every record once; at the target scale (tens of thousands of records)
//! no index is needed.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

use visage_core::{Embedding, Error, Gallery, IdentityRecord, Result};

/// Cosine similarity between two embeddings, in `[-1, 1]`.
///
/// Dot product divided by the product of the magnitudes, so the score
/// depends on the angle between the vectors, not their lengths.
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] when the vectors differ in
/// length and [`Error::DegenerateVector`] when either has zero
/// magnitude (the cosine is undefined).
pub fn score(a: &Embedding, b: &Embedding) -> Result<f32> {
    if a.dim() != b.dim() {
        return Err(Error::DimensionMismatch {
            expected: a.dim(),
            actual: b.dim(),
        });
    }

    let magnitudes = a.magnitude() * b.magnitude();
    if magnitudes == 0.0 {
        return Err(Error::DegenerateVector);
    }

    let dot: f32 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| x * y)
        .sum();

    Ok(dot / magnitudes)
}

/// Find the best-scoring record in the gallery for a query embedding.
///
/// Scores every record in insertion order and keeps a strictly-greater
/// running maximum, so ties resolve to the earliest record. Returns
/// `(None, -1.0)` for an empty gallery.
///
/// # Errors
/// Propagates [`score`] failures (a query whose dimensionality differs
/// from the gallery's, or a degenerate vector).
pub fn best_match<'g>(
    query: &Embedding,
    gallery: &'g Gallery,
) -> Result<(Option<&'g IdentityRecord>, f32)> {
    let mut records = gallery.iter();
    let Some(first) = records.next() else {
        return Ok((None, -1.0));
    };

    let mut best = first;
    let mut best_score = score(query, &first.embedding)?;
    for record in records {
        let s = score(query, &record.embedding)?;
        if s > best_score {
            best = record;
            best_score = s;
        }
    }

    Ok((Some(best), best_score))
}
