//! The matching service.
//!
//! Orchestrates enrollment and recognition: delegates images to the
//! embedding provider, enforces the decision threshold, and hands all
//! gallery access to the store so mutating requests serialize and
//! recognitions run on immutable snapshots.

use visage_core::{GalleryStore, IdentityRecord, MatchDecision};

use crate::config::Config;
use crate::error::{MatchError, MatchResult};
use crate::provider::{EmbeddingProvider, HttpEmbeddingProvider};

/// Enrollment and recognition over a gallery store.
///
/// Generic over the provider so the service can be exercised without an
/// HTTP round trip; production code uses [`HttpEmbeddingProvider`].
#[derive(Debug)]
pub struct Matcher<P = HttpEmbeddingProvider> {
    provider: P,
    store: GalleryStore,
    threshold: f32,
}

impl Matcher<HttpEmbeddingProvider> {
    /// Build a matcher from configuration: HTTP provider client plus a
    /// gallery store at the configured path.
    ///
    /// # Errors
    /// Returns provider construction errors and gallery store open
    /// errors.
    pub fn from_config(config: &Config) -> MatchResult<Self> {
        let provider = HttpEmbeddingProvider::new(config)?;
        let store = GalleryStore::open(&config.gallery_path)?;
        Ok(Self::new(provider, store, config.similarity_threshold))
    }
}

impl<P: EmbeddingProvider> Matcher<P> {
    pub fn new(provider: P, store: GalleryStore, threshold: f32) -> Self {
        Self {
            provider,
            store,
            threshold,
        }
    }

    /// The gallery store backing this matcher.
    #[must_use]
    pub fn store(&self) -> &GalleryStore {
        &self.store
    }

    /// Enroll a labelled face photo into the gallery.
    ///
    /// The image goes to the provider; the first detected face is the
    /// one enrolled (additional faces are ignored). Success is reported
    /// only after the record has been durably flushed.
    ///
    /// # Errors
    /// [`MatchError::InvalidInput`] for an empty label,
    /// [`MatchError::ProviderUnavailable`] for provider failures,
    /// [`MatchError::NoFaceDetected`] when the image contains no face,
    /// and store failures (dimension mismatch, persist failure)
    /// propagated verbatim.
    pub async fn enroll(&self, label: &str, image: Vec<u8>, file_name: &str) -> MatchResult<()> {
        let label = label.trim();
        if label.is_empty() {
            return Err(MatchError::InvalidInput(
                "identity label must not be empty".to_string(),
            ));
        }

        let faces = self.provider.embed_faces(image, file_name).await?;
        let face_count = faces.len();
        let Some(embedding) = faces.into_iter().next() else {
            return Err(MatchError::NoFaceDetected);
        };
        if face_count > 1 {
            // First detected face wins; the rest are ignored.
            log::debug!(
                "provider returned {face_count} faces for '{label}', enrolling the first"
            );
        }

        let record = IdentityRecord::new(label, embedding)?;
        self.store.append(record).await?;

        log::info!(
            "enrolled '{label}' ({} records in gallery)",
            self.store.len().await
        );
        Ok(())
    }

    /// Recognize the face in an image against the gallery.
    ///
    /// An image with no detectable face is a normal no-match outcome,
    /// not an error. The best gallery score must strictly exceed the
    /// threshold to count as a match; a score exactly at the threshold
    /// does not.
    ///
    /// # Errors
    /// [`MatchError::ProviderUnavailable`] for provider failures, and
    /// data-integrity errors from the similarity engine.
    pub async fn recognize(&self, image: Vec<u8>) -> MatchResult<MatchDecision> {
        let faces = self.provider.embed_faces(image, "capture.jpg").await?;
        let Some(query) = faces.into_iter().next() else {
            log::debug!("no face detected in query image");
            return Ok(MatchDecision::NoMatch);
        };

        let gallery = self.store.snapshot().await;
        let (best, best_score) = visage_search::best_match(&query, &gallery)?;

        match best {
            Some(record) if best_score > self.threshold => {
                log::info!("matched '{}' at score {best_score:.3}", record.label);
                Ok(MatchDecision::Matched {
                    label: record.label.clone(),
                    score: best_score,
                })
            }
            _ => {
                log::debug!(
                    "no match (best score {best_score:.3}, threshold {})",
                    self.threshold
                );
                Ok(MatchDecision::NoMatch)
            }
        }
    }
}
