//! Embedding provider client.
//!
//! Talks to an MT Photos AI-compatible `/represent` endpoint: the image
//! is posted as a multipart form with an `api-key` header, and the
//! response carries one embedding per detected face. The loosely-typed
//! response is converted into strict [`Embedding`] values here at the
//! boundary; anything that fails shape validation is rejected before it
//! reaches the rest of the service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use visage_core::Embedding;

use crate::config::Config;
use crate::error::{MatchError, MatchResult};

/// Capability of turning an image into zero or more face embeddings.
///
/// One embedding per detected face, in the provider's detection order.
/// An image with no faces yields an empty list, not an error.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed_faces(&self, image: Vec<u8>, file_name: &str) -> MatchResult<Vec<Embedding>>;
}

#[derive(Debug, Deserialize)]
struct RepresentResponse {
    #[serde(default)]
    result: Vec<DetectedFace>,
}

#[derive(Debug, Deserialize)]
struct DetectedFace {
    embedding: Vec<f32>,
}

/// HTTP client for the embedding provider.
#[derive(Debug, Clone)]
pub struct HttpEmbeddingProvider {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl HttpEmbeddingProvider {
    /// Create a provider client from configuration.
    ///
    /// # Errors
    /// Returns [`MatchError::InvalidInput`] if no API key is configured
    /// and [`MatchError::ProviderUnavailable`] if the HTTP client cannot
    /// be created.
    pub fn new(config: &Config) -> MatchResult<Self> {
        let api_key = config.provider_api_key.clone().ok_or_else(|| {
            MatchError::InvalidInput(
                "provider_api_key is not configured (see `visage config`)".to_string(),
            )
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .user_agent("visage/0.1.0 (https://github.com/oxur/visage)")
            .build()
            .map_err(|e| MatchError::ProviderUnavailable {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: config.provider_endpoint.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed_faces(&self, image: Vec<u8>, file_name: &str) -> MatchResult<Vec<Embedding>> {
        let part = Part::bytes(image).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&self.endpoint)
            .header("api-key", self.api_key.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|e| MatchError::ProviderUnavailable {
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| MatchError::ProviderUnavailable {
                message: e.to_string(),
            })?;

        let body: RepresentResponse =
            response
                .json()
                .await
                .map_err(|e| MatchError::ProviderUnavailable {
                    message: e.to_string(),
                })?;

        log::debug!("provider returned {} face(s)", body.result.len());

        body.result
            .into_iter()
            .map(|face| {
                Embedding::new(face.embedding).map_err(|e| MatchError::ProviderUnavailable {
                    message: format!("malformed embedding in provider response: {e}"),
                })
            })
            .collect()
    }
}
