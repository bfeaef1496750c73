use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{SpellArtifacts, SpellRequest};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("spell generation is not configured")]
    NotConfigured,
    #[error("generation service returned status {0}")]
    Status(u16),
    #[error("generation service timed out")]
    Timeout,
    #[error("generation transport failure: {0}")]
    Transport(String),
    #[error("malformed generation response: {0}")]
    Malformed(String),
}

impl GenerationError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Produces the image and metadata for a spell card. Callers treat every
/// error the same way, so adapters only need to say that it failed.
#[async_trait]
pub trait SpellGenerator: Send + Sync {
    async fn generate(&self, request: &SpellRequest) -> Result<SpellArtifacts, GenerationError>;
}

pub struct MissingSpellGenerator;

#[async_trait]
impl SpellGenerator for MissingSpellGenerator {
    async fn generate(&self, _request: &SpellRequest) -> Result<SpellArtifacts, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

/// Calls a generation service that accepts `{element, style, keyword}` and
/// answers with `{imageUrl, metadataUrl}`.
pub struct HttpSpellGenerator {
    http: Client,
    endpoint: String,
}

impl HttpSpellGenerator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SpellGenerator for HttpSpellGenerator {
    async fn generate(&self, request: &SpellRequest) -> Result<SpellArtifacts, GenerationError> {
        debug!(
            endpoint = %self.endpoint,
            element = %request.element,
            style = %request.style,
            "requesting spell generation"
        );
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(GenerationError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, %status, "generation service rejected request");
            return Err(GenerationError::Status(status.as_u16()));
        }

        let artifacts: SpellArtifacts = response
            .json()
            .await
            .map_err(GenerationError::from_reqwest)?;
        if artifacts.image_url.trim().is_empty() {
            return Err(GenerationError::Malformed("empty imageUrl".into()));
        }
        if artifacts.metadata_url.trim().is_empty() {
            return Err(GenerationError::Malformed("empty metadataUrl".into()));
        }
        Ok(artifacts)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
