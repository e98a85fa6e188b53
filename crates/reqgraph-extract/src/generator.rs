//! Boundary to the text-producing language model.

use async_trait::async_trait;
use thiserror::Error;

/// The model could not produce text (transport failure, refusal, timeout)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ModelUnavailable(pub String);

impl ModelUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Interface for text generation.
///
/// One call per prompt, no retries. Implementations may return an empty
/// string; the extractor treats that as unavailability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce a completion for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String, ModelUnavailable>;
}
