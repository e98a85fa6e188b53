//! Gemini text generator
//!
//! Implements [`TextGenerator`] over the Generative Language `generateContent`
//! REST endpoint. Every failure mode of the call surfaces as
//! [`ModelUnavailable`]; the extraction pipeline never retries.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use reqgraph_extract::{ModelUnavailable, TextGenerator};

use crate::config::ModelConfig;
use crate::error::{ServerError, ServerResult};

/// Request body for `generateContent`
#[derive(Serialize, Debug)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize, Debug)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Subset of the `generateContent` response we read
#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiGenerator {
    /// Create a generator from the model configuration
    pub fn new(config: &ModelConfig) -> ServerResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ServerError::ConfigError("GEMINI_API_KEY is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base_url.trim_end_matches('/'),
            config.model
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// URL the generator posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn map_http_error(status: StatusCode, body: &str) -> ModelUnavailable {
    let snippet: String = body.chars().take(200).collect();
    ModelUnavailable::new(format!("model endpoint returned {}: {}", status, snippet))
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    #[instrument(skip_all, fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, ModelUnavailable> {
        let request = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Model request failed: {}", e);
                ModelUnavailable::new(format!("model request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Model endpoint returned an error");
            return Err(map_http_error(status, &body));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            ModelUnavailable::new(format!("unreadable model response: {}", e))
        })?;

        let text = body
            .into_text()
            .ok_or_else(|| ModelUnavailable::new("model response contained no text"))?;

        debug!(len = text.len(), "Received model response");
        Ok(text)
    }
}
