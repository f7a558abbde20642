//! Streaming client for the research assistant answer gateway
//!
//! A clean, minimal client with no domain-specific logic. Sends a prompt to
//! the gateway's `/answers` endpoint and returns either a streamed sequence
//! of chunks or a single assembled answer.
//!
//! # Example
//!
//! ```rust,ignore
//! use assistant_client::AssistantClient;
//! use futures::StreamExt;
//!
//! let client = AssistantClient::from_env()?;
//!
//! // Streamed answer
//! let mut stream = client.ask_stream("List verified limitations of ...").await?;
//! while let Some(chunk) = stream.next().await {
//!     print!("{}", chunk?.delta);
//! }
//!
//! // Single-shot answer
//! let answer = client.ask("List verified limitations of ...").await?;
//! ```

pub mod error;
pub mod streaming;
pub mod types;

pub use error::{AssistantError, Result};
pub use streaming::AnswerStream;
pub use types::{AnswerRequest, AnswerResponse, AssistantChunk};

use reqwest::Client;
use tracing::{debug, warn};

/// Default gateway base URL; deployments point elsewhere via
/// `ASSISTANT_BASE_URL`.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/v1";

/// Client for the answer gateway.
#[derive(Clone)]
pub struct AssistantClient {
    http_client: Client,
    session_token: String,
    base_url: String,
}

impl AssistantClient {
    /// Create a new client with the given session token.
    pub fn new(session_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            session_token: session_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variables.
    ///
    /// Requires `ASSISTANT_SESSION_TOKEN`; honors `ASSISTANT_BASE_URL` when
    /// set.
    pub fn from_env() -> Result<Self> {
        let session_token = std::env::var("ASSISTANT_SESSION_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| AssistantError::Config("ASSISTANT_SESSION_TOKEN not set".into()))?;

        let mut client = Self::new(session_token);
        if let Ok(base_url) = std::env::var("ASSISTANT_BASE_URL") {
            if !base_url.trim().is_empty() {
                client.base_url = base_url;
            }
        }
        Ok(client)
    }

    /// Set a custom base URL (for proxies and test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask for a streamed answer.
    ///
    /// Returns a stream of [`AssistantChunk`] values: incremental `delta`
    /// text followed by a terminal chunk that may carry the assembled
    /// answer.
    pub async fn ask_stream(&self, prompt: &str) -> Result<AnswerStream> {
        let request = AnswerRequest::new(prompt).streaming().language("en-US");

        let response = self
            .http_client
            .post(format!("{}/answers", self.base_url))
            .header("Authorization", format!("Bearer {}", self.session_token))
            .header("Accept", "text/event-stream")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Assistant streaming request failed");
                AssistantError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Assistant streaming API error");
            return Err(AssistantError::Api(format!(
                "Assistant streaming API error: {}",
                error_text
            )));
        }

        Ok(AnswerStream::new(response.bytes_stream()))
    }

    /// Ask for a single assembled answer (non-streaming).
    pub async fn ask(&self, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();
        let request = AnswerRequest::new(prompt).language("en-US");

        let response = self
            .http_client
            .post(format!("{}/answers", self.base_url))
            .header("Authorization", format!("Bearer {}", self.session_token))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Assistant request failed");
                AssistantError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Assistant API error");
            return Err(AssistantError::Api(format!(
                "Assistant API error: {}",
                error_text
            )));
        }

        let answer: AnswerResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Parse(e.to_string()))?;

        debug!(
            duration_ms = start.elapsed().as_millis(),
            answer_len = answer.answer.len(),
            "Assistant answer received"
        );

        Ok(answer.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_overrides_default() {
        let client = AssistantClient::new("token").with_base_url("http://localhost:9999/v2");
        assert_eq!(client.base_url(), "http://localhost:9999/v2");
    }

    #[test]
    fn test_answer_request_serializes_streaming_flag() {
        let request = AnswerRequest::new("q").streaming();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], true);
        assert_eq!(json["query"], "q");
        assert!(json.get("language").is_none());
    }
}
