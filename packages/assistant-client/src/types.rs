//! Request and response types for the answer gateway.

use serde::{Deserialize, Serialize};

/// Answer request sent to the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRequest {
    /// The prompt to answer.
    pub query: String,

    /// Whether to stream the answer as SSE chunks.
    pub stream: bool,

    /// Answer language (e.g., "en-US").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl AnswerRequest {
    /// Create a non-streaming request for the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            stream: false,
            language: None,
        }
    }

    /// Request a streamed answer.
    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    /// Set the answer language.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Non-streaming answer response.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    /// The complete answer text.
    #[serde(default)]
    pub answer: String,
}

/// One chunk of a streamed answer.
///
/// Incremental chunks carry `delta` text; the terminal chunk has
/// `last == true` and may carry the assembled `answer`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantChunk {
    /// Incremental text for this chunk.
    #[serde(default)]
    pub delta: String,

    /// Whether this is the terminal chunk of the stream.
    #[serde(default)]
    pub last: bool,

    /// Full answer text, present on the terminal chunk when the gateway
    /// re-sends the assembled answer.
    #[serde(default)]
    pub answer: Option<String>,
}
