//! Client abstraction for the upstream research assistant.
//!
//! The pipeline only ever sees [`StreamEvent`] values: whatever shape the
//! transport produces is normalized by an adapter before it reaches this
//! boundary. Implementations wrap a specific gateway client or, in tests,
//! canned responses.

use async_trait::async_trait;
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;

use crate::error::{Result, VettingError};

/// One normalized event from a streamed answer.
#[derive(Debug, Clone, Default)]
pub struct StreamEvent {
    /// Incremental answer text.
    pub delta: String,

    /// Whether this event terminates the stream.
    pub is_final: bool,

    /// Full assembled answer, when the transport re-sends it on the final
    /// event.
    pub final_answer: Option<String>,
}

/// Boxed stream of answer events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>;

/// Client surface the pipeline drives.
#[async_trait]
pub trait ResearchClient: Send + Sync {
    /// Start a streamed answer for the prompt.
    async fn ask_stream(&self, prompt: &str) -> Result<EventStream>;

    /// Fetch a single assembled answer (the non-streaming fallback).
    async fn ask_once(&self, prompt: &str) -> Result<String>;
}

/// Consume a streaming response, assembling incremental text.
///
/// Prefers the final answer re-sent on the terminal event when it is
/// non-empty; otherwise returns the concatenated deltas. A transport error
/// mid-stream propagates so the caller can fall back to `ask_once`.
pub async fn collect_stream_text(client: &dyn ResearchClient, prompt: &str) -> Result<String> {
    let mut stream = client.ask_stream(prompt).await?;

    let mut streamed = String::new();
    let mut final_answer: Option<String> = None;

    while let Some(event) = stream.next().await {
        let event = event?;
        if !event.delta.is_empty() {
            streamed.push_str(&event.delta);
        }
        if event.is_final {
            if let Some(answer) = event.final_answer {
                if !answer.trim().is_empty() {
                    final_answer = Some(answer);
                }
            }
        }
    }

    Ok(final_answer.unwrap_or(streamed))
}

/// Wrap a transport error for the client boundary.
pub fn client_error(err: impl std::error::Error + Send + Sync + 'static) -> VettingError {
    VettingError::Client(Box::new(err))
}
