//! Testing utilities including a mock research client.
//!
//! Useful for exercising the pipeline without a live gateway: canned
//! responses, injectable stream/fallback failures, and call tracking for
//! assertions.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::client::{client_error, EventStream, ResearchClient, StreamEvent};
use crate::error::Result;

/// Record of a call made to the mock client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Stream,
    Once,
}

/// A mock client returning a fixed response.
#[derive(Debug, Clone)]
pub struct MockClient {
    response: String,
    fail_stream: bool,
    fail_once: bool,
    calls: Arc<RwLock<Vec<MockCall>>>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockClient {
    /// Create a mock that answers every prompt with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            fail_stream: false,
            fail_once: false,
            calls: Arc::new(RwLock::new(Vec::new())),
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Make `ask_stream` fail, forcing the fallback path.
    pub fn with_stream_failure(mut self) -> Self {
        self.fail_stream = true;
        self
    }

    /// Make `ask_once` fail as well.
    pub fn with_once_failure(mut self) -> Self {
        self.fail_once = true;
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    /// Number of `ask_stream` calls.
    pub fn stream_calls(&self) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|call| **call == MockCall::Stream)
            .count()
    }

    /// Number of `ask_once` calls.
    pub fn once_calls(&self) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|call| **call == MockCall::Once)
            .count()
    }

    fn record_call(&self, call: MockCall, prompt: &str) {
        self.calls.write().unwrap().push(call);
        self.prompts.write().unwrap().push(prompt.to_string());
    }
}

#[async_trait]
impl ResearchClient for MockClient {
    async fn ask_stream(&self, prompt: &str) -> Result<EventStream> {
        self.record_call(MockCall::Stream, prompt);
        if self.fail_stream {
            return Err(client_error(std::io::Error::other("mock stream failure")));
        }

        let events: Vec<Result<StreamEvent>> = vec![
            Ok(StreamEvent {
                delta: self.response.clone(),
                ..StreamEvent::default()
            }),
            Ok(StreamEvent {
                is_final: true,
                final_answer: Some(self.response.clone()),
                ..StreamEvent::default()
            }),
        ];
        Ok(Box::pin(futures::stream::iter(events)))
    }

    async fn ask_once(&self, prompt: &str) -> Result<String> {
        self.record_call(MockCall::Once, prompt);
        if self.fail_once {
            return Err(client_error(std::io::Error::other("mock fallback failure")));
        }
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::collect_stream_text;

    #[tokio::test]
    async fn test_mock_streams_its_response() {
        let client = MockClient::new("1. Something cannot happen.");
        let text = collect_stream_text(&client, "prompt").await.unwrap();
        assert_eq!(text, "1. Something cannot happen.");
        assert_eq!(client.stream_calls(), 1);
        assert_eq!(client.prompts(), vec!["prompt".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let client = MockClient::new("x").with_stream_failure();
        assert!(client.ask_stream("p").await.is_err());
        assert!(client.ask_once("p").await.is_ok());
    }
}
