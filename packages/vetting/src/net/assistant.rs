//! Adapter implementing [`ResearchClient`] on top of the gateway client.
//!
//! Translates [`assistant_client::AssistantChunk`] values into the core
//! [`StreamEvent`] shape at the boundary, so the pipeline never touches
//! transport-specific types.

use async_trait::async_trait;
use futures::StreamExt;

use assistant_client::AssistantClient;

use crate::client::{client_error, EventStream, ResearchClient, StreamEvent};
use crate::error::Result;

fn to_event(chunk: assistant_client::AssistantChunk) -> StreamEvent {
    StreamEvent {
        delta: chunk.delta,
        is_final: chunk.last,
        final_answer: chunk.answer,
    }
}

#[async_trait]
impl ResearchClient for AssistantClient {
    async fn ask_stream(&self, prompt: &str) -> Result<EventStream> {
        let stream = AssistantClient::ask_stream(self, prompt)
            .await
            .map_err(client_error)?;
        let events = stream.map(|chunk| chunk.map(to_event).map_err(client_error));
        Ok(Box::pin(events))
    }

    async fn ask_once(&self, prompt: &str) -> Result<String> {
        AssistantClient::ask(self, prompt).await.map_err(client_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_maps_onto_event() {
        let chunk = assistant_client::AssistantChunk {
            delta: "text".to_string(),
            last: true,
            answer: Some("full".to_string()),
        };
        let event = to_event(chunk);
        assert_eq!(event.delta, "text");
        assert!(event.is_final);
        assert_eq!(event.final_answer.as_deref(), Some("full"));
    }
}
