//! SSE streaming parser for answer responses.
//!
//! Converts a raw `reqwest` byte stream into `AssistantChunk` values.
//! Handles `data: [DONE]`, partial lines, and buffering.

use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::AssistantError;
use crate::types::AssistantChunk;

/// Stream adapter that converts raw SSE bytes into `AssistantChunk` values.
pub struct AnswerStream {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
    buffer: String,
}

impl AnswerStream {
    pub(crate) fn new(
        byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: String::new(),
        }
    }
}

impl Stream for AnswerStream {
    type Item = Result<AssistantChunk, AssistantError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            // Try to parse a complete line from the buffer
            if let Some(chunk) = try_parse_line(&mut this.buffer) {
                return Poll::Ready(Some(chunk));
            }

            // Need more data from the byte stream
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    match std::str::from_utf8(&bytes) {
                        Ok(text) => this.buffer.push_str(text),
                        Err(e) => {
                            return Poll::Ready(Some(Err(AssistantError::Parse(format!(
                                "Invalid UTF-8 in stream: {}",
                                e
                            )))));
                        }
                    }
                    // Loop to try parsing again
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(AssistantError::Network(e.to_string()))));
                }
                Poll::Ready(None) => {
                    // Stream ended — check for remaining buffer content
                    if this.buffer.trim().is_empty() {
                        return Poll::Ready(None);
                    }
                    if let Some(chunk) = try_parse_line(&mut this.buffer) {
                        return Poll::Ready(Some(chunk));
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Try to extract and parse a complete SSE line from the buffer.
/// Returns `None` if no complete line is available yet.
fn try_parse_line(buffer: &mut String) -> Option<Result<AssistantChunk, AssistantError>> {
    loop {
        let newline_pos = buffer.find('\n')?;
        let line = buffer[..newline_pos].trim().to_string();
        buffer.drain(..=newline_pos);

        // Skip empty lines (SSE uses blank lines as event separators)
        if line.is_empty() {
            continue;
        }

        // Handle SSE data lines
        if let Some(data) = line.strip_prefix("data: ") {
            let data = data.trim();

            // Done signal
            if data == "[DONE]" {
                return Some(Ok(AssistantChunk {
                    delta: String::new(),
                    last: true,
                    answer: None,
                }));
            }

            // Parse JSON chunk
            match serde_json::from_str::<AssistantChunk>(data) {
                Ok(chunk) => return Some(Ok(chunk)),
                Err(e) => {
                    return Some(Err(AssistantError::Parse(format!(
                        "Failed to parse stream chunk: {} (data: {})",
                        e,
                        &data[..data.len().min(200)]
                    ))));
                }
            }
        }

        // Skip non-data lines (e.g., "event:", "id:", "retry:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn make_sse_bytes(lines: &[&str]) -> Vec<Result<Bytes, reqwest::Error>> {
        lines
            .iter()
            .map(|line| Ok(Bytes::from(format!("{}\n", line))))
            .collect()
    }

    #[tokio::test]
    async fn test_parse_delta_chunks() {
        let data = make_sse_bytes(&[
            r#"data: {"delta":"1. The system"}"#,
            "",
            r#"data: {"delta":" cannot export."}"#,
            "",
            r#"data: {"delta":"","last":true,"answer":"1. The system cannot export."}"#,
        ]);

        let byte_stream = futures::stream::iter(data);
        let mut stream = AnswerStream::new(byte_stream);

        let c1 = stream.next().await.unwrap().unwrap();
        assert_eq!(c1.delta, "1. The system");
        assert!(!c1.last);

        let c2 = stream.next().await.unwrap().unwrap();
        assert_eq!(c2.delta, " cannot export.");

        let last = stream.next().await.unwrap().unwrap();
        assert!(last.last);
        assert_eq!(last.answer.as_deref(), Some("1. The system cannot export."));
    }

    #[tokio::test]
    async fn test_done_signal() {
        let data = make_sse_bytes(&[r#"data: {"delta":"hi"}"#, "", "data: [DONE]"]);

        let byte_stream = futures::stream::iter(data);
        let mut stream = AnswerStream::new(byte_stream);

        let c1 = stream.next().await.unwrap().unwrap();
        assert_eq!(c1.delta, "hi");

        let done = stream.next().await.unwrap().unwrap();
        assert!(done.last);
        assert!(done.answer.is_none());

        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_partial_lines_are_buffered() {
        let data: Vec<Result<Bytes, reqwest::Error>> = vec![
            Ok(Bytes::from(r#"data: {"del"#)),
            Ok(Bytes::from("ta\":\"joined\"}\n")),
        ];

        let byte_stream = futures::stream::iter(data);
        let mut stream = AnswerStream::new(byte_stream);

        let chunk = stream.next().await.unwrap().unwrap();
        assert_eq!(chunk.delta, "joined");
    }

    #[tokio::test]
    async fn test_malformed_chunk_is_an_error() {
        let data = make_sse_bytes(&["data: {not json}"]);

        let byte_stream = futures::stream::iter(data);
        let mut stream = AnswerStream::new(byte_stream);

        let result = stream.next().await.unwrap();
        assert!(matches!(result, Err(AssistantError::Parse(_))));
    }
}
