//! Limitations Research Vetting Library
//!
//! Takes unconstrained answers from a web-based research assistant and
//! deterministically reduces them to a well-formed artifact: a numbered
//! list of single-sentence, topic-gated, deduplicated limitations plus a
//! structured validation block, with a companion validation pass that
//! prunes invalid evidence rows and computes a pass/fail verdict.
//!
//! # Design Philosophy
//!
//! - Degrade, don't fail: malformed model output becomes the sentinel
//!   result, never an error
//! - Structural conformance only, no claim of factual truth
//! - Transport shapes stop at the adapter boundary; the pipeline only sees
//!   [`client::StreamEvent`]
//! - Core transforms are pure; progress reporting is injected
//!
//! # Usage
//!
//! ```rust,ignore
//! use vetting::pipeline::{process_records, PipelineConfig, TracingObserver};
//! use vetting::testing::MockClient;
//!
//! let client = MockClient::new("1. Exports cannot be scheduled.\n{\"validation\":[]}");
//! let processed = process_records(
//!     &records,
//!     &client,
//!     &PipelineConfig::default(),
//!     None,
//!     &TracingObserver,
//! ).await;
//! ```
//!
//! # Modules
//!
//! - [`text`] - Sentence and numbered-item extraction
//! - [`gating`] - Topic classification and compliance gating
//! - [`sanitize`] - Raw answer → numbered text + validation block
//! - [`validate`] - Evidence normalization and record validation
//! - [`prompts`] - Prompt templates and context builders
//! - [`pipeline`] - Per-record orchestration and batch processing
//! - [`client`] - Research client trait and stream collection
//! - [`rewrite`] - Advisory human-readable rewrite stage
//! - [`jsonl`] - JSON Lines file helpers
//! - [`testing`] - Mock client for tests

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod gating;
pub mod jsonl;
pub mod net;
pub mod pipeline;
pub mod prompts;
pub mod record;
pub mod rewrite;
pub mod sanitize;
pub mod testing;
pub mod text;
pub mod validate;

// Re-export core types at crate root
pub use client::{collect_stream_text, EventStream, ResearchClient, StreamEvent};
pub use config::RunConfig;
pub use constants::{DEFAULT_MAX_ITEMS, DEFAULT_MIN_ITEMS, SENTINEL_TEXT};
pub use error::{Result, VettingError};
pub use pipeline::{
    process_records, process_single_record, NoopObserver, PipelineConfig, PipelineObserver,
    TracingObserver,
};
pub use record::{Metrics, Record, ValidationBlock, ValidationRow};
pub use rewrite::RewriterConfig;
pub use sanitize::{
    extract_validation_from_raw, is_sentinel, sanitize_limitations_output, strip_validation_block,
    Sanitized, SanitizeConfig,
};
pub use validate::{is_authoritative, normalize_module, validate_record};
