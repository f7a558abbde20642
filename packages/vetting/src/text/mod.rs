//! Sentence and numbered-item extraction from raw model output.

mod items;
mod sentences;

pub use items::{extract_numbered_items, fallback_items, tidy_sentence};
pub use sentences::first_sentence;
