//! Network-boundary adapters.

#[cfg(feature = "assistant")]
pub mod assistant;
