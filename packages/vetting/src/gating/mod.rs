//! Topic classification and topic/compliance gating.
//!
//! Gating is the step that turns "sentences the model produced" into
//! "sentences that are actually limitations relevant to the requirement":
//! every surviving sentence must carry a negative-limitation signal, and
//! when the description pins down topics, a term from one of those topics.

mod compliance;
mod enforce;
mod topics;

pub use compliance::{is_compliance_tied, COMPLIANCE_TERMS, NEGATIVE_VERBS};
pub use enforce::{enforce_compliance_gate, enforce_topic_gate, topic_gate};
pub use topics::{classify_topics, Topic, TOPIC_KEYWORDS};
