//! Prompt templates and builders for the research assistant.
//!
//! Templates are plain `const` strings with `{placeholder}` markers filled
//! by `.replace`. Each builder is driven by an explicit context struct whose
//! fields document their own fallback values, so a missing record field
//! resolves to a deliberate default instead of silently formatting as
//! nothing.

mod restrictive;
mod wricef;

pub use restrictive::{build_restrictive_prompt, PromptContext, RESTRICTIVE_TEMPLATE};
pub use wricef::{build_wricef_prompt, WricefContext, WRICEF_TEMPLATE};
