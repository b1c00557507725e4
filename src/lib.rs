//! rowfill - debounced AI autofill suggestions for example-row editors
//!
//! The heart of the crate is [`SuggestionCache`]: it watches a user's
//! example rows, waits for typing to settle, and keeps a small queue of
//! LLM-generated follow-up rows fresh without regenerating more often
//! than necessary. Generation runs on a background worker thread behind
//! the [`autofill::Autofill`] seam, so an owning event loop never blocks.

pub mod autofill;
pub mod config;
pub mod suggest;

// Re-export commonly used types for convenience
pub use autofill::{Autofill, AutofillClient, AutofillError, AutofillRequest, AutofillResponse};
pub use config::Config;
pub use suggest::{Row, SuggestionCache};
