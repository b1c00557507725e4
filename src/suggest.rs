//! Suggestion management for example-row editors
//!
//! Watches edits to a list of example rows, decides when cached
//! AI-generated suggestions are stale versus still usable, refreshes them
//! through the autofill worker, and hands suggestions out one at a time
//! through a small queue API.

mod debouncer;

pub mod cache;
pub mod rows;

// Re-export main types
pub use cache::SuggestionCache;
pub use rows::Row;
