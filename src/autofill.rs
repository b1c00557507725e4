//! Autofill collaborator
//!
//! Generates new example rows from existing ones by prompting an LLM
//! provider. The worker runs the async provider calls on a dedicated
//! background thread so the owning event loop never blocks; the
//! [`Autofill`] trait is the seam the suggestion cache is written
//! against, so tests can substitute scripted providers.

pub mod parser;
pub mod prompt;
pub mod worker;

mod provider;
mod types;

// Re-export main types
pub use provider::{Autofill, AutofillClient, AutofillError, DummyClient, OpenAiClient};
pub use types::{AutofillRequest, AutofillResponse};
