//! Request/response messages exchanged with the autofill worker

use crate::suggest::Row;

use super::provider::AutofillError;

/// Requests sent to the autofill worker thread.
#[derive(Debug)]
pub enum AutofillRequest {
    /// Generate `count` new rows extending `base`.
    Generate {
        base: Vec<Row>,
        count: usize,
        /// Unique id for this request, echoed in the response so the
        /// cache can drop stale batches.
        request_id: u64,
    },
}

/// Outcomes sent back from the autofill worker thread.
///
/// The three variants make the swallow-or-propagate decision explicit
/// for the receiver: fresh rows, a recoverable miss, or a fault.
#[derive(Debug)]
pub enum AutofillResponse {
    /// Generation succeeded.
    Suggestions { rows: Vec<Row>, request_id: u64 },
    /// The provider could not produce usable rows this round; the
    /// receiver keeps whatever it already has.
    Unavailable {
        reason: AutofillError,
        request_id: u64,
    },
    /// Something broke that retrying won't fix.
    Failed {
        error: AutofillError,
        request_id: u64,
    },
}
