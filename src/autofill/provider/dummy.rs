//! Spoofed autofill provider
//!
//! Produces rows of random ASCII characters, each after a random delay
//! between 0.1 and 3 seconds, so an owning editor can be exercised
//! without any outbound API calls.

use std::time::Duration;

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::suggest::Row;

use super::AutofillError;

#[derive(Debug, Clone, Copy, Default)]
pub struct DummyClient;

impl DummyClient {
    pub fn new() -> Self {
        Self
    }

    /// Generate `count` spoofed rows. Never fails.
    pub async fn autofill(&self, _base: &[Row], count: usize) -> Result<Vec<Row>, AutofillError> {
        let mut rows = Vec::with_capacity(count);
        for _ in 0..count {
            // ThreadRng is not Send; keep it scoped away from the await
            let (delay, row) = {
                let mut rng = rand::rng();
                let delay = Duration::from_millis(rng.random_range(100..3000));
                let len = rng.random_range(6..24);
                let row: Row = (&mut rng)
                    .sample_iter(Alphanumeric)
                    .take(len)
                    .map(char::from)
                    .collect();
                (delay, row)
            };
            tokio::time::sleep(delay).await;
            rows.push(row);
        }
        Ok(rows)
    }
}
