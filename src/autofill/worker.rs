//! Autofill worker thread
//!
//! Runs provider calls on a dedicated background thread so the owning
//! event loop never blocks. Receives generation requests over a channel,
//! resolves them against the provider, and sends the outcome back.
//!
//! Uses a single-threaded tokio runtime for the async provider calls.
//! A panicking provider ends the thread; the resulting channel
//! disconnect is what surfaces the fault to the owner.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};

use crate::suggest::Row;

use super::provider::{Autofill, AutofillError};
use super::types::{AutofillRequest, AutofillResponse};

/// Spawn the autofill worker thread.
///
/// `provider_result` carries the outcome of provider construction.
/// Passing an `Err` is allowed and turns every request into an
/// `Unavailable` response, so a misconfigured host degrades to "no
/// suggestions" instead of failing at startup.
pub fn spawn_worker<P>(
    provider_result: Result<P, AutofillError>,
    request_rx: Receiver<AutofillRequest>,
    response_tx: Sender<AutofillResponse>,
) where
    P: Autofill + Send + 'static,
{
    std::thread::spawn(move || {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            // Single-threaded runtime is enough: one request in flight at a time
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to create tokio runtime");
            rt.block_on(worker_loop(provider_result, request_rx, response_tx));
        }));

        if let Err(e) = result {
            let panic_msg = if let Some(s) = e.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = e.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            log::error!("autofill worker panicked: {panic_msg}");
        }
    });
}

/// Process requests until the channel closes.
///
/// Blocking `recv()` is fine here since we're in a dedicated thread.
async fn worker_loop<P: Autofill>(
    provider_result: Result<P, AutofillError>,
    request_rx: Receiver<AutofillRequest>,
    response_tx: Sender<AutofillResponse>,
) {
    let provider = match provider_result {
        Ok(p) => Some(p),
        Err(e) => {
            log::warn!("autofill provider unavailable: {e}");
            None
        }
    };

    while let Ok(request) = request_rx.recv() {
        let AutofillRequest::Generate {
            base,
            count,
            request_id,
        } = request;

        let response = match &provider {
            Some(provider) => resolve(provider, &base, count, request_id).await,
            None => AutofillResponse::Unavailable {
                reason: AutofillError::NotConfigured("no provider configured".to_string()),
                request_id,
            },
        };

        if response_tx.send(response).is_err() {
            // Owner dropped its receiver; nothing left to serve
            return;
        }
    }
}

/// Run one generation request and fold the provider result into an
/// explicit outcome: rows, a recoverable miss, or a fault.
async fn resolve<P: Autofill>(
    provider: &P,
    base: &[Row],
    count: usize,
    request_id: u64,
) -> AutofillResponse {
    match provider.autofill(base, count).await {
        Ok(rows) => AutofillResponse::Suggestions { rows, request_id },
        Err(reason) if reason.is_recoverable() => {
            log::debug!("generation request {request_id} unavailable: {reason}");
            AutofillResponse::Unavailable { reason, request_id }
        }
        Err(error) => AutofillResponse::Failed { error, request_id },
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
