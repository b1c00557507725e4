//! Suggestion cache and refresh decision logic
//!
//! [`SuggestionCache`] owns the current suggestion queue and decides, on
//! each debounced row-set update, whether cached suggestions can be kept,
//! extended in place, or must be regenerated through the autofill worker.
//! Owners drive it from their event loop: call [`SuggestionCache::update`]
//! whenever the rows change and [`SuggestionCache::tick`] once per loop
//! iteration. Every mutation of the queue is pushed to the owner through
//! the notification callback, synchronously and exactly once.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::autofill::{Autofill, AutofillError, AutofillRequest, AutofillResponse, worker};
use crate::config::AutofillConfig;

use super::debouncer::{DEFAULT_DEBOUNCE_MS, Debouncer};
use super::rows::{self, Row};

/// How many suggestions to request per refresh.
pub const DEFAULT_SUGGESTION_COUNT: usize = 5;

/// Callback invoked with a snapshot of the queue after every mutation.
pub type SuggestionsUpdated = Box<dyn FnMut(&[Row]) + Send>;

/// Stateful controller for a queue of AI-generated example rows.
///
/// One instance per editing session, explicitly owned by its UI context
/// and discarded with it. All state is mutated on the owner's thread;
/// the only asynchrony is the autofill worker reached over channels.
pub struct SuggestionCache {
    /// Row set the current suggestions were derived from. Compared by
    /// allocation identity (`Arc::ptr_eq`), not content: a rebuilt but
    /// content-identical base still counts as changed.
    base: Arc<Vec<Row>>,
    /// Currently available suggestions, front first.
    suggestions: Vec<Row>,
    /// Queue as it was before the most recent replacement; consulted by
    /// the extension check so that rows the user adopted from an earlier
    /// batch don't count as edits.
    previous_suggestions: Vec<Row>,
    /// True while a generation request is outstanding. Gates re-entrant
    /// refreshes: at most one request is ever in flight.
    loading: bool,
    /// Most recent base handed to `update`, waiting out the debounce
    /// window. Overwritten by each call, so only the newest survives.
    pending_base: Option<Arc<Vec<Row>>>,
    debouncer: Debouncer,
    /// Suggestions requested per refresh.
    count: usize,
    on_suggestions_updated: SuggestionsUpdated,
    request_tx: Option<Sender<AutofillRequest>>,
    response_rx: Option<Receiver<AutofillResponse>>,
    /// Incremented per generation request; responses carrying an older
    /// id are dropped.
    request_id: u64,
}

impl SuggestionCache {
    /// Create a cache with the default 1000ms debounce window.
    ///
    /// `on_suggestions_updated` is the cache's only way of pushing state
    /// to its owner; it receives the new queue snapshot after every
    /// mutation.
    pub fn new(on_suggestions_updated: impl FnMut(&[Row]) + Send + 'static) -> Self {
        Self::with_debounce_ms(on_suggestions_updated, DEFAULT_DEBOUNCE_MS)
    }

    /// Same as [`SuggestionCache::new`] with a custom quiescence window.
    pub fn with_debounce_ms(
        on_suggestions_updated: impl FnMut(&[Row]) + Send + 'static,
        delay_ms: u64,
    ) -> Self {
        Self {
            base: Arc::new(Vec::new()),
            suggestions: Vec::new(),
            previous_suggestions: Vec::new(),
            loading: false,
            pending_base: None,
            debouncer: Debouncer::new(delay_ms),
            count: DEFAULT_SUGGESTION_COUNT,
            on_suggestions_updated: Box::new(on_suggestions_updated),
            request_tx: None,
            response_rx: None,
            request_id: 0,
        }
    }

    /// Build a cache tuned from the `[autofill]` config section.
    pub fn from_config(
        config: &AutofillConfig,
        on_suggestions_updated: impl FnMut(&[Row]) + Send + 'static,
    ) -> Self {
        let mut cache = Self::with_debounce_ms(on_suggestions_updated, config.debounce_ms);
        cache.count = config.num_suggestions;
        cache
    }

    /// Wire the cache to an autofill worker. Without one, refreshes are
    /// skipped with a log line; the queue operations still work.
    pub fn connect_worker(
        &mut self,
        request_tx: Sender<AutofillRequest>,
        response_rx: Receiver<AutofillResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    /// Convenience: create the channels, spawn a worker around
    /// `provider_result`, and wire it up.
    pub fn spawn_autofill<P>(&mut self, provider_result: Result<P, AutofillError>)
    where
        P: Autofill + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        worker::spawn_worker(provider_result, request_rx, response_tx);
        self.connect_worker(request_tx, response_rx);
    }

    /// Debounced entry point: record the newest row set and restart the
    /// quiescence window.
    ///
    /// The decision logic runs from [`SuggestionCache::tick`] once the
    /// window closes; a burst of calls collapses into one evaluation of
    /// the most recent row set.
    pub fn update(&mut self, new_base: Arc<Vec<Row>>) {
        self.pending_base = Some(new_base);
        self.debouncer.schedule();
    }

    /// Event-loop hook: apply any worker responses, then run the
    /// debounced evaluation if its window has closed.
    ///
    /// Returns whether any state changed. Recoverable generation
    /// failures are logged and swallowed; anything else is returned as
    /// an error.
    pub fn tick(&mut self) -> Result<bool, AutofillError> {
        let mut changed = self.poll_responses()?;
        if self.debouncer.is_ready() {
            self.debouncer.mark_complete();
            if let Some(base) = self.pending_base.take() {
                self.evaluate(base);
                changed = true;
            }
        }
        Ok(changed)
    }

    /// True while a row-set update is waiting out the debounce window.
    pub fn has_pending_update(&self) -> bool {
        self.debouncer.has_pending()
    }

    /// Current suggestion queue, front first. No side effects.
    pub fn peek_suggestions(&self) -> &[Row] {
        &self.suggestions
    }

    /// Remove and return the suggestion at `index`, defaulting to the
    /// front. `None` and `Some(0)` deliberately behave identically.
    /// Returns `None`, without notifying, when the queue is empty or the
    /// index is out of range.
    pub fn pop_suggestion(&mut self, index: Option<usize>) -> Option<Row> {
        let index = index.unwrap_or(0);
        if index >= self.suggestions.len() {
            return None;
        }
        let row = self.suggestions.remove(index);
        self.notify();
        Some(row)
    }

    /// Remove the first suggestion equal to `row`, if present. An absent
    /// row is a no-op, not a removal from the far end of the queue.
    pub fn remove_suggestion(&mut self, row: &str) -> Option<Row> {
        let index = self.suggestions.iter().position(|s| s == row)?;
        self.pop_suggestion(Some(index))
    }

    /// Rotate the queue front-to-back. Rotating an empty or
    /// single-element queue changes nothing and stays silent.
    pub fn cycle_suggestions(&mut self) {
        if self.suggestions.len() < 2 {
            return;
        }
        self.suggestions.rotate_left(1);
        self.notify();
    }

    /// True while a generation request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Run the refresh decision for `new_base`. Split out of `tick` so
    /// the logic is testable without waiting out the debounce window.
    fn evaluate(&mut self, new_base: Arc<Vec<Row>>) {
        if !rows::enough_rows(&new_base) {
            self.suggestions.clear();
            self.notify();
            return;
        }
        if self.should_refresh(&new_base) {
            self.base = Arc::clone(&new_base);
            self.request_generation();
        }
        // Checked independently of the refresh decision: an edit can both
        // leave the current suggestions valid and advance the base.
        if rows::is_extension_ignore_empty(&new_base, &self.base, &self.previous_suggestions) {
            self.base = new_base;
        }
    }

    /// A refresh is due when nothing is cached, or when the row set is a
    /// different allocation whose content is not a mere extension of
    /// what the suggestions were derived from. An outstanding request
    /// always defers the refresh to a later update.
    fn should_refresh(&self, new_base: &Arc<Vec<Row>>) -> bool {
        if self.loading {
            return false;
        }
        self.suggestions.is_empty()
            || (rows::enough_rows(new_base)
                && !Arc::ptr_eq(new_base, &self.base)
                && !rows::is_extension_ignore_empty(
                    new_base,
                    &self.base,
                    &self.previous_suggestions,
                ))
    }

    fn request_generation(&mut self) {
        let Some(tx) = self.request_tx.as_ref() else {
            log::debug!("no autofill worker connected, skipping refresh");
            return;
        };
        self.request_id += 1;
        let request = AutofillRequest::Generate {
            base: self.base.as_ref().clone(),
            count: self.count,
            request_id: self.request_id,
        };
        match tx.send(request) {
            Ok(()) => self.loading = true,
            Err(e) => log::warn!("autofill worker unreachable: {e}"),
        }
    }

    /// Drain the response channel and apply what arrived. A dead worker
    /// while a request is outstanding is a fault, not a miss.
    fn poll_responses(&mut self) -> Result<bool, AutofillError> {
        let Some(rx) = self.response_rx.as_ref() else {
            return Ok(false);
        };

        let mut responses = Vec::new();
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(response) => responses.push(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        let had_responses = !responses.is_empty();
        for response in responses {
            self.apply_response(response)?;
        }

        if disconnected && self.loading {
            self.loading = false;
            return Err(AutofillError::Internal(
                "autofill worker disconnected with a request outstanding".to_string(),
            ));
        }
        Ok(had_responses)
    }

    /// Fold one worker outcome into the cache. Fresh rows replace the
    /// queue wholesale; a recoverable miss leaves it untouched; a fault
    /// propagates to the caller.
    fn apply_response(&mut self, response: AutofillResponse) -> Result<(), AutofillError> {
        match response {
            AutofillResponse::Suggestions { mut rows, request_id }
                if request_id == self.request_id =>
            {
                rows.truncate(self.count);
                self.previous_suggestions = std::mem::replace(&mut self.suggestions, rows);
                self.loading = false;
                self.notify();
            }
            AutofillResponse::Suggestions { request_id, .. } => {
                log::debug!("dropping stale suggestion batch for request {request_id}");
            }
            AutofillResponse::Unavailable { reason, request_id } => {
                if request_id == self.request_id {
                    self.loading = false;
                }
                log::warn!("suggestion refresh unavailable: {reason}");
            }
            AutofillResponse::Failed { error, request_id } => {
                if request_id == self.request_id {
                    self.loading = false;
                }
                return Err(error);
            }
        }
        Ok(())
    }

    fn notify(&mut self) {
        (self.on_suggestions_updated)(&self.suggestions);
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
