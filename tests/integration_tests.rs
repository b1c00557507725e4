//! End-to-end tests driving the suggestion cache against a real worker
//! thread with scripted providers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use rowfill::{Autofill, AutofillClient, AutofillError, Row, SuggestionCache};

/// Provider that replays a scripted sequence of outcomes and counts how
/// often it was asked.
#[derive(Clone)]
struct ScriptedProvider {
    script: Arc<Mutex<VecDeque<Result<Vec<Row>, AutofillError>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    fn new(outcomes: Vec<Result<Vec<Row>, AutofillError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Autofill for ScriptedProvider {
    async fn autofill(&self, _base: &[Row], _count: usize) -> Result<Vec<Row>, AutofillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AutofillError::NotConfigured("script exhausted".to_string())))
    }
}

type Notifications = Arc<Mutex<Vec<Vec<Row>>>>;

fn recording_cache(debounce_ms: u64) -> (SuggestionCache, Notifications) {
    let notifications: Notifications = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&notifications);
    let cache = SuggestionCache::with_debounce_ms(
        move |rows: &[Row]| sink.lock().unwrap().push(rows.to_vec()),
        debounce_ms,
    );
    (cache, notifications)
}

fn rows(values: &[&str]) -> Arc<Vec<Row>> {
    Arc::new(values.iter().map(|v| v.to_string()).collect())
}

fn svec(values: &[&str]) -> Vec<Row> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Tick the cache until `done` holds or a deadline passes.
fn drive(cache: &mut SuggestionCache, done: impl Fn(&SuggestionCache) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done(cache) {
        assert!(
            Instant::now() < deadline,
            "condition not reached within deadline"
        );
        cache.tick().expect("tick failed");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_refresh_then_recoverable_failure() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (mut cache, notifications) = recording_cache(50);
    let provider = ScriptedProvider::new(vec![
        Ok(svec(&["Berlin", "Madrid", "Rome"])),
        Err(AutofillError::Api {
            code: 429,
            message: "quota exceeded".to_string(),
        }),
    ]);
    cache.spawn_autofill(Ok(provider.clone()));

    cache.update(rows(&["Paris", "Tokyo"]));
    drive(&mut cache, |cache| !cache.peek_suggestions().is_empty());

    assert_eq!(cache.peek_suggestions(), ["Berlin", "Madrid", "Rome"]);
    assert!(!cache.is_loading());
    assert_eq!(notifications.lock().unwrap().len(), 1);
    assert_eq!(provider.calls(), 1);

    // A content edit triggers a second refresh; the script answers it
    // with a quota error, which must leave the queue untouched.
    cache.update(rows(&["Paris", "Oslo"]));
    drive(&mut cache, |cache| cache.is_loading());
    drive(&mut cache, |cache| !cache.is_loading());

    assert_eq!(cache.peek_suggestions(), ["Berlin", "Madrid", "Rome"]);
    assert_eq!(notifications.lock().unwrap().len(), 1);
    assert_eq!(provider.calls(), 2);
}

#[test]
fn test_burst_of_updates_yields_single_generation() {
    let (mut cache, _notifications) = recording_cache(50);
    let provider = ScriptedProvider::new(vec![Ok(svec(&["one", "two"]))]);
    cache.spawn_autofill(Ok(provider.clone()));

    cache.update(rows(&["a"]));
    cache.update(rows(&["ab"]));
    cache.update(rows(&["abc"]));
    drive(&mut cache, |cache| !cache.peek_suggestions().is_empty());

    assert_eq!(provider.calls(), 1);
    assert_eq!(cache.peek_suggestions(), ["one", "two"]);
}

#[test]
fn test_fatal_provider_error_propagates() {
    let (mut cache, _notifications) = recording_cache(30);
    let provider = ScriptedProvider::new(vec![Err(AutofillError::Internal("boom".to_string()))]);
    cache.spawn_autofill(Ok(provider));

    cache.update(rows(&["alpha"]));

    let deadline = Instant::now() + Duration::from_secs(5);
    let err = loop {
        match cache.tick() {
            Err(e) => break e,
            Ok(_) => {
                assert!(
                    Instant::now() < deadline,
                    "fatal error never surfaced"
                );
                thread::sleep(Duration::from_millis(5));
            }
        }
    };

    assert!(!err.is_recoverable());
    assert!(!cache.is_loading());
}

#[test]
fn test_misconfigured_provider_degrades_to_no_suggestions() {
    let (mut cache, notifications) = recording_cache(30);
    let provider_result: Result<AutofillClient, AutofillError> =
        Err(AutofillError::NotConfigured("disabled".to_string()));
    cache.spawn_autofill(provider_result);

    cache.update(rows(&["alpha"]));
    drive(&mut cache, |cache| cache.is_loading());
    drive(&mut cache, |cache| !cache.is_loading());

    assert!(cache.peek_suggestions().is_empty());
    assert!(notifications.lock().unwrap().is_empty());
}

#[test]
fn test_consume_suggestions_after_refresh() {
    let (mut cache, notifications) = recording_cache(30);
    let provider = ScriptedProvider::new(vec![Ok(svec(&["a", "b", "c"]))]);
    cache.spawn_autofill(Ok(provider));

    cache.update(rows(&["seed"]));
    drive(&mut cache, |cache| !cache.peek_suggestions().is_empty());

    assert_eq!(cache.pop_suggestion(None), Some("a".to_string()));
    cache.cycle_suggestions();
    assert_eq!(cache.peek_suggestions(), ["c", "b"]);
    assert_eq!(cache.remove_suggestion("b"), Some("b".to_string()));
    assert_eq!(cache.peek_suggestions(), ["c"]);

    // refresh, pop, cycle, remove: one notification each
    assert_eq!(notifications.lock().unwrap().len(), 4);
}
