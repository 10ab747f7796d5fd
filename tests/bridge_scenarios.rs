//! Bridge Scenario Tests
//!
//! End-to-end listener scenarios through the public API, with recording
//! collaborators sharing one call log.

use std::sync::{Arc, Mutex};

use cache_bridge::bridge::{
    CacheEventBridge, CacheInvalidator, Diagnostic, Diagnostics, HealthMonitor, InboundMessage,
    Outcome,
};
use serde_json::json;

// == Recording Collaborators ==

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<String>>,
    diagnostics: Mutex<Vec<String>>,
}

impl Recorder {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.lock().unwrap().clone()
    }
}

impl CacheInvalidator for Recorder {
    fn invalidate(&self, key: &str) {
        self.calls.lock().unwrap().push(format!("invalidate({key})"));
    }
}

impl HealthMonitor for Recorder {
    fn mark_source_up(&self) {
        self.calls.lock().unwrap().push("markSourceUp()".to_string());
    }
}

impl Diagnostics for Recorder {
    fn record(&self, diagnostic: Diagnostic<'_>) {
        self.diagnostics.lock().unwrap().push(diagnostic.to_string());
    }
}

fn bridge(namespace_aware: bool) -> (CacheEventBridge, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let bridge = CacheEventBridge::new(recorder.clone(), recorder.clone(), namespace_aware)
        .with_diagnostics(recorder.clone());
    (bridge, recorder)
}

// == Scenarios ==

#[test]
fn invalidate_page_with_namespace_capability() {
    let (bridge, recorder) = bridge(true);

    let outcome = bridge
        .process(&InboundMessage::object(
            &json!({ "eventType": 1, "key": "context:page/home" }),
        ))
        .unwrap();

    assert_eq!(outcome, Outcome::Invalidated("page/home".to_string()));
    assert_eq!(
        recorder.calls(),
        vec!["invalidate(page/home)", "markSourceUp()"]
    );
}

#[test]
fn flush_signals_liveness_without_invalidation() {
    let (bridge, recorder) = bridge(true);

    bridge.on_message(InboundMessage::object(&json!({ "eventType": 2 })));

    assert_eq!(recorder.calls(), vec!["markSourceUp()"]);
}

#[test]
fn plain_text_message_touches_nothing() {
    let (bridge, recorder) = bridge(true);

    bridge.on_message(InboundMessage::Text("{\"eventType\":2}".to_string()));

    assert!(recorder.calls().is_empty());
    assert_eq!(recorder.diagnostics().len(), 1);
}

#[test]
fn legacy_schema_codes() {
    let (bridge, recorder) = bridge(false);

    let outcomes: Vec<Outcome> = [1, 2, 99]
        .into_iter()
        .map(|code| {
            bridge
                .process(&InboundMessage::object(
                    &json!({ "type": code, "key": "ns:abc" }),
                ))
                .unwrap()
        })
        .collect();

    assert_eq!(
        outcomes,
        vec![
            Outcome::Invalidated("ns:abc".to_string()),
            Outcome::Flushed,
            Outcome::Ignored,
        ]
    );
    assert_eq!(
        recorder.calls(),
        vec!["invalidate(ns:abc)", "markSourceUp()", "markSourceUp()"]
    );
}

#[test]
fn current_schema_accessor_wins_over_legacy() {
    let (bridge, recorder) = bridge(true);

    bridge.on_message(InboundMessage::object(
        &json!({ "eventType": 2, "type": 1, "key": "ns:abc" }),
    ));

    assert_eq!(recorder.calls(), vec!["markSourceUp()"]);
}

#[test]
fn unrecognized_schema_is_a_noop_with_diagnostic() {
    let (bridge, recorder) = bridge(true);

    let outcome = bridge
        .process(&InboundMessage::object(&json!({ "kind": 1, "key": "ns:abc" })))
        .unwrap();

    assert_eq!(outcome, Outcome::Ignored);
    assert!(recorder.calls().is_empty());
    assert_eq!(recorder.diagnostics().len(), 1);
}
