//! Cache Event Bridge
//!
//! Broker message listener that turns upstream cache events into local cache
//! invalidations and liveness signals.

use std::sync::Arc;

use tracing::debug;

use crate::bridge::event::{EventKind, EventObject, EventTypeResolver};
use crate::bridge::message::InboundMessage;
use crate::bridge::normalizer::KeyNormalizer;
use crate::bridge::ports::{
    CacheInvalidator, Diagnostic, Diagnostics, HealthMonitor, TracingDiagnostics,
};
use crate::bridge::stats::{BridgeStats, BridgeStatsSnapshot};
use crate::error::BridgeError;

// == Outcome ==
/// What processing a message led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `key` was invalidated in the local cache
    Invalidated(String),
    /// Flush event acknowledged
    Flushed,
    /// Event of unknown kind, nothing done
    Ignored,
}

// == Cache Event Bridge ==
/// Listener for upstream cache events.
///
/// Holds no mutable state apart from atomic counters, so a single instance can
/// be shared by every broker delivery thread.
pub struct CacheEventBridge {
    invalidator: Arc<dyn CacheInvalidator>,
    monitor: Arc<dyn HealthMonitor>,
    diagnostics: Arc<dyn Diagnostics>,
    resolver: EventTypeResolver,
    normalizer: KeyNormalizer,
    stats: BridgeStats,
}

impl CacheEventBridge {
    // == Constructor ==
    /// Creates a bridge reporting diagnostics through `tracing`.
    ///
    /// # Arguments
    /// * `invalidator` - Cache receiving key invalidations
    /// * `monitor` - Receives a liveness signal per actioned event
    /// * `namespace_aware` - Whether upstream keys carry a namespace prefix
    pub fn new(
        invalidator: Arc<dyn CacheInvalidator>,
        monitor: Arc<dyn HealthMonitor>,
        namespace_aware: bool,
    ) -> Self {
        Self {
            invalidator,
            monitor,
            diagnostics: Arc::new(TracingDiagnostics),
            resolver: EventTypeResolver::default(),
            normalizer: KeyNormalizer::new(namespace_aware),
            stats: BridgeStats::new(),
        }
    }

    /// Replaces the diagnostics sink.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Returns true if namespace prefixes are stripped from keys.
    pub fn is_namespace_aware(&self) -> bool {
        self.normalizer.is_namespace_aware()
    }

    /// Returns the message counters.
    pub fn stats(&self) -> BridgeStatsSnapshot {
        self.stats.snapshot()
    }

    // == On Message ==
    /// Broker delivery callback.
    ///
    /// Never fails: rejected messages are reported to the diagnostics sink
    /// and dropped, leaving the cache and the monitor untouched.
    pub fn on_message(&self, message: InboundMessage) {
        self.stats.record_received();

        match self.process(&message) {
            Ok(Outcome::Invalidated(_)) => self.stats.record_invalidated(),
            Ok(Outcome::Flushed) => self.stats.record_flushed(),
            Ok(Outcome::Ignored) => self.stats.record_ignored(),
            Err(err) => {
                self.stats.record_rejected();
                self.diagnostics.record(Diagnostic::Rejected(&err));
            }
        }
    }

    // == Process ==
    /// Processes one message and reports what happened.
    ///
    /// The cache call, if any, always happens before the liveness signal.
    pub fn process(&self, message: &InboundMessage) -> Result<Outcome, BridgeError> {
        let event = message.read_event()?;

        match self.resolver.classify(&event, self.diagnostics.as_ref()) {
            EventKind::Invalidate => {
                let key = event.key().ok_or(BridgeError::MissingKey)?;
                let key = self.normalizer.normalize(&key);
                debug!(key = %key, "Invalidate");
                self.invalidator.invalidate(key);
                self.monitor.mark_source_up();
                Ok(Outcome::Invalidated(key.to_string()))
            }
            EventKind::Flush => {
                debug!("Flush");
                self.monitor.mark_source_up();
                Ok(Outcome::Flushed)
            }
            EventKind::Unknown => {
                debug!("Ignoring cache event of unknown kind");
                Ok(Outcome::Ignored)
            }
        }
    }
}
