//! Collaborator Ports
//!
//! Interfaces the embedding application implements for the bridge: the cache
//! being invalidated, the health monitor, and the diagnostics sink.

use std::fmt;

use tracing::{error, warn};

use crate::error::{BridgeError, ProbeError};

/// Target of key-level invalidations.
///
/// Called synchronously from the broker's delivery thread, so implementations
/// should be fast.
pub trait CacheInvalidator: Send + Sync {
    /// Drops `key` from the cache. The key is never namespace-prefixed.
    fn invalidate(&self, key: &str);
}

/// Liveness sink for the upstream event source.
pub trait HealthMonitor: Send + Sync {
    /// Signals that an event from the source was just actioned.
    fn mark_source_up(&self);
}

// == Diagnostics ==
/// Something the bridge noticed while absorbing a fault.
#[derive(Debug)]
pub enum Diagnostic<'a> {
    /// Message rejected before any side effect
    Rejected(&'a BridgeError),
    /// Event exposes none of the known kind accessors
    NoKindAccessor,
    /// Event exposes a kind accessor, but invoking it failed
    AccessorFailed(&'a ProbeError),
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::NoKindAccessor => write!(f, "No known kind accessor found on cache event"),
            Self::AccessorFailed(err) => write!(f, "Could not process cache event: {err}"),
        }
    }
}

/// Sink for bridge diagnostics.
pub trait Diagnostics: Send + Sync {
    fn record(&self, diagnostic: Diagnostic<'_>);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, diagnostic: Diagnostic<'_>) {
        match diagnostic {
            Diagnostic::Rejected(err) => error!(error = %err, "Cache message rejected"),
            Diagnostic::NoKindAccessor => warn!("No known kind accessor found on cache event"),
            Diagnostic::AccessorFailed(err) => {
                error!(error = %err, "Could not process cache event")
            }
        }
    }
}
