//! Bridge Module
//!
//! Turns upstream cache events delivered by a message broker into local cache
//! invalidations and liveness signals.

mod event;
mod listener;
mod message;
mod normalizer;
mod ports;
mod stats;


// Re-export public types
pub use event::{
    EventKind, EventObject, EventTypeResolver, JsonEvent, KindAccessor, FLUSH_CODE,
    INVALIDATE_CODE, KIND_ACCESSORS,
};
pub use listener::{CacheEventBridge, Outcome};
pub use message::InboundMessage;
pub use normalizer::KeyNormalizer;
pub use ports::{CacheInvalidator, Diagnostic, Diagnostics, HealthMonitor, TracingDiagnostics};
pub use stats::{BridgeStats, BridgeStatsSnapshot};
