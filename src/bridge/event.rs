//! Cache Event Module
//!
//! Event objects from every known upstream schema revision, and the resolver
//! that works out what kind of event an object is.

use serde_json::{Map, Value};

use crate::bridge::ports::{Diagnostic, Diagnostics};
use crate::error::ProbeError;

// == Event Kind ==
/// Wire code of an invalidate-one-key event
pub const INVALIDATE_CODE: i32 = 1;

/// Wire code of a flush-everything event
pub const FLUSH_CODE: i32 = 2;

/// What an inbound event asks the bridge to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Invalidate,
    Flush,
    Unknown,
}

impl EventKind {
    /// Maps a wire code onto a kind. Unlisted codes are `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            INVALIDATE_CODE => Self::Invalidate,
            FLUSH_CODE => Self::Flush,
            _ => Self::Unknown,
        }
    }
}

// == Kind Accessors ==
/// A named accessor through which some schema revision exposes the event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindAccessor {
    /// Accessor name in the upstream event API
    pub name: &'static str,
    /// Field carrying the accessor's value on the wire
    pub field: &'static str,
}

/// Known kind accessors, in probe order. The first one an event exposes wins.
pub const KIND_ACCESSORS: [KindAccessor; 2] = [
    KindAccessor {
        name: "getEventType",
        field: "eventType",
    },
    KindAccessor {
        name: "getType",
        field: "type",
    },
];

// == Event Object ==
/// Capability view of a decoded cache event.
///
/// Different upstream revisions expose different accessors, so nothing here
/// assumes a particular revision.
pub trait EventObject {
    /// Invokes a kind accessor.
    ///
    /// Returns `None` if the event has no such accessor, otherwise the result
    /// of the invocation.
    fn kind_code(&self, accessor: &KindAccessor) -> Option<Result<i32, ProbeError>>;

    /// The cache key, converted to a string. `None` if absent or empty.
    fn key(&self) -> Option<String>;
}

/// Cache event decoded from a JSON object payload.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonEvent {
    fields: Map<String, Value>,
}

impl JsonEvent {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl EventObject for JsonEvent {
    fn kind_code(&self, accessor: &KindAccessor) -> Option<Result<i32, ProbeError>> {
        let value = self.fields.get(accessor.field)?;
        let code = match value.as_i64() {
            Some(code) => i32::try_from(code).map_err(|_| ProbeError::OutOfRange {
                accessor: accessor.name,
                found: value.to_string(),
            }),
            None => Err(ProbeError::NotAnInteger {
                accessor: accessor.name,
                found: value.to_string(),
            }),
        };
        Some(code)
    }

    fn key(&self) -> Option<String> {
        match self.fields.get("key")? {
            Value::String(key) if !key.is_empty() => Some(key.clone()),
            Value::Number(key) => Some(key.to_string()),
            Value::Bool(key) => Some(key.to_string()),
            _ => None,
        }
    }
}

// == Event Type Resolver ==
/// Classifies event objects by probing their kind accessors in order.
#[derive(Debug, Clone, Copy)]
pub struct EventTypeResolver {
    accessors: &'static [KindAccessor],
}

impl Default for EventTypeResolver {
    fn default() -> Self {
        Self {
            accessors: &KIND_ACCESSORS,
        }
    }
}

impl EventTypeResolver {
    /// Classifies `event`.
    ///
    /// The first accessor the event exposes decides, even when invoking it
    /// fails. A missing accessor or a failed invocation yields `Unknown` and
    /// a diagnostic.
    pub fn classify<E>(&self, event: &E, diagnostics: &dyn Diagnostics) -> EventKind
    where
        E: EventObject + ?Sized,
    {
        let found = self
            .accessors
            .iter()
            .find_map(|accessor| event.kind_code(accessor));

        match found {
            Some(Ok(code)) => EventKind::from_code(code),
            Some(Err(err)) => {
                diagnostics.record(Diagnostic::AccessorFailed(&err));
                EventKind::Unknown
            }
            None => {
                diagnostics.record(Diagnostic::NoKindAccessor);
                EventKind::Unknown
            }
        }
    }
}
