//! API Handlers
//!
//! HTTP request handlers for message delivery and the admin endpoints.

use std::sync::{Arc, PoisonError, RwLock};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};

use crate::bridge::{CacheEventBridge, InboundMessage};
use crate::cache::{LocalCache, SharedCache};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    DeliveryResponse, GetResponse, HealthResponse, PutRequest, PutResponse, StatsResponse,
};
use crate::monitor::SourceMonitor;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Local cache kept consistent by the bridge
    pub cache: SharedCache,
    /// Upstream source liveness
    pub monitor: Arc<SourceMonitor>,
    /// Cache event listener
    pub bridge: Arc<CacheEventBridge>,
}

impl AppState {
    /// Wires a bridge to the given cache and a fresh source monitor.
    pub fn new(cache: LocalCache, namespace_aware: bool) -> Self {
        let cache = Arc::new(RwLock::new(cache));
        let monitor = Arc::new(SourceMonitor::new());
        let bridge = Arc::new(CacheEventBridge::new(
            cache.clone(),
            monitor.clone(),
            namespace_aware,
        ));
        Self {
            cache,
            monitor,
            bridge,
        }
    }

    /// Creates the state from configuration, running the capability probe.
    pub fn from_config(config: &Config) -> Self {
        let namespace_aware = config.probe_namespace_awareness();
        Self::new(LocalCache::new(config.default_ttl), namespace_aware)
    }
}

/// Handler for POST /messages
///
/// Hands the body to the bridge as a broker message. Always accepted: a
/// rejected message must not make the sender redeliver it.
pub async fn deliver_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<DeliveryResponse>) {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let message = InboundMessage::from_content_type(content_type, body.to_vec());

    state.bridge.on_message(message);

    (StatusCode::ACCEPTED, Json(DeliveryResponse::accepted()))
}

/// Handler for PUT /cache/*key
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    state
        .cache
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key.clone(), req.value, req.ttl)?;

    Ok(Json(PutResponse::new(key)))
}

/// Handler for GET /cache/*key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: expired entries are dropped on read
    let value = state
        .cache
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state
        .cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .stats();

    Json(StatsResponse::new(cache, state.bridge.stats()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.monitor.snapshot(),
        state.bridge.is_namespace_aware(),
    ))
}
