//! Response DTOs for the admin API

use serde::Serialize;

use crate::bridge::BridgeStatsSnapshot;
use crate::cache::CacheStats;
use crate::monitor::SourceSnapshot;

/// Response body for GET /cache/*key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: String,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for PUT /cache/*key
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    pub message: String,
    pub key: String,
}

impl PutResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached", key),
            key,
        }
    }
}

/// Response body for POST /messages
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryResponse {
    /// Always true: delivery never fails, even for rejected messages
    pub accepted: bool,
}

impl DeliveryResponse {
    pub fn accepted() -> Self {
        Self { accepted: true }
    }
}

/// Local cache section of the stats response
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache: CacheStatsResponse,
    pub bridge: BridgeStatsSnapshot,
}

impl StatsResponse {
    pub fn new(cache: CacheStats, bridge: BridgeStatsSnapshot) -> Self {
        let hit_rate = cache.hit_rate();
        Self {
            cache: CacheStatsResponse {
                stats: cache,
                hit_rate,
            },
            bridge,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Process status, "healthy" while serving
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Whether namespace prefixes are stripped from upstream keys
    pub namespace_aware: bool,
    /// Upstream event source liveness
    pub source: SourceSnapshot,
}

impl HealthResponse {
    pub fn healthy(source: SourceSnapshot, namespace_aware: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            namespace_aware,
            source,
        }
    }
}
