//! Configuration Module
//!
//! Loads process configuration from environment variables and derives the
//! upstream namespace capability handed to the bridge.

use std::env;

use tracing::info;

/// First upstream release emitting namespace-prefixed cache keys.
pub const NAMESPACE_AWARE_SINCE: (u32, u32) = (8, 5);

/// Shortest allowed sweep or watchdog period, in seconds.
pub const MIN_INTERVAL_SECS: u64 = 1;

/// Process configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Default TTL in seconds for locally cached entries
    pub default_ttl: u64,
    /// Interval in seconds between expired-entry sweeps
    pub cleanup_interval: u64,
    /// Seconds without a liveness signal before the source is considered down
    pub source_timeout: u64,
    /// Interval in seconds between liveness checks
    pub watchdog_interval: u64,
    /// Explicit namespace capability, overrides the version probe
    pub namespace_aware: Option<bool>,
    /// Upstream release, e.g. "8.5" or "11.5"
    pub upstream_version: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL` - Local cache TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1, min: 1)
    /// - `SOURCE_TIMEOUT` - Source liveness timeout in seconds (default: 60)
    /// - `WATCHDOG_INTERVAL` - Liveness check frequency in seconds (default: 5, min: 1)
    /// - `NAMESPACE_AWARE` - `true`/`false`, overrides the version probe (default: unset)
    /// - `UPSTREAM_VERSION` - Upstream release used by the probe (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval)
                .max(MIN_INTERVAL_SECS),
            source_timeout: parse_var("SOURCE_TIMEOUT").unwrap_or(defaults.source_timeout),
            watchdog_interval: parse_var("WATCHDOG_INTERVAL")
                .unwrap_or(defaults.watchdog_interval)
                .max(MIN_INTERVAL_SECS),
            namespace_aware: parse_var("NAMESPACE_AWARE"),
            upstream_version: env::var("UPSTREAM_VERSION")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    // == Capability Probe ==
    /// Decides once whether upstream cache keys carry a namespace prefix.
    ///
    /// An explicit `namespace_aware` wins. Otherwise the upstream version is
    /// compared against [`NAMESPACE_AWARE_SINCE`]; unknown or unparsable
    /// versions are treated as not namespace aware.
    pub fn probe_namespace_awareness(&self) -> bool {
        if let Some(explicit) = self.namespace_aware {
            info!(namespace_aware = explicit, "Namespace awareness set explicitly");
            return explicit;
        }

        let aware = self
            .upstream_version
            .as_deref()
            .and_then(parse_release)
            .is_some_and(|release| release >= NAMESPACE_AWARE_SINCE);

        if aware {
            info!("Upstream is namespace aware (version 8.5+)");
        } else {
            info!("Upstream is not namespace aware (version < 8.5 or unknown)");
        }
        aware
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_ttl: 300,
            cleanup_interval: 1,
            source_timeout: 60,
            watchdog_interval: 5,
            namespace_aware: None,
            upstream_version: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Parses "major[.minor[...]]" into (major, minor).
fn parse_release(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(minor) => minor.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}
