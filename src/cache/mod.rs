//! Cache Module
//!
//! The local in-process cache the bridge keeps consistent with upstream.

use std::sync::{Arc, RwLock};

mod entry;
mod stats;
mod store;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::LocalCache;

/// Local cache shared between the bridge, the HTTP surface and background tasks.
pub type SharedCache = Arc<RwLock<LocalCache>>;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
