//! API Module
//!
//! HTTP delivery adapter and admin endpoints.
//!
//! # Endpoints
//! - `POST /messages` - Deliver a broker message to the bridge
//! - `PUT /cache/*key` - Store a value in the local cache
//! - `GET /cache/*key` - Read a value from the local cache
//! - `GET /stats` - Cache and bridge counters
//! - `GET /health` - Process health and source liveness

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
