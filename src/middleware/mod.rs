//! Custom middleware implementations for the API.
//!
//! Request IDs, metrics collection, CORS headers and JSON error bodies.

pub mod cors;
pub mod error_handlers;
pub mod metrics;
pub mod request_id;

pub use cors::*;
pub use error_handlers::*;
pub use metrics::*;
pub use request_id::*;
