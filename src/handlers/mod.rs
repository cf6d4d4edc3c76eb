//! HTTP request handlers for API endpoints.

pub mod analytics;
pub mod health;
pub mod index;
pub mod metrics;
pub mod not_found;
pub mod openapi;
pub mod weather;

pub use analytics::*;
pub use health::*;
pub use index::*;
pub use metrics::*;
pub use not_found::*;
pub use openapi::*;
pub use weather::*;
