//! Business logic and service layer modules.
//!
//! Validation, location tracking, analytics and the upstream weather proxy
//! live here, independent of the HTTP surface in `handlers`.

pub mod analytics;
pub mod location_tracker;
pub mod metrics;
pub mod validation;
pub mod weather;

pub use analytics::*;
pub use location_tracker::*;
pub use metrics::*;
pub use validation::*;
pub use weather::*;
