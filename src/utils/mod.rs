//! Utility functions and helper modules.

pub mod http;
pub mod route;
pub mod time;

pub use http::*;
pub use route::*;
pub use time::*;
