//! Data models and schemas for the weather relay.

pub mod api;
pub mod coordinates;

pub use api::*;
pub use coordinates::*;
