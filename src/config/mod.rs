//! Configuration structures and loading utilities.
//!
//! Every structure here has a `Default` impl and a `from_env()` constructor
//! that falls back to those defaults for missing or unparseable values.

pub mod cors;
pub mod server;
pub mod telemetry;
pub mod upstream;

pub use cors::*;
pub use server::*;
pub use telemetry::*;
pub use upstream::*;

// Serialises tests that modify environment variables
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
