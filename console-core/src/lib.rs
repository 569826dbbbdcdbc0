//! console-core: Shared infrastructure for the admin console workspace.
pub mod config;
pub mod error;
pub mod observability;

pub use error::CoreError;
pub use tracing;
