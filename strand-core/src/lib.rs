//! Core types shared across all Strand crates

pub mod config;
pub mod error;
pub mod rule;
pub mod system;

// Re-export commonly used types
pub use config::{load_config, save_config, Config};
pub use error::{StrandError, StrandResult};
pub use rule::Rule;

/// Version information for the Strand project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
