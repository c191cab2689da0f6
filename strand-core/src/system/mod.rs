//! System-level utilities (paths, environment)

pub mod paths;

pub use paths::{strand_config_path, strand_home};
