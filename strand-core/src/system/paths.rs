use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static STRAND_HOME: OnceLock<PathBuf> = OnceLock::new();

/// Get the Strand home directory
/// Checks STRAND_HOME environment variable, falls back to ${HOME}/.strand
pub fn strand_home() -> PathBuf {
    STRAND_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("STRAND_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME").unwrap_or_else(|_| {
                    std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
                });
                PathBuf::from(home).join(".strand")
            }
        })
        .clone()
}

/// Path of the user configuration file: STRAND_HOME/config.toml
pub fn strand_config_path() -> PathBuf {
    strand_home().join("config.toml")
}
