//! Configuration types for Strand

use crate::error::{StrandError, StrandResult};
use crate::system::paths::strand_config_path;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Per-tool binary locations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsConfig {
    /// Explicit binary paths keyed by program name (e.g. "samtools").
    /// Takes precedence over PATH lookup.
    #[serde(default)]
    pub overrides: HashMap<String, PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExecutionConfig {
    /// Default thread count for multi-threaded tools (0 = all cores)
    #[serde(default)]
    pub threads: usize,
}

impl Config {
    /// Load the user config from its default location, falling back to
    /// defaults when no config file exists.
    pub fn load_default() -> StrandResult<Self> {
        let path = strand_config_path();
        if path.exists() {
            load_config(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> StrandResult<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &Config, path: &Path) -> StrandResult<()> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| StrandError::Configuration(e.to_string()))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.execution.threads, 0);
        assert!(config.tools.overrides.is_empty());
    }

    #[test]
    fn test_config_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut config = Config::default();
        config.execution.threads = 4;
        config
            .tools
            .overrides
            .insert("samtools".to_string(), PathBuf::from("/opt/bio/samtools"));

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded.execution.threads, 4);
        assert_eq!(
            loaded.tools.overrides.get("samtools"),
            Some(&PathBuf::from("/opt/bio/samtools"))
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[execution]\nthreads = 2\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.execution.threads, 2);
        assert!(config.tools.overrides.is_empty());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "execution = \"nope\"").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(StrandError::Parse(_))
        ));
    }
}
