use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::search;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub search: SearchConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,

    /// Insert the demo catalog on startup when the treasure table is empty.
    pub seed_demo_data: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/treasure-hunt.db".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
            seed_demo_data: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Directory served under `/docs`.
    pub docs_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
            docs_path: "docs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum box lookups in flight per search.
    pub fanout_concurrency: usize,

    /// Whole-search deadline. 0 disables it.
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fanout_concurrency: search::DEFAULT_FANOUT_CONCURRENCY,
            timeout_seconds: search::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = paths
            .iter()
            .find(|path| path.exists())
            .map_or_else(
                || {
                    info!("No config file found, using defaults");
                    Ok(Self::default())
                },
                |path| {
                    info!("Loading config from: {}", path.display());
                    Self::load_from_path(path)
                },
            )?;

        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// `PORT`, `DATABASE_URL` and `RUST_LOG` take precedence over the file.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?;
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.general.database_path = url;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            self.general.log_level = level;
        }

        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("treasure-hunt").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".treasure-hunt").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.max_db_connections < self.general.min_db_connections {
            anyhow::bail!(
                "max_db_connections ({}) must be >= min_db_connections ({})",
                self.general.max_db_connections,
                self.general.min_db_connections
            );
        }

        if self.search.fanout_concurrency == 0 {
            anyhow::bail!("search.fanout_concurrency must be > 0");
        }

        if !matches!(self.general.log_format.as_str(), "pretty" | "json") {
            anyhow::bail!(
                "general.log_format must be \"pretty\" or \"json\", got {:?}",
                self.general.log_format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.search.fanout_concurrency, 8);
        assert_eq!(config.search.timeout_seconds, 30);
        assert!(!config.general.seed_demo_data);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[search]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [search]
            fanout_concurrency = 2
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.search.fanout_concurrency, 2);

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.search.timeout_seconds, 30);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.search.fanout_concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.min_db_connections = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
