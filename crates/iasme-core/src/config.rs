//! Run configuration for the research pipeline.
//!
//! Configuration is layered: built-in defaults, an optional TOML file,
//! `IASME_*` environment overrides, then command-line flags applied by the
//! binary. The core only consumes the resulting [`AppConfig`].

use crate::error::{ConfigError, ConfigResult};
use crate::normalise::DirectoryHost;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default directory index page.
pub const DEFAULT_INDEX_URL: &str = "https://iasme.co.uk/network-directory/";

/// Default search results endpoint used by the website fallback.
pub const DEFAULT_SEARCH_URL: &str = "https://duckduckgo.com/html/";

/// Flat mapping from record key to output key.
pub type RenameMap = HashMap<String, String>;

/// Main run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory and search endpoints
    pub directory: DirectoryConfig,
    /// Concurrency, pacing and retry settings
    pub scanning: ScanningConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Output artifact settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Missing sections and keys fall back to defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from an optional file, then apply environment overrides.
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `IASME_*` overrides using the given variable lookup.
    ///
    /// Supports the following variables:
    /// - `IASME_HEADLESS`: browser headless mode (true/false)
    /// - `IASME_CONCURRENCY`: concurrent company resolutions
    /// - `IASME_DELAY_MS`: inter-request delay
    /// - `IASME_RETRIES`: HTTP retry count
    /// - `IASME_TIMEOUT_MS`: per-request timeout
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(headless) = lookup("IASME_HEADLESS").and_then(|v| v.parse().ok()) {
            self.browser.headless = headless;
            tracing::debug!("Override browser.headless from env: {}", headless);
        }

        if let Some(concurrency) = lookup("IASME_CONCURRENCY").and_then(|v| v.parse().ok()) {
            self.scanning.concurrency = concurrency;
            tracing::debug!("Override scanning.concurrency from env: {}", concurrency);
        }

        if let Some(delay_ms) = lookup("IASME_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.scanning.delay_ms = delay_ms;
            tracing::debug!("Override scanning.delay_ms from env: {}", delay_ms);
        }

        if let Some(retries) = lookup("IASME_RETRIES").and_then(|v| v.parse().ok()) {
            self.scanning.retries = retries;
            tracing::debug!("Override scanning.retries from env: {}", retries);
        }

        if let Some(timeout_ms) = lookup("IASME_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.scanning.timeout_ms = timeout_ms;
            tracing::debug!("Override scanning.timeout_ms from env: {}", timeout_ms);
        }
    }

    /// Check values that would otherwise fail mid-run.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scanning.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        self.directory_host()?;

        if url::Url::parse(&self.directory.search_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "directory.search_url".to_string(),
                reason: format!("not a URL: {}", self.directory.search_url),
            });
        }

        Ok(())
    }

    /// Host of the directory index, used to tell directory-hosted links apart.
    pub fn directory_host(&self) -> ConfigResult<DirectoryHost> {
        DirectoryHost::from_index(&self.directory.index).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "directory.index".to_string(),
                reason: format!("not an absolute URL with a host: {}", self.directory.index),
            }
        })
    }
}

/// Directory and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Directory index URL
    pub index: String,
    /// Search results page used when no website is known
    pub search_url: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

/// Concurrency, pacing and retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Maximum companies resolved at once
    pub concurrency: usize,
    /// Politeness delay in milliseconds, also the retry backoff base
    pub delay_ms: u64,
    /// Additional HTTP attempts after the first failure
    pub retries: u32,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Process at most this many directory entries
    pub max_companies: Option<usize>,
}

impl ScanningConfig {
    /// Per-request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Politeness delay as a `Duration`.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            delay_ms: 500,
            retries: 3,
            timeout_ms: 15_000,
            max_companies: None,
        }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self { headless: true }
    }
}

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty-printed JSON array
    Json,
    /// One JSON object per line
    #[default]
    Jsonl,
}

/// Output artifact settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path; nothing is written when absent
    pub path: Option<PathBuf>,
    /// Output format
    pub format: OutputFormat,
    /// Optional JSON rename map file
    pub map_file: Option<PathBuf>,
    /// Skip writing output
    pub dry_run: bool,
    /// Echo records to stdout
    pub preview: bool,
}

/// Load a rename map from a JSON file of string-to-string pairs.
pub fn load_rename_map(path: &Path) -> ConfigResult<RenameMap> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::RenameMap {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.directory.index, DEFAULT_INDEX_URL);
        assert_eq!(config.scanning.concurrency, 4);
        assert_eq!(config.scanning.delay_ms, 500);
        assert_eq!(config.scanning.retries, 3);
        assert_eq!(config.scanning.timeout_ms, 15_000);
        assert!(config.browser.headless);
        assert_eq!(config.output.format, OutputFormat::Jsonl);
        assert!(config.output.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[scanning]
concurrency = 8

[output]
format = "json"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.scanning.concurrency, 8);
        assert_eq!(config.output.format, OutputFormat::Json);
        // These should be defaults
        assert_eq!(config.scanning.retries, 3);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("iasme.toml");
        fs::write(
            &config_path,
            "[directory]\nindex = \"https://directory.example/list\"\n",
        )
        .expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.directory.index, "https://directory.example/list");
    }

    #[test]
    fn test_config_missing_file() {
        let result = AppConfig::load_from(Path::new("/nonexistent/iasme.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("IASME_HEADLESS", "false"),
            ("IASME_CONCURRENCY", "2"),
            ("IASME_RETRIES", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(|v| (*v).to_string()));

        assert!(!config.browser.headless);
        assert_eq!(config.scanning.concurrency, 2);
        // Unparseable values are ignored
        assert_eq!(config.scanning.retries, 3);
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = AppConfig::default();
        config.scanning.concurrency = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_index() {
        let mut config = AppConfig::default();
        config.directory.index = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rename_map() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("map.json");
        fs::write(&path, r#"{"company": "name", "emails": "email_addresses"}"#)
            .expect("write map");

        let map = load_rename_map(&path).expect("load map");
        assert_eq!(map.get("company").map(String::as_str), Some("name"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_load_rename_map_malformed() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("map.json");
        fs::write(&path, r#"{"company": 42}"#).expect("write map");

        assert!(matches!(
            load_rename_map(&path),
            Err(ConfigError::RenameMap { .. })
        ));
    }
}
