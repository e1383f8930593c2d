//! # Configuration
//!
//! Stored as `config.json` in the data directory. Missing keys fall back to
//! compiled defaults; the `EPIGRAM_API_BASE_URL` environment variable wins
//! over the stored base URL.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `base_url` | `http://localhost:3000` | Root of the content API |
//! | `fetch_limit` | `1000` | Items requested per search |
//! | `page_size` | `5` | Results revealed per "load more" |
//! | `server_keyword` | `true` | Send the search term as `keyword` |
//! | `timeout_secs` | `10` | HTTP request timeout |

use crate::error::{EpigramError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const BASE_URL_ENV: &str = "EPIGRAM_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_FETCH_LIMIT: usize = 1000;
pub const DEFAULT_PAGE_SIZE: usize = 5;

pub const KEYS: &[&str] = &[
    "base_url",
    "fetch_limit",
    "page_size",
    "server_keyword",
    "timeout_secs",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpigramConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pass the term to the server as a pre-filter. Results are always
    /// re-checked locally, so turning this off only costs bandwidth.
    #[serde(default = "default_true")]
    pub server_keyword: bool,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_fetch_limit() -> usize {
    DEFAULT_FETCH_LIMIT
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    10
}

impl Default for EpigramConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            server_keyword: true,
            timeout_secs: default_timeout(),
        }
    }
}

impl EpigramConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: EpigramConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Apply environment overrides on top of the stored values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "base_url" => Some(self.base_url.clone()),
            "fetch_limit" => Some(self.fetch_limit.to_string()),
            "page_size" => Some(self.page_size.to_string()),
            "server_keyword" => Some(self.server_keyword.to_string()),
            "timeout_secs" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |what: &str| EpigramError::Config(format!("{} must be {}", key, what));
        match key {
            "base_url" => {
                let trimmed = value.trim().trim_end_matches('/');
                if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                    return Err(invalid("an http(s) URL"));
                }
                self.base_url = trimmed.to_string();
            }
            "fetch_limit" => {
                self.fetch_limit = parse_positive(value).ok_or_else(|| invalid("a positive number"))?;
            }
            "page_size" => {
                self.page_size = parse_positive(value).ok_or_else(|| invalid("a positive number"))?;
            }
            "server_keyword" => {
                self.server_keyword = value.parse().map_err(|_| invalid("true or false"))?;
            }
            "timeout_secs" => {
                self.timeout_secs = parse_positive(value)
                    .map(|n| n as u64)
                    .ok_or_else(|| invalid("a positive number"))?;
            }
            _ => return Err(EpigramError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}
