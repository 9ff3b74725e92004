//! Client configuration
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! command-line overrides. Every file field is optional.

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::recommendation::DEFAULT_EMBED_BASE_URL;

/// Recommendation endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/recommend";

/// Runtime configuration for the questionnaire client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Full URL of the recommendation endpoint
    pub endpoint: String,
    /// Request timeout; `None` keeps the HTTP client default
    pub timeout_secs: Option<u64>,
    /// Host used to build the embedded player URL
    pub embed_base_url: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            embed_base_url: DEFAULT_EMBED_BASE_URL.to_string(),
        }
    }
}

impl QuizConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn with_overrides(mut self, endpoint: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        check_http_url("Endpoint", &self.endpoint)?;
        check_http_url("Embed base URL", &self.embed_base_url)?;

        if self.timeout_secs == Some(0) {
            anyhow::bail!("Timeout must be at least one second");
        }

        Ok(())
    }
}

fn check_http_url(what: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("{} must be specified", what);
    }
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", what, value))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{} must start with http:// or https://", what);
    }
    Ok(())
}
