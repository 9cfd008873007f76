//! Configuration for switchable HTTP list sources
//!
//! A sources file describes the HTTP endpoints a `SwitchRequest` can switch
//! between:
//!
//! ```yaml
//! active: users
//! defaults:
//!   page: 1
//!   limit: 20
//! http:
//!   timeout_secs: 10
//! sources:
//!   - key: users
//!     url: https://api.example.com/users
//!     list_path: $.data
//!     total_path: $.meta.total
//!     default_params:
//!       status: active
//! ```

use crate::error::{Error, Result};
use crate::fetch::{BoxedFetcher, HttpFetcherConfig, HttpListFetcher};
use crate::pagination::Pagination;
use crate::params::ListParams;
use crate::switch::{ActiveKey, FetchDescriptor, SwitchRequest};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

// ============================================================================
// Top-Level Sources Config
// ============================================================================

/// Complete sources configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Initially selected source key (defaults to the first source)
    #[serde(default)]
    pub active: Option<String>,

    /// Initial pagination cursor of every source
    #[serde(default)]
    pub defaults: Pagination,

    /// HTTP settings shared by all sources
    #[serde(default)]
    pub http: HttpSettings,

    /// Source definitions, in switch order
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// HTTP settings shared by all sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            headers: HashMap::new(),
            user_agent: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

// ============================================================================
// Source Config
// ============================================================================

/// One switchable HTTP source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Key the source is selected by
    pub key: String,

    /// Endpoint URL
    pub url: String,

    /// Path of the item array in the response body
    #[serde(default = "default_list_path")]
    pub list_path: String,

    /// Path of the total count in the response body
    #[serde(default = "default_total_path")]
    pub total_path: String,

    /// Parameters merged beneath every run
    #[serde(default)]
    pub default_params: JsonObject,

    /// Page size override for this source
    #[serde(default)]
    pub limit: Option<u32>,

    /// Extra headers for this source
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_list_path() -> String {
    "$.list".to_string()
}

fn default_total_path() -> String {
    "$.total".to_string()
}

impl SourcesConfig {
    /// Parse and validate a sources file from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SourcesConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a sources file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.display().to_string(),
            },
            _ => Error::Io(e),
        })?;
        Self::from_yaml(&content)
    }

    /// Validate the configuration
    ///
    /// Duplicate keys are allowed (the first one wins when switching) but
    /// logged.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::config("At least one source is required"));
        }

        self.defaults.validate()?;

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.key.is_empty() {
                return Err(Error::missing_field("sources[].key"));
            }
            if source.url.is_empty() {
                return Err(Error::config(format!(
                    "Source '{}' url cannot be empty",
                    source.key
                )));
            }
            if source.limit == Some(0) {
                return Err(Error::config(format!(
                    "Source '{}' limit must be > 0",
                    source.key
                )));
            }
            if !seen.insert(source.key.as_str()) {
                warn!("Duplicate source key '{}', first definition wins", source.key);
            }
        }

        if let Some(active) = &self.active {
            if !seen.contains(active.as_str()) {
                return Err(Error::config(format!(
                    "Active source '{active}' is not defined"
                )));
            }
        }

        Ok(())
    }

    /// Key selected at startup
    pub fn initial_key(&self) -> Result<String> {
        self.active
            .clone()
            .or_else(|| self.sources.first().map(|s| s.key.clone()))
            .ok_or_else(|| Error::config("At least one source is required"))
    }

    /// Find a source by key (first match)
    pub fn source(&self, key: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.key == key)
    }

    /// HTTP fetcher configuration for one source
    pub fn fetcher_config(&self, source: &SourceConfig) -> HttpFetcherConfig {
        let mut builder = HttpFetcherConfig::builder(&source.url)
            .list_path(&source.list_path)
            .total_path(&source.total_path)
            .timeout(Duration::from_secs(self.http.timeout_secs));

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in self.http.headers.iter().chain(&source.headers) {
            builder = builder.header(key, value);
        }
        builder.build()
    }

    /// Build a switch request over every configured source
    ///
    /// The switch observes a fresh active-key cell holding `initial_key()`.
    pub fn build_switch(&self) -> Result<SwitchRequest<String, JsonValue>> {
        let active = ActiveKey::new(self.initial_key()?);
        let mut descriptors = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let fetcher: BoxedFetcher<JsonValue, Error> =
                Arc::new(HttpListFetcher::new(self.fetcher_config(source))?);
            let default_params = if source.default_params.is_empty() {
                None
            } else {
                Some(ListParams::from(source.default_params.clone()))
            };

            let mut pagination = self.defaults;
            if let Some(limit) = source.limit {
                pagination.limit = limit;
            }

            descriptors.push(
                FetchDescriptor::from_boxed(source.key.clone(), fetcher, default_params)
                    .pagination(pagination),
            );
        }

        Ok(SwitchRequest::new(active, descriptors))
    }
}
