//! HTTP list fetcher
//!
//! Issues a GET against a JSON endpoint with the effective parameters as
//! query string, then pulls the page items and the total count out of the
//! response body by path.
//!
//! A body without the list path yields an empty page rather than an error;
//! a non-success status is reported as `Error::HttpStatus`.

use super::fetcher::ListFetcher;
use crate::error::{Error, Result};
use crate::params::ListParams;
use crate::types::{JsonValue, ListPage};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for an HTTP list fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Endpoint returning one page per request
    pub url: String,
    /// Path of the item array in the response body
    pub list_path: String,
    /// Path of the total count in the response body
    pub total_path: String,
    /// Request timeout
    pub timeout: Duration,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            list_path: "$.list".to_string(),
            total_path: "$.total".to_string(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("list-request/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpFetcherConfig {
    /// Create a config builder for the given endpoint
    pub fn builder(url: impl Into<String>) -> HttpFetcherConfigBuilder {
        HttpFetcherConfigBuilder {
            config: Self {
                url: url.into(),
                ..Default::default()
            },
        }
    }
}

/// Builder for HTTP fetcher config
#[derive(Debug, Default)]
pub struct HttpFetcherConfigBuilder {
    config: HttpFetcherConfig,
}

impl HttpFetcherConfigBuilder {
    /// Set the path of the item array
    pub fn list_path(mut self, path: impl Into<String>) -> Self {
        self.config.list_path = path.into();
        self
    }

    /// Set the path of the total count
    pub fn total_path(mut self, path: impl Into<String>) -> Self {
        self.config.total_path = path.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpFetcherConfig {
        self.config
    }
}

/// Fetcher that reads pages from a JSON HTTP endpoint
///
/// Extra `run` arguments are not forwarded; every request is driven by the
/// effective parameters alone.
#[derive(Debug, Clone)]
pub struct HttpListFetcher {
    client: Client,
    config: HttpFetcherConfig,
}

impl HttpListFetcher {
    /// Create a fetcher, validating the endpoint URL
    pub fn new(config: HttpFetcherConfig) -> Result<Self> {
        Url::parse(&config.url)?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    async fn get_page(&self, params: &ListParams) -> Result<ListPage<JsonValue>> {
        let mut req = self.client.get(&self.config.url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let query = params.to_query_pairs();
        if !query.is_empty() {
            req = req.query(&query);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "List request to {} failed with {}",
                self.config.url,
                status.as_u16()
            );
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body: JsonValue = response.json().await?;
        let page = decode_page(&body, &self.config.list_path, &self.config.total_path)?;
        debug!(
            "Fetched {} items (total {}) from {}",
            page.list.len(),
            page.total,
            self.config.url
        );
        Ok(page)
    }
}

#[async_trait]
impl ListFetcher for HttpListFetcher {
    type Item = JsonValue;
    type Error = Error;

    async fn fetch(&self, params: ListParams, extra: Vec<JsonValue>) -> Result<ListPage<JsonValue>> {
        if !extra.is_empty() {
            debug!("Ignoring {} extra arguments for HTTP fetch", extra.len());
        }
        self.get_page(&params).await
    }
}

/// Decode a page from a response body
///
/// Simple dotted paths are resolved directly; paths with indices, wildcards
/// or deep scans go through JSONPath. A missing list decodes as empty and a
/// missing or non-numeric total as 0.
pub(crate) fn decode_page(
    body: &JsonValue,
    list_path: &str,
    total_path: &str,
) -> Result<ListPage<JsonValue>> {
    let list = if is_complex_path(list_path) {
        let mut matches = extract_with_jsonpath(body, list_path)?;
        // One match naming the list itself, as opposed to a path selecting its items
        if matches.len() == 1 && matches[0].is_array() && !selects_items(list_path) {
            match matches.pop() {
                Some(JsonValue::Array(items)) => items,
                _ => Vec::new(),
            }
        } else {
            matches
        }
    } else {
        match extract_path(body, list_path) {
            Some(JsonValue::Array(items)) => items,
            Some(JsonValue::Null) | None => Vec::new(),
            Some(other) => vec![other],
        }
    };

    let total = if is_complex_path(total_path) {
        extract_with_jsonpath(body, total_path)?.into_iter().next()
    } else {
        extract_path(body, total_path)
    };
    let total = total
        .and_then(|v| match v {
            JsonValue::Number(n) => n.as_u64(),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        })
        .unwrap_or(0);

    Ok(ListPage::new(list, total))
}

/// Extract a value using simple dot-notation path (`$.data.items`)
pub(crate) fn extract_path(value: &JsonValue, path: &str) -> Option<JsonValue> {
    if path == "$" {
        return Some(value.clone());
    }
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        match current {
            JsonValue::Object(map) => current = map.get(part)?,
            JsonValue::Array(items) => current = items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        }
    }

    Some(current.clone())
}

fn is_complex_path(path: &str) -> bool {
    path.contains('[') || path.contains('*') || path.contains("..")
}

/// Whether the last path segment is a wildcard or filter over elements
fn selects_items(path: &str) -> bool {
    path.ends_with(".*") || path.ends_with("[*]") || path.ends_with(")]")
}

/// All values matched by a JSONPath expression
fn extract_with_jsonpath(value: &JsonValue, path: &str) -> Result<Vec<JsonValue>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::json_path(format!("Invalid JSONPath: {e}")))?;

    match jp.find(value) {
        JsonValue::Array(arr) => Ok(arr),
        JsonValue::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
