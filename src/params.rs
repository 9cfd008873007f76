//! Request parameter records
//!
//! `ListParams` is a flat JSON object handed to a fetcher. Parameter layers
//! are combined shallowly: for every key the later layer wins, exactly like
//! spreading one object over another.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Parameter key carrying the page number
pub const PAGE_KEY: &str = "page";

/// Parameter key carrying the page size
pub const LIMIT_KEY: &str = "limit";

/// Flat parameter record passed to a fetcher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListParams(JsonObject);

impl ListParams {
    /// Create an empty parameter record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from any value that serializes to a JSON object
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            JsonValue::Object(map) => Ok(Self(map)),
            JsonValue::Null => Ok(Self::new()),
            other => Err(Error::params(format!(
                "expected an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Add a parameter (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `page` (builder style)
    pub fn with_page(self, page: u32) -> Self {
        self.with(PAGE_KEY, page)
    }

    /// Set `limit` (builder style)
    pub fn with_limit(self, limit: u32) -> Self {
        self.with(LIMIT_KEY, limit)
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove a parameter, returning its value
    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.0.remove(key)
    }

    /// Raw value of a parameter
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Page number, if present and numeric
    pub fn page(&self) -> Option<u32> {
        self.get_u32(PAGE_KEY)
    }

    /// Page size, if present and numeric
    pub fn limit(&self) -> Option<u32> {
        self.get_u32(LIMIT_KEY)
    }

    fn get_u32(&self, key: &str) -> Option<u32> {
        self.0
            .get(key)
            .and_then(JsonValue::as_u64)
            .and_then(|v| u32::try_from(v).ok())
    }

    /// Overlay `other` on top of `self`; keys in `other` win
    pub fn merge(&mut self, other: &ListParams) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Combine layers in increasing precedence
    pub fn layered<'a>(layers: impl IntoIterator<Item = &'a ListParams>) -> Self {
        let mut out = Self::new();
        for layer in layers {
            out.merge(layer);
        }
        out
    }

    /// Deserialize the record into a typed parameter struct
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(JsonValue::Object(self.0.clone())).map_err(|e| {
            Error::params(format!("failed to decode parameters: {e}"))
        })
    }

    /// Render parameters as query string pairs
    ///
    /// Nulls are skipped, strings are used verbatim, everything else is
    /// rendered as JSON text.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    JsonValue::Null => return None,
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.clone(), rendered))
            })
            .collect()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Underlying JSON object
    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }

    /// Take the underlying JSON object
    pub fn into_inner(self) -> JsonObject {
        self.0
    }
}

impl From<JsonObject> for ListParams {
    fn from(map: JsonObject) -> Self {
        Self(map)
    }
}

impl From<ListParams> for JsonValue {
    fn from(params: ListParams) -> Self {
        JsonValue::Object(params.0)
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for ListParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
