//! Tests for fetch module

use super::http::{decode_page, extract_path};
use super::*;
use crate::error::Error;
use crate::params::ListParams;
use crate::types::{JsonValue, ListPage};
use serde_json::json;
use std::time::Duration;

// ============================================================================
// Closure Fetcher Tests
// ============================================================================

#[tokio::test]
async fn test_fetcher_fn_passes_params_and_extra() {
    let fetcher = fetcher_fn(|params: ListParams, extra: Vec<JsonValue>| async move {
        let page = params.page().unwrap_or_default();
        Ok::<_, Error>(ListPage::new(vec![page], extra.len() as u64))
    });

    let page = fetcher
        .fetch(ListParams::new().with_page(3), vec![json!("a"), json!(1)])
        .await
        .unwrap();

    assert_eq!(page.list, vec![3]);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn test_fetcher_fn_error_passthrough() {
    let fetcher = fetcher_fn(|_params: ListParams, _extra: Vec<JsonValue>| async move {
        Err::<ListPage<u32>, _>("offline")
    });

    let err = fetcher.fetch(ListParams::new(), vec![]).await.unwrap_err();
    assert_eq!(err, "offline");
}

#[tokio::test]
async fn test_boxed_fetcher() {
    let fetcher: BoxedFetcher<u32, Error> = std::sync::Arc::new(fetcher_fn(
        |_params: ListParams, _extra: Vec<JsonValue>| async move {
            Ok::<_, Error>(ListPage::new(vec![1u32, 2], 2))
        },
    ));

    let page = fetcher.fetch(ListParams::new(), vec![]).await.unwrap();
    assert_eq!(page.list.len(), 2);
}

// ============================================================================
// HttpFetcherConfig Tests
// ============================================================================

#[test]
fn test_http_fetcher_config_default() {
    let config = HttpFetcherConfig::default();
    assert_eq!(config.list_path, "$.list");
    assert_eq!(config.total_path, "$.total");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.user_agent.starts_with("list-request/"));
}

#[test]
fn test_http_fetcher_config_builder() {
    let config = HttpFetcherConfig::builder("https://api.example.com/users")
        .list_path("$.data")
        .total_path("$.meta.total")
        .timeout(Duration::from_secs(5))
        .header("X-Token", "abc")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.url, "https://api.example.com/users");
    assert_eq!(config.list_path, "$.data");
    assert_eq!(config.total_path, "$.meta.total");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.default_headers.get("X-Token"), Some(&"abc".to_string()));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_http_fetcher_rejects_invalid_url() {
    let err = HttpListFetcher::new(HttpFetcherConfig::builder("not a url").build()).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

// ============================================================================
// Page Decoding Tests
// ============================================================================

#[test]
fn test_decode_page_default_paths() {
    let body = json!({"list": [{"id": 1}, {"id": 2}], "total": 12});
    let page = decode_page(&body, "$.list", "$.total").unwrap();
    assert_eq!(page.list.len(), 2);
    assert_eq!(page.total, 12);
}

#[test]
fn test_decode_page_nested_paths() {
    let body = json!({"data": {"items": [1, 2, 3]}, "meta": {"total": "40"}});
    let page = decode_page(&body, "$.data.items", "$.meta.total").unwrap();
    assert_eq!(page.list, vec![json!(1), json!(2), json!(3)]);
    assert_eq!(page.total, 40);
}

#[test]
fn test_decode_page_missing_list_is_empty() {
    let body = json!({"total": 5});
    let page = decode_page(&body, "$.list", "$.total").unwrap();
    assert!(page.list.is_empty());
    assert_eq!(page.total, 5);
}

#[test]
fn test_decode_page_missing_total_is_zero() {
    let body = json!({"list": [1]});
    let page = decode_page(&body, "$.list", "$.total").unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn test_decode_page_indexed_total_path() {
    let body = json!({"list": [1, 2], "meta": [{"total": 42}]});
    let page = decode_page(&body, "$.list", "$.meta[0].total").unwrap();
    assert_eq!(page.total, 42);
    assert_eq!(page.list.len(), 2);
}

#[test]
fn test_decode_page_deep_scan_list_is_flattened() {
    let body = json!({"data": {"list": [1, 2]}, "total": 2});
    let page = decode_page(&body, "$..list", "$.total").unwrap();
    assert_eq!(page.list, vec![json!(1), json!(2)]);
}

#[test]
fn test_decode_page_wildcard_keeps_items() {
    let body = json!({"rows": [[1, 2]], "total": 1});
    let page = decode_page(&body, "$.rows[*]", "$.total").unwrap();
    assert_eq!(page.list, vec![json!([1, 2])]);
}

#[test]
fn test_decode_page_deep_scan_total() {
    let body = json!({"list": [], "page_info": {"count": "17"}});
    let page = decode_page(&body, "$.list", "$..count").unwrap();
    assert_eq!(page.total, 17);
}

#[test]
fn test_extract_path() {
    let body = json!({"a": {"b": [10, 20]}});
    assert_eq!(extract_path(&body, "$.a.b.1"), Some(json!(20)));
    assert_eq!(extract_path(&body, "a.b"), Some(json!([10, 20])));
    assert_eq!(extract_path(&body, "$"), Some(body.clone()));
    assert_eq!(extract_path(&body, "$.missing"), None);
}
