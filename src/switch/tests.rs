//! Tests for switch request module

use super::*;
use crate::error::Error;
use crate::fetch::fetcher_fn;
use crate::pagination::Pagination;
use crate::params::ListParams;
use crate::types::{JsonValue, ListPage};
use serde_json::json;
use std::sync::{Arc, Mutex};
use test_case::test_case;

type Calls = Arc<Mutex<Vec<ListParams>>>;

/// Descriptor whose fetcher returns `[tag]` with the given total
fn tagged(key: &'static str, tag: u32, total: u64, calls: &Calls) -> FetchDescriptor<&'static str, u32> {
    let calls = calls.clone();
    FetchDescriptor::new(
        key,
        fetcher_fn(move |params: ListParams, _extra: Vec<JsonValue>| {
            calls.lock().unwrap().push(params);
            async move { Ok::<_, Error>(ListPage::new(vec![tag], total)) }
        }),
    )
}

fn two_sources(active: &ActiveKey<&'static str>) -> (SwitchRequest<&'static str, u32>, Calls) {
    let calls = Calls::default();
    let switch = SwitchRequest::new(
        active.clone(),
        vec![tagged("a", 1, 5, &calls), tagged("b", 2, 9, &calls)],
    );
    (switch, calls)
}

// ============================================================================
// ActiveKey Tests
// ============================================================================

#[test]
fn test_active_key_set_reports_change() {
    let active = ActiveKey::new("a");
    assert!(!active.set("a"));
    assert!(active.set("b"));
    assert_eq!(active.get(), "b");
}

#[test]
fn test_active_key_listener_runs_on_change_only() {
    let active = ActiveKey::new("a");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();
    let id = active.on_change(move |key: &&str| recorded.lock().unwrap().push(*key));

    active.set("a");
    active.set("b");
    active.clone().set("c");
    assert!(active.remove_listener(id));
    active.set("d");

    assert_eq!(*seen.lock().unwrap(), vec!["b", "c"]);
    assert!(!active.remove_listener(id));
}

#[test]
fn test_active_key_clones_share_cell() {
    let active = ActiveKey::new(1);
    let other = active.clone();
    other.set(2);
    assert_eq!(active.get(), 2);
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_builds_one_request_per_descriptor() {
    let active = ActiveKey::new("a");
    let (switch, _) = two_sources(&active);

    assert_eq!(switch.len(), 2);
    assert_eq!(switch.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(!switch.get(&"a").unwrap().ptr_eq(switch.get(&"b").unwrap()));
}

#[test]
fn test_descriptor_initial_pagination() {
    let calls = Calls::default();
    let active = ActiveKey::new("a");
    let switch = SwitchRequest::new(
        active,
        vec![tagged("a", 1, 1, &calls).pagination(Pagination::with_page(1, 50))],
    );

    assert_eq!(switch.pagination().unwrap().limit(), 50);
}

#[tokio::test]
async fn test_duplicate_keys_first_wins() {
    let calls = Calls::default();
    let active = ActiveKey::new("a");
    let switch = SwitchRequest::new(
        active,
        vec![tagged("a", 1, 1, &calls), tagged("a", 2, 2, &calls)],
    );

    assert!(switch
        .current()
        .unwrap()
        .ptr_eq(switch.get(&"a").unwrap()));

    switch.run(None, vec![]).await.unwrap();
    assert_eq!(switch.data().unwrap(), vec![1]);
}

// ============================================================================
// Delegation Tests
// ============================================================================

#[tokio::test]
async fn test_facade_follows_active_key() {
    let active = ActiveKey::new("a");
    let (switch, _) = two_sources(&active);

    let a = switch.get(&"a").unwrap().clone();
    let b = switch.get(&"b").unwrap().clone();

    assert!(switch.runner().unwrap().ptr_eq(&a));
    assert!(switch.pagination().unwrap().ptr_eq(&a.pagination()));

    switch.run(None, vec![]).await.unwrap();
    assert_eq!(switch.data().unwrap(), vec![1]);
    assert_eq!(switch.pagination().unwrap().total(), 5);
    assert!(!switch.loading().unwrap());

    active.set("b");
    assert!(switch.runner().unwrap().ptr_eq(&b));
    assert!(switch.pagination().unwrap().ptr_eq(&b.pagination()));
    assert!(switch.data().unwrap().is_empty());

    switch.run(None, vec![]).await.unwrap();
    assert_eq!(switch.data().unwrap(), vec![2]);
    assert_eq!(switch.pagination().unwrap().total(), 9);
}

#[test_case("a", 1, 5 ; "first source")]
#[test_case("b", 2, 9 ; "second source")]
#[tokio::test]
async fn test_run_dispatches_to_selected(key: &'static str, tag: u32, total: u64) {
    let active = ActiveKey::new(key);
    let (switch, calls) = two_sources(&active);

    switch.run(None, vec![]).await.unwrap();

    assert_eq!(calls.lock().unwrap().len(), 1);
    let snapshot = switch.snapshot().unwrap();
    assert_eq!(snapshot.data, vec![tag]);
    assert_eq!(snapshot.pagination.total, total);
}

#[tokio::test]
async fn test_independent_cursors() {
    let active = ActiveKey::new("a");
    let (switch, _) = two_sources(&active);

    switch.run(None, vec![]).await.unwrap();

    assert_eq!(switch.get(&"a").unwrap().pagination().total(), 5);
    assert_eq!(switch.get(&"b").unwrap().pagination().total(), 0);
    assert!(switch.get(&"b").unwrap().data().is_empty());
}

#[tokio::test]
async fn test_run_uses_descriptor_defaults() {
    let calls = Calls::default();
    let recorded = calls.clone();
    let descriptor = FetchDescriptor::with_defaults(
        "open",
        fetcher_fn(move |params: ListParams, _extra: Vec<JsonValue>| {
            recorded.lock().unwrap().push(params);
            async move { Ok::<_, Error>(ListPage::<u32>::empty()) }
        }),
        ListParams::new().with("status", "open"),
    );
    let switch = SwitchRequest::new(ActiveKey::new("open"), vec![descriptor]);

    switch
        .run(Some(ListParams::new().with("q", "x")), vec![])
        .await
        .unwrap();

    let params = calls.lock().unwrap()[0].clone();
    assert_eq!(params.get("status"), Some(&json!("open")));
    assert_eq!(params.get("q"), Some(&json!("x")));
    assert_eq!(params.page(), Some(1));
}

// ============================================================================
// Page Reset Tests
// ============================================================================

#[test]
fn test_switch_resets_new_page_only() {
    let active = ActiveKey::new("a");
    let (switch, _) = two_sources(&active);
    switch.get(&"a").unwrap().pagination().set_page(3);
    switch.get(&"b").unwrap().pagination().set_page(4);

    active.set("b");

    assert_eq!(switch.pagination().unwrap().page(), 1);
    assert_eq!(switch.get(&"a").unwrap().pagination().page(), 3);
}

#[test]
fn test_same_key_does_not_reset() {
    let active = ActiveKey::new("a");
    let (switch, _) = two_sources(&active);
    switch.pagination().unwrap().set_page(3);

    active.set("a");

    assert_eq!(switch.pagination().unwrap().page(), 3);
}

#[test]
fn test_reset_visible_through_instance() {
    let active = ActiveKey::new("a");
    let (switch, _) = two_sources(&active);
    let b = switch.get(&"b").unwrap().pagination();
    b.set_page(4);

    active.set("b");

    assert_eq!(switch.get(&"b").unwrap().pagination().page(), 1);
    assert_eq!(b.page(), 1);
}

#[test]
fn test_page_write_after_switch_is_kept() {
    let active = ActiveKey::new("a");
    let (switch, _) = two_sources(&active);

    assert!(switch.set_active("b"));
    switch.get(&"b").unwrap().pagination().set_page(5);

    assert_eq!(switch.pagination().unwrap().page(), 5);
    assert_eq!(switch.get(&"b").unwrap().pagination().page(), 5);
}

#[test]
fn test_switch_back_resets_again() {
    let active = ActiveKey::new("a");
    let (switch, _) = two_sources(&active);
    switch.pagination().unwrap().set_page(3);

    active.set("b");
    active.set("a");

    assert_eq!(switch.pagination().unwrap().page(), 1);
}

#[tokio::test]
async fn test_switch_does_not_fetch() {
    let active = ActiveKey::new("a");
    let (_switch, calls) = two_sources(&active);

    active.set("b");

    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_dropped_switch_stops_resetting() {
    let active = ActiveKey::new("a");
    let (switch, _) = two_sources(&active);
    let b = switch.get(&"b").unwrap().pagination();
    drop(switch);

    b.set_page(7);
    active.set("b");

    assert_eq!(b.page(), 7);
}

// ============================================================================
// Selection Miss Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_key_fails_fast() {
    let active = ActiveKey::new("a");
    let (switch, calls) = two_sources(&active);

    active.set("missing");

    assert!(matches!(switch.loading(), Err(Error::UnknownKey { .. })));
    assert!(matches!(switch.data(), Err(Error::UnknownKey { .. })));
    assert!(matches!(switch.pagination(), Err(Error::UnknownKey { .. })));

    let err = switch.run(None, vec![]).await.unwrap_err();
    assert_eq!(err.to_string(), "No list request registered for key '\"missing\"'");
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_key_converts_into_caller_error() {
    #[derive(Debug)]
    enum AppError {
        Selection(String),
    }

    impl From<Error> for AppError {
        fn from(e: Error) -> Self {
            AppError::Selection(e.to_string())
        }
    }

    let switch: SwitchRequest<u8, u32, AppError> = SwitchRequest::new(
        ActiveKey::new(7),
        vec![FetchDescriptor::new(
            1,
            fetcher_fn(|_params: ListParams, _extra: Vec<JsonValue>| async move {
                Ok::<_, AppError>(ListPage::empty())
            }),
        )],
    );

    let AppError::Selection(message) = switch.run(None, vec![]).await.unwrap_err();
    assert!(message.contains("'7'"));
}
