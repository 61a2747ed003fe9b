//! Integration tests for the generic resource framework.
//!
//! These tests drive managers and objects through a scripted
//! `RecordingTransport`, so every request the framework sends can be
//! inspected and no network is involved.

use std::sync::Arc;

use gitlab_api::clients::HttpMethod;
use gitlab_api::rest::{
    build_path, CreateMixin, DeleteMixin, EncodedId, GetMixin, ListMixin, ListParams, Manager,
    ObjectState, ParentBinding, RequiredOptional, ResourceDef, ResourceError, RestManager,
    RestObject, RestResource, SaveMixin, UpdateMixin, ValidationError,
};
use gitlab_api::testing::RecordingTransport;
use serde_json::{json, Map, Value};

const TEST: ResourceDef = ResourceDef {
    create_attrs: RequiredOptional::new(&["foo"], &["bar"]),
    update_attrs: RequiredOptional::new(&[], &["foo", "bar"]),
    ..ResourceDef::new("Test", "/tests")
};

const CHILD: ResourceDef = ResourceDef {
    from_parent_attrs: &[ParentBinding::new("test_id", "id")],
    ..ResourceDef::new("Child", "/tests/{test_id}/children")
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TestObject(RestObject);

impl RestResource for TestObject {
    fn from_object(object: RestObject) -> Self {
        Self(object)
    }

    fn object(&self) -> &RestObject {
        &self.0
    }

    fn object_mut(&mut self) -> &mut RestObject {
        &mut self.0
    }
}

impl SaveMixin for TestObject {}

struct TestManager(RestManager);

impl Manager for TestManager {
    type Object = TestObject;

    fn rest_manager(&self) -> &RestManager {
        &self.0
    }
}

impl GetMixin for TestManager {}
impl ListMixin for TestManager {}
impl CreateMixin for TestManager {}
impl UpdateMixin for TestManager {}
impl DeleteMixin for TestManager {}

fn setup() -> (Arc<RecordingTransport>, TestManager) {
    let transport = Arc::new(RecordingTransport::new());
    let manager = TestManager(RestManager::top_level(transport.clone(), &TEST));
    (transport, manager)
}

fn attrs(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn object(manager: &TestManager, value: Value) -> TestObject {
    TestObject(RestObject::new(manager.rest_manager(), attrs(value)))
}

// ============================================================================
// Attribute store properties
// ============================================================================

#[test]
fn test_write_wins_over_server_value() {
    let (_, manager) = setup();
    let mut test = object(&manager, json!({"id": 1, "foo": "server"}));

    test.0.write("foo", "local");

    assert_eq!(test.0.read("foo").unwrap(), &json!("local"));
    assert_eq!(test.0.server_attrs()["foo"], json!("server"));
}

#[test]
fn test_in_place_list_mutation_is_tracked() {
    let (_, manager) = setup();
    let mut test = object(&manager, json!({"id": 1, "labels": ["a"]}));

    test.0
        .read_mut("labels")
        .unwrap()
        .as_array_mut()
        .unwrap()
        .push(json!("b"));

    assert_eq!(test.0.read("labels").unwrap(), &json!(["a", "b"]));
    assert_eq!(test.0.updated_attrs()["labels"], json!(["a", "b"]));
    assert_eq!(test.0.state(), ObjectState::Dirty);
}

#[test]
fn test_accept_server_state_replaces_snapshot() {
    let (_, manager) = setup();
    let mut test = object(&manager, json!({"id": 1, "foo": "a", "stale": true}));
    test.0.write("foo", "b");

    test.0.accept_server_state(attrs(json!({"id": 1, "foo": "c"})));

    assert_eq!(test.0.snapshot(false), attrs(json!({"id": 1, "foo": "c"})));
    assert!(test.0.updated_attrs().is_empty());
}

#[test]
fn test_missing_attribute_mentions_lazy_object() {
    let (_, manager) = setup();
    let mut lazy = manager.lazy(5);

    let err = lazy.0.read("foo").unwrap_err();

    assert!(matches!(err, ResourceError::AttributeNotFound { .. }));
    assert!(err.to_string().contains("lazy"));
}

#[test]
fn test_encoding_is_idempotent() {
    for raw in ["plain", "with space", "group/sub/project", "user@example.com", "a%2Fb"] {
        let once = EncodedId::from(raw);
        let twice = EncodedId::from(&once);
        assert_eq!(once, twice, "{raw}");
    }
    assert_eq!(
        build_path("/tests/{id}", &[("id", EncodedId::from("a.b/c"))]),
        "/tests/a.b%2Fc"
    );
}

#[test]
fn test_missing_parent_attribute_fails_without_requests() {
    let (transport, manager) = setup();
    let parent = object(&manager, json!({"foo": "no id"}));

    let result = RestManager::new(transport.clone(), &CHILD, Some(parent.object()));

    assert!(matches!(
        result,
        Err(ResourceError::MissingParentAttribute {
            placeholder: "test_id",
            parent_attr: "id",
            ..
        })
    ));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_parent_attributes_are_readable_on_children() {
    let (transport, manager) = setup();
    let parent = object(&manager, json!({"id": 3}));
    let children = RestManager::new(transport, &CHILD, Some(parent.object())).unwrap();
    let mut child = RestObject::new(&children, attrs(json!({"id": 9})));

    assert_eq!(children.path(), "/tests/3/children");
    assert_eq!(child.read("test_id").unwrap(), &json!(3));
    assert!(!child.snapshot(false).contains_key("test_id"));
    assert!(child.snapshot(true).contains_key("test_id"));
}

#[tokio::test]
async fn test_create_validation_sends_nothing() {
    let (transport, manager) = setup();

    let err = manager.create(json!({})).await.unwrap_err();

    match err {
        ResourceError::Validation(ValidationError::MissingRequired { missing }) => {
            assert_eq!(missing, vec!["foo".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.request_count(), 0);
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[tokio::test]
async fn test_get_wraps_server_object() {
    let (transport, manager) = setup();
    transport.respond(HttpMethod::Get, "/tests/42", 200, json!({"id": 42, "foo": "bar"}));

    let mut test = manager.get(42).await.unwrap();

    assert_eq!(test.0.read("foo").unwrap(), &json!("bar"));
    assert_eq!(test.0.read("id").unwrap(), &json!(42));
    assert_eq!(test.0.state(), ObjectState::Populated);
}

#[tokio::test]
async fn test_list_all_keeps_order() {
    let (transport, manager) = setup();
    transport.respond(
        HttpMethod::Get,
        "/tests",
        200,
        json!([{"id": 42, "foo": "a"}, {"id": 43, "foo": "b"}]),
    );

    let tests = manager.list_all(ListParams::new()).await.unwrap();

    let ids: Vec<_> = tests.iter().map(|t| t.0.id().cloned()).collect();
    assert_eq!(ids, vec![Some(json!(42)), Some(json!(43))]);
    assert!(tests.iter().all(|t| t.0.created_from_list()));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_save_sends_only_changes() {
    let (transport, manager) = setup();
    transport.respond(HttpMethod::Put, "/tests/42", 200, json!({"id": 42, "foo": "baz"}));
    let mut test = object(&manager, json!({"id": 42, "foo": "bar"}));

    test.0.write("foo", "baz");
    test.save().await.unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.http_method, HttpMethod::Put);
    assert_eq!(request.body, Some(json!({"foo": "baz"})));
    assert_eq!(test.0.snapshot(false)["foo"], json!("baz"));
    assert!(test.0.updated_attrs().is_empty());
    assert_eq!(test.0.state(), ObjectState::Populated);
}

#[tokio::test]
async fn test_save_without_changes_sends_nothing() {
    let (transport, manager) = setup();
    let mut test = object(&manager, json!({"id": 42, "foo": "bar"}));

    test.save().await.unwrap();

    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_delete_sends_one_request() {
    let (transport, manager) = setup();
    transport.respond(HttpMethod::Delete, "/tests/42", 204, Value::Null);

    manager.delete(42).await.unwrap();

    assert_eq!(transport.request_count(), 1);
    assert_eq!(transport.last_request().unwrap().path, "/tests/42");
}

#[tokio::test]
async fn test_iterator_follows_page_numbers() {
    let (transport, manager) = setup();
    transport.respond_with_headers(
        HttpMethod::Get,
        "/tests",
        200,
        &[("X-Page", "1"), ("X-Per-Page", "1"), ("X-Next-Page", "2"), ("X-Total", "2")],
        json!([{"id": 1}]),
    );
    transport.respond_with_headers(
        HttpMethod::Get,
        "/tests",
        200,
        &[("X-Page", "2"), ("X-Per-Page", "1"), ("X-Total", "2")],
        json!([{"id": 2}]),
    );

    let mut tests = manager.iter(ListParams::new().per_page(1)).await.unwrap();
    assert_eq!(tests.len(), Some(2));

    let first = tests.next().await.unwrap().unwrap();
    let second = tests.next().await.unwrap().unwrap();
    assert_eq!(first.0.id(), Some(&json!(1)));
    assert_eq!(second.0.id(), Some(&json!(2)));

    assert!(tests.next().await.unwrap().is_none());
    assert!(tests.next().await.unwrap().is_none());
    assert!(tests.is_exhausted());

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].query_value("page"), Some("2"));
    assert_eq!(requests[1].query_value("per_page"), Some("1"));
}

#[tokio::test]
async fn test_iterator_derives_next_page_from_total_pages() {
    let (transport, manager) = setup();
    transport.respond_with_headers(
        HttpMethod::Get,
        "/tests",
        200,
        &[("X-Page", "1"), ("X-Per-Page", "1"), ("X-Total-Pages", "2"), ("X-Total", "2")],
        json!([{"id": 1}]),
    );
    transport.respond_with_headers(
        HttpMethod::Get,
        "/tests",
        200,
        &[("X-Page", "2"), ("X-Total-Pages", "2")],
        json!([{"id": 2}]),
    );

    let tests = manager.iter(ListParams::new().per_page(1)).await.unwrap();
    assert_eq!(tests.len(), Some(2));
    assert_eq!(tests.next_page(), Some(2));

    let collected = tests.try_collect().await.unwrap();

    let ids: Vec<_> = collected.iter().map(|t| t.0.id().cloned()).collect();
    assert_eq!(ids, vec![Some(json!(1)), Some(json!(2))]);
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].query_value("page"), Some("2"));
}

#[tokio::test]
async fn test_single_page_list_reports_remaining_pages() {
    let (transport, manager) = setup();
    transport.respond_with_headers(
        HttpMethod::Get,
        "/tests",
        200,
        &[("X-Page", "1"), ("X-Total-Pages", "3")],
        json!([{"id": 1}]),
    );

    let page = manager.list(ListParams::new()).await.unwrap();

    assert!(page.has_next_page());
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_keyset_iterator_has_unknown_length() {
    let (transport, manager) = setup();
    let next = "https://gitlab.example.com/api/v4/tests?cursor=abc";
    let link = format!("<{next}>; rel=\"next\"");
    transport.respond_with_headers(
        HttpMethod::Get,
        "/tests",
        200,
        &[("Link", link.as_str())],
        json!([{"id": 1}]),
    );
    transport.respond(HttpMethod::Get, next, 200, json!([{"id": 2}]));

    let mut tests = manager.iter(ListParams::new()).await.unwrap();
    assert_eq!(tests.len(), None);

    let collected = tests.try_collect().await.unwrap();

    assert_eq!(collected.len(), 2);
    assert_eq!(transport.last_request().unwrap().path, next);
}

#[tokio::test]
async fn test_http_errors_keep_status_code() {
    let (transport, manager) = setup();
    transport.respond(HttpMethod::Get, "/tests/404", 404, json!({"message": "404 Not found"}));
    transport.respond(HttpMethod::Get, "/tests/401", 401, json!({"message": "401 Unauthorized"}));

    let not_found = manager.get(404).await.unwrap_err();
    assert!(matches!(not_found, ResourceError::Get { .. }));
    assert_eq!(not_found.status_code(), Some(404));

    let unauthorized = manager.get(401).await.unwrap_err();
    assert!(matches!(unauthorized, ResourceError::Authentication { .. }));
}

#[tokio::test]
async fn test_update_returns_raw_mapping() {
    let (transport, manager) = setup();
    transport.respond(HttpMethod::Put, "/tests/7", 200, json!({"id": 7, "foo": "new"}));

    let updated = manager.update(7, json!({"foo": "new"})).await.unwrap();

    assert_eq!(updated["foo"], json!("new"));
    assert_eq!(transport.last_request().unwrap().body, Some(json!({"foo": "new"})));
}
