//! Integration tests for the GitLab v4 resource definitions.
//!
//! These tests verify paths, validation contracts and the custom actions
//! of the concrete resources, using a scripted transport.

use std::sync::Arc;

use gitlab_api::clients::{DataType, HttpMethod};
use gitlab_api::rest::{
    AccessRequestApproveMixin, BadgeRenderMixin, CreateMixin, GetMixin, GetWithoutIdMixin,
    HeadMixin, ListMixin, ListParams, ObjectDeleteMixin, ParticipantsMixin, PromoteMixin,
    ResourceError, SaveMixin, SubscribableMixin, TimeTrackingMixin, TodoMixin, ValidationError,
};
use gitlab_api::testing::RecordingTransport;
use gitlab_api::Gitlab;
use serde_json::{json, Value};

fn setup() -> (Arc<RecordingTransport>, Gitlab) {
    let transport = Arc::new(RecordingTransport::new());
    let gitlab = Gitlab::from_transport(transport.clone());
    (transport, gitlab)
}

// ============================================================================
// Projects and issues
// ============================================================================

#[tokio::test]
async fn test_issue_workflow_through_lazy_project() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Get,
        "/projects/group%2Fapp/issues/3",
        200,
        json!({"id": 900, "iid": 3, "project_id": 12, "title": "Crash", "labels": ["bug"]}),
    );
    transport.respond(
        HttpMethod::Put,
        "/projects/group%2Fapp/issues/3",
        200,
        json!({"id": 900, "iid": 3, "project_id": 12, "title": "Crash on start", "labels": ["bug"]}),
    );

    let project = gitlab.projects().lazy("group/app");
    let mut issue = project.issues().unwrap().get(3).await.unwrap();
    assert_eq!(issue.to_string(), "<ProjectIssue iid:3 title:Crash>");

    issue.write("title", "Crash on start");
    issue.save().await.unwrap();

    // The fetched issue is addressed through the manager it came from.
    let requests = transport.requests();
    assert_eq!(requests[1].path, "/projects/group%2Fapp/issues/3");
    assert_eq!(requests[1].body, Some(json!({"title": "Crash on start"})));
    assert_eq!(issue.get("title"), Some(&json!("Crash on start")));
    assert!(!issue.is_dirty());
}

#[tokio::test]
async fn test_issue_list_encodes_typed_filters() {
    let (transport, gitlab) = setup();
    transport.respond(HttpMethod::Get, "/projects/5/issues", 200, json!([]));

    let issues = gitlab.projects().lazy(5).issues().unwrap();
    let page = issues
        .list(
            ListParams::new()
                .filter("labels", json!(["bug", "ui"]))
                .filter("iids", json!([1, 2])),
        )
        .await
        .unwrap();

    assert!(page.is_empty());
    let request = transport.last_request().unwrap();
    assert_eq!(request.query_value("labels"), Some("bug,ui"));
    let iids: Vec<_> = request
        .query
        .iter()
        .filter(|(key, _)| key == "iids[]")
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(iids, vec!["1", "2"]);
}

#[tokio::test]
async fn test_issue_create_requires_title() {
    let (transport, gitlab) = setup();
    let issues = gitlab.projects().lazy(5).issues().unwrap();

    let err = issues
        .create(json!({"description": "no title"}))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ResourceError::Validation(ValidationError::MissingRequired { .. })
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_issue_create_rejects_non_object_data() {
    let (transport, gitlab) = setup();
    let issues = gitlab.projects().lazy(5).issues().unwrap();

    let err = issues.create(json!(["title"])).await.unwrap_err();

    assert!(matches!(
        err,
        ResourceError::Validation(ValidationError::InvalidData { found: "array" })
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_issue_actions_use_item_path() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Post,
        "/projects/5/issues/3/subscribe",
        201,
        json!({"iid": 3, "subscribed": true}),
    );
    transport.respond(HttpMethod::Post, "/projects/5/issues/3/todo", 201, json!({"id": 1}));
    transport.respond(
        HttpMethod::Post,
        "/projects/5/issues/3/add_spent_time",
        201,
        json!({"total_time_spent": 3600}),
    );
    transport.respond(
        HttpMethod::Get,
        "/projects/5/issues/3/participants",
        200,
        json!([{"username": "alice"}]),
    );

    let mut issue = gitlab.projects().lazy(5).issues().unwrap().lazy(3);

    issue.subscribe().await.unwrap();
    assert_eq!(issue.get("subscribed"), Some(&json!(true)));
    assert!(!issue.is_lazy());

    issue.todo().await.unwrap();

    let spent = issue.add_spent_time("1h").await.unwrap();
    assert_eq!(spent["total_time_spent"], json!(3600));
    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({"duration": "1h"}))
    );

    let participants = issue.participants().await.unwrap();
    assert_eq!(participants.len(), 1);
    assert!(transport.is_exhausted());
}

#[tokio::test]
async fn test_time_stats_prefers_known_attribute() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Get,
        "/projects/5/merge_requests/8",
        200,
        json!({"iid": 8, "title": "Fix", "time_stats": {"time_estimate": 60}}),
    );

    let merge_requests = gitlab.projects().lazy(5).merge_requests().unwrap();
    let merge_request = merge_requests.get(8).await.unwrap();

    let stats = merge_request.time_stats().await.unwrap();
    assert_eq!(stats["time_estimate"], json!(60));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_notes_nest_under_issue() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Post,
        "/projects/5/issues/3/notes",
        201,
        json!({"id": 77, "body": "LGTM"}),
    );

    let issue = gitlab.projects().lazy(5).issues().unwrap().lazy(3);
    let note = issue
        .notes()
        .unwrap()
        .create(json!({"body": "LGTM"}))
        .await
        .unwrap();

    assert_eq!(note.path(), "/projects/5/issues/3/notes/77");
    assert_eq!(note.get("project_id"), Some(&json!(5)));
}

// ============================================================================
// Uploads, sets and singletons
// ============================================================================

#[tokio::test]
async fn test_project_head_returns_lowercased_headers() {
    let (transport, gitlab) = setup();
    transport.respond_with_headers(
        HttpMethod::Head,
        "/projects/8",
        200,
        &[("ETag", "W/\"abc\"")],
        Value::Null,
    );

    let headers = gitlab.projects().head(8).await.unwrap();

    assert_eq!(headers["etag"], vec!["W/\"abc\"".to_string()]);
    assert_eq!(transport.last_request().unwrap().http_method, HttpMethod::Head);
}

#[tokio::test]
async fn test_project_avatar_is_uploaded_as_multipart() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Post,
        "/projects",
        201,
        json!({"id": 1, "path_with_namespace": "me/demo"}),
    );

    gitlab
        .projects()
        .create(json!({"name": "demo", "avatar": "PNGDATA"}))
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.body_type, Some(DataType::Multipart));
    assert_eq!(request.body, Some(json!({"name": "demo"})));
    assert_eq!(request.files.len(), 1);
    assert_eq!(request.files[0].field, "avatar");
    assert_eq!(request.files[0].filename, "avatar.png");
    assert_eq!(request.files[0].content, b"PNGDATA".to_vec());
}

#[tokio::test]
async fn test_snippet_files_and_file_name_are_exclusive() {
    let (transport, gitlab) = setup();

    let both = gitlab
        .snippets()
        .create(json!({"title": "t", "files": [], "file_name": "a.rs"}))
        .await
        .unwrap_err();
    let neither = gitlab
        .snippets()
        .create(json!({"title": "t"}))
        .await
        .unwrap_err();

    assert!(matches!(
        both,
        ResourceError::Validation(ValidationError::ExclusiveConflict { .. })
    ));
    assert!(matches!(
        neither,
        ResourceError::Validation(ValidationError::ExclusiveMissing { .. })
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_notification_settings_save_targets_collection_path() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Get,
        "/projects/5/notification_settings",
        200,
        json!({"level": "global"}),
    );
    transport.respond(
        HttpMethod::Put,
        "/projects/5/notification_settings",
        200,
        json!({"level": "watch"}),
    );

    let manager = gitlab.projects().lazy(5).notification_settings().unwrap();
    let mut settings = manager.get().await.unwrap();
    assert_eq!(settings.to_string(), "<ProjectNotificationSettings>");

    settings.write("level", "watch");
    settings.save().await.unwrap();

    assert_eq!(settings.get("level"), Some(&json!("watch")));
    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({"level": "watch"}))
    );
}

// ============================================================================
// Membership, badges, labels and milestones
// ============================================================================

#[tokio::test]
async fn test_access_request_approve_defaults_to_developer() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Get,
        "/groups/4/access_requests",
        200,
        json!([{"id": 21, "username": "bob"}]),
    );
    transport.respond(
        HttpMethod::Put,
        "/groups/4/access_requests/21/approve",
        200,
        json!({"id": 21, "username": "bob", "access_level": 30}),
    );

    let requests = gitlab.groups().lazy(4).access_requests().unwrap();
    let mut pending = requests.list_all(ListParams::new()).await.unwrap();
    let request = &mut pending[0];

    request.approve().await.unwrap();

    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({"access_level": 30}))
    );
    assert_eq!(request.get("access_level"), Some(&json!(30)));
    assert!(!request.created_from_list());
}

#[tokio::test]
async fn test_access_request_delete_uses_user_id() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Delete,
        "/projects/5/access_requests/21",
        204,
        Value::Null,
    );

    let request = gitlab
        .projects()
        .lazy(5)
        .access_requests()
        .unwrap()
        .lazy(21);
    request.delete().await.unwrap();

    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_badge_render_sends_urls_as_query() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Get,
        "/projects/5/badges/render",
        200,
        json!({"rendered_link_url": "https://ci/5"}),
    );

    let badges = gitlab.projects().lazy(5).badges().unwrap();
    let rendered = badges
        .render("https://ci/%{project_id}", "https://ci/badge.svg")
        .await
        .unwrap();

    assert_eq!(rendered["rendered_link_url"], json!("https://ci/5"));
    let request = transport.last_request().unwrap();
    assert_eq!(request.query_value("link_url"), Some("https://ci/%{project_id}"));
    assert_eq!(request.query_value("image_url"), Some("https://ci/badge.svg"));
}

#[tokio::test]
async fn test_label_rename_sends_required_name() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Get,
        "/projects/5/labels/to%20do",
        200,
        json!({"id": 3, "name": "to do", "color": "#ff0000"}),
    );
    transport.respond(
        HttpMethod::Put,
        "/projects/5/labels/to%20do",
        200,
        json!({"id": 3, "name": "todo", "color": "#ff0000"}),
    );

    let labels = gitlab.projects().lazy(5).labels().unwrap();
    let mut label = labels.get("to do").await.unwrap();

    label.write("new_name", "todo");
    label.save().await.unwrap();

    assert_eq!(
        transport.last_request().unwrap().body,
        Some(json!({"name": "to do", "new_name": "todo"}))
    );
    assert_eq!(label.path(), "/projects/5/labels/todo");
}

#[tokio::test]
async fn test_milestone_promote_replaces_state() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Put,
        "/projects/5/milestones/2/promote",
        200,
        json!({"id": 2, "title": "v1", "group_id": 4}),
    );

    let mut milestone = gitlab.projects().lazy(5).milestones().unwrap().lazy(2);
    milestone.promote().await.unwrap();

    assert_eq!(milestone.get("group_id"), Some(&json!(4)));
    assert_eq!(milestone.to_string(), "<ProjectMilestone id:2 title:v1>");
}

#[tokio::test]
async fn test_failed_action_reports_action_name() {
    let (transport, gitlab) = setup();
    transport.respond(
        HttpMethod::Post,
        "/projects/5/labels/bug/subscribe",
        304,
        Value::Null,
    );

    let mut label = gitlab.projects().lazy(5).labels().unwrap().lazy("bug");
    let err = label.subscribe().await.unwrap_err();

    assert!(matches!(
        err,
        ResourceError::Action {
            action: "subscribe",
            ..
        }
    ));
    assert_eq!(err.status_code(), Some(304));
}
