//! Integration tests for the HTTP client functionality.
//!
//! These tests run the reqwest-backed client against a wiremock server to
//! verify headers, retries, error mapping, uploads and pagination links.

use gitlab_api::clients::{DataType, HttpClient, HttpMethod, HttpRequest, Transport};
use gitlab_api::rest::{CreateMixin, GetMixin, ListMixin, ListParams, ResourceError};
use gitlab_api::{AccessToken, Gitlab, GitlabConfig, GitlabUrl, HttpError, PaginationMode};
use serde_json::json;
use wiremock::matchers::{header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointing at the mock server.
fn config_for(server: &MockServer) -> gitlab_api::GitlabConfigBuilder {
    GitlabConfig::builder()
        .url(GitlabUrl::new(server.uri()).unwrap())
        .token(AccessToken::private("glpat-test").unwrap())
}

// ============================================================================
// Requests and headers
// ============================================================================

#[tokio::test]
async fn test_get_sends_token_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1"))
        .and(header("PRIVATE-TOKEN", "glpat-test"))
        .and(header_regex("User-Agent", "^gitlab-api-rust/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server).build().unwrap()).unwrap();
    let response = client.http_get("/projects/1", vec![]).await.unwrap();

    assert_eq!(response.body["id"], 1);
}

#[tokio::test]
async fn test_job_token_uses_its_own_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/user"))
        .and(header("JOB-TOKEN", "ci-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let config = GitlabConfig::builder()
        .url(GitlabUrl::new(server.uri()).unwrap())
        .token(AccessToken::job("ci-token").unwrap())
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    assert!(client.http_get("/user", vec![]).await.is_ok());
}

#[tokio::test]
async fn test_empty_body_parses_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server).build().unwrap()).unwrap();
    let response = client.http_delete("/projects/1", vec![]).await.unwrap();

    assert_eq!(response.code, 204);
    assert!(response.body.is_null());
}

// ============================================================================
// Retries and errors
// ============================================================================

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server).build().unwrap()).unwrap();
    let response = client.http_get("/projects", vec![]).await.unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_transient_errors_exhaust_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"message": "bad gateway"})))
        .expect(3)
        .mount(&server)
        .await;

    let config = config_for(&server)
        .retry_transient_errors(true)
        .max_retries(2)
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();
    let err = client.http_get("/projects", vec![]).await.unwrap_err();

    match err {
        HttpError::MaxRetries(err) => {
            assert_eq!(err.code, 502);
            assert_eq!(err.tries, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_server_errors_are_not_retried_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server).build().unwrap()).unwrap();
    let err = client.http_get("/projects", vec![]).await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_resource_errors_keep_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "404 Project Not Found"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects/10"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "401 Unauthorized"})),
        )
        .mount(&server)
        .await;

    let gitlab = Gitlab::new(&config_for(&server).build().unwrap()).unwrap();

    let not_found = gitlab.projects().get(9).await.unwrap_err();
    assert!(matches!(not_found, ResourceError::Get { resource: "Project", .. }));
    assert!(not_found.to_string().contains("404 Project Not Found"));

    let unauthorized = gitlab.projects().get(10).await.unwrap_err();
    assert!(matches!(unauthorized, ResourceError::Authentication { .. }));
    assert_eq!(unauthorized.status_code(), Some(401));
}

// ============================================================================
// Uploads and pagination
// ============================================================================

#[tokio::test]
async fn test_multipart_upload_carries_fields_and_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/groups"))
        .and(header_regex("Content-Type", "^multipart/form-data"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 4, "name": "team"})),
        )
        .mount(&server)
        .await;

    let gitlab = Gitlab::new(&config_for(&server).build().unwrap()).unwrap();
    gitlab
        .groups()
        .create(json!({"name": "team", "path": "team", "avatar": "PNGDATA"}))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"path\""));
    assert!(body.contains("filename=\"avatar.png\""));
    assert!(body.contains("PNGDATA"));
}

#[tokio::test]
async fn test_json_request_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/projects/1"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config_for(&server).build().unwrap()).unwrap();
    let request = HttpRequest::builder(HttpMethod::Put, "/projects/1")
        .body(json!({"description": "new"}))
        .body_type(DataType::Json);
    client.send(request.build().unwrap()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"description": "new"}));
}

#[tokio::test]
async fn test_keyset_iteration_follows_absolute_link() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let server = MockServer::start().await;
    let next = format!("{}/api/v4/projects?cursor=abc&pagination=keyset", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("per_page", "1"))
        .and(query_param("pagination", "keyset"))
        .and(query_param("order_by", "id"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", format!("<{next}>; rel=\"next\"").as_str())
                .set_body_json(json!([{"id": 1, "path_with_namespace": "a/one"}])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("cursor", "abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 2, "path_with_namespace": "a/two"}])),
        )
        .mount(&server)
        .await;

    let config = config_for(&server)
        .per_page(1)
        .order_by("id")
        .pagination(PaginationMode::Keyset)
        .build()
        .unwrap();
    let gitlab = Gitlab::new(&config).unwrap();

    let mut projects = gitlab.projects().iter(ListParams::new()).await.unwrap();
    assert_eq!(projects.len(), None);

    let mut names = Vec::new();
    while let Some(project) = projects.next().await.unwrap() {
        names.push(project.to_string());
    }

    assert_eq!(
        names,
        vec![
            "<Project id:1 path_with_namespace:a/one>",
            "<Project id:2 path_with_namespace:a/two>",
        ]
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
