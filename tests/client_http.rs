//! Transport tests for the Insightly client.
//!
//! Uses wiremock to check authentication, status mapping and response
//! decoding against the real HTTP stack.

use insightly::{ApiResponse, FilePayload, InsightlyClient, InsightlyError};
use reqwest::Method;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Client pointed at the mock server with the default API version.
fn client_for(server: &MockServer) -> InsightlyClient {
    InsightlyClient::new("test-key", &format!("{}/v{{version}}/", server.uri())).unwrap()
}

#[tokio::test]
async fn test_requests_use_basic_auth_and_json_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Users"))
        .and(header("Authorization", "Basic dGVzdC1rZXk6"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).get("/Users").await.unwrap();
    assert_eq!(response.json(), Some(&serde_json::json!([])));
}

#[tokio::test]
async fn test_version_is_part_of_the_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.2/Relationships"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_version("2.2").unwrap();
    assert_eq!(client.version(), "2.2");
    client.get("Relationships").await.unwrap();
}

#[tokio::test]
async fn test_error_statuses_map_to_distinct_variants() {
    let server = MockServer::start().await;

    for status in [400u16, 401, 403, 404, 500] {
        Mock::given(method("GET"))
            .and(path(format!("/v2.3/Contacts/{status}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(format!("failure {status}")))
            .mount(&server)
            .await;
    }

    let client = client_for(&server);

    for status in [400u16, 401, 403, 404, 500] {
        let err = client
            .get(&format!("/Contacts/{status}"))
            .await
            .unwrap_err();

        match (status, &err) {
            (400, InsightlyError::InvalidParameter { .. })
            | (401, InsightlyError::Unauthorized { .. })
            | (403, InsightlyError::NoPermission { .. })
            | (404, InsightlyError::NotFound { .. })
            | (500, InsightlyError::ResourceUnavailable { .. }) => {}
            _ => panic!("status {status} mapped to {err:?}"),
        }

        assert_eq!(err.status_code(), Some(status));
        let message = err.to_string();
        assert!(message.contains(&format!("failure {status}")), "{message}");
        assert!(
            err.url().unwrap().ends_with(&format!("/v2.3/Contacts/{status}")),
            "{:?}",
            err.url()
        );
    }
}

#[tokio::test]
async fn test_empty_delete_body_is_returned_raw() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2.3/Contacts/7"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).delete("/Contacts/7").await.unwrap();
    assert_eq!(response, ApiResponse::Raw(Vec::new()));
    assert!(response.json().is_none());
}

#[tokio::test]
async fn test_non_json_success_body_is_returned_raw() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Contacts/1/Image"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG".to_vec()))
        .mount(&server)
        .await;

    let response = client_for(&server).get("/Contacts/1/Image").await.unwrap();
    assert_eq!(response, ApiResponse::Raw(b"\x89PNG".to_vec()));
}

#[tokio::test]
async fn test_upload_sends_multipart_without_json_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.3/Contacts/1/Image/photo.png"))
        .and(header("Authorization", "Basic dGVzdC1rZXk6"))
        .and(header_exists("Content-Type"))
        .and(body_string_contains("filename=\"photo.png\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"FILE_ID": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let file = FilePayload::new("photo.png", b"not really a png".to_vec());
    let response = client_for(&server)
        .upload(Method::POST, "/Contacts/1/Image/photo.png", file)
        .await
        .unwrap();
    assert_eq!(response.json(), Some(&serde_json::json!({"FILE_ID": 3})));

    let requests: Vec<Request> = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"), "{content_type}");
}

#[tokio::test]
async fn test_debug_output_hides_api_key() {
    let client = InsightlyClient::new("super-secret", "https://api.insight.ly/v{version}/").unwrap();
    let debug = format!("{client:?}");

    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("https://api.insight.ly/v2.3/"));
}
