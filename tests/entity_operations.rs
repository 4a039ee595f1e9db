//! Tests for the entity traits (Get, List, Search, Save, Delete).
//!
//! Uses wiremock to mock the Insightly API.

use insightly::{
    Contact, Delete, Get, InsightlyClient, InsightlyError, List, Opportunity,
    OpportunityCategory, Organisation, Record, Save, Search, SearchFilter, User,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> InsightlyClient {
    InsightlyClient::new("test-key", &format!("{}/v{{version}}/", server.uri())).unwrap()
}

fn contacts(range: std::ops::Range<i64>) -> Value {
    Value::Array(
        range
            .map(|id| json!({"CONTACT_ID": id, "FIRST_NAME": format!("Contact {id}")}))
            .collect(),
    )
}

/// Mount one mocked page of contacts, expected to be requested once.
async fn mount_page(server: &MockServer, skip: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v2.3/Contacts"))
        .and(query_param("skip", skip.to_string()))
        .and(query_param("top", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_contact() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Contacts/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "CONTACT_ID": 42,
            "FIRST_NAME": "Jane",
            "LAST_NAME": "Doe",
            "DATE_CREATED_UTC": "2024-01-15 10:30:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let contact = Contact::get(&client_for(&server), 42).await.unwrap();
    assert_eq!(contact.id(), Some(42));
    assert_eq!(contact.full_name(), "Jane Doe");
    assert!(contact.date_created_utc.is_some());
}

#[tokio::test]
async fn test_get_missing_contact_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Contacts/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Contact not found"))
        .mount(&server)
        .await;

    let err = Contact::get(&client_for(&server), 9).await.unwrap_err();
    assert!(matches!(err, InsightlyError::NotFound { .. }));
    assert!(err.to_string().contains("Contact not found"));
}

#[tokio::test]
async fn test_list_all_stops_on_short_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, contacts(0..500)).await;
    mount_page(&server, 500, contacts(500..503)).await;

    let all = Contact::list_all(&client_for(&server)).await.unwrap();
    assert_eq!(all.len(), 503);
    assert_eq!(all[502].id(), Some(502));
}

#[tokio::test]
async fn test_list_all_stops_on_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, contacts(0..500)).await;
    mount_page(&server, 500, json!([])).await;

    let all = Contact::list_all(&client_for(&server)).await.unwrap();
    assert_eq!(all.len(), 500);
}

#[tokio::test]
async fn test_list_all_with_no_records_makes_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/OpportunityCategories"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let categories = OpportunityCategory::list_all(&client_for(&server)).await.unwrap();
    assert!(categories.is_empty());
}

#[tokio::test]
async fn test_unpaged_list_is_a_single_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"USER_ID": 1, "FIRST_NAME": "Alice"},
            {"USER_ID": 2, "FIRST_NAME": "Bob"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let users = User::list_all(&client_for(&server)).await.unwrap();
    assert_eq!(users.len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_search_sends_filter_as_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Contacts/Search"))
        .and(query_param("email", "jane+crm@example.com"))
        .and(query_param("tag", "vip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contacts(1..2)))
        .expect(1)
        .mount(&server)
        .await;

    let filter = SearchFilter::new()
        .with("email", "jane+crm@example.com")
        .with("tag", "vip");
    let found = Contact::search(&client_for(&server), &filter).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_save_creates_then_updates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.3/Organisations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ORGANISATION_ID": 55,
            "ORGANISATION_NAME": "Acme Ltd",
            "VISIBLE_TO": "EVERYONE",
            "DATE_CREATED_UTC": "2024-03-03 03:03:03"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v2.3/Organisations/55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ORGANISATION_ID": 55,
            "ORGANISATION_NAME": "Acme Ltd",
            "WEBSITE": "https://acme.example"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut org = Organisation::new("Acme Ltd");

    org.save(&client).await.unwrap();
    assert_eq!(org.id(), Some(55));
    assert!(org.visible_to.is_some());

    org.website = Some("https://acme.example".to_string());
    org.save(&client).await.unwrap();
    assert_eq!(org.website.as_deref(), Some("https://acme.example"));

    let requests = server.received_requests().await.unwrap();
    let update_body: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(update_body["ORGANISATION_ID"], 55);
    assert_eq!(update_body["WEBSITE"], "https://acme.example");
    assert!(update_body.get("DATE_CREATED_UTC").is_none());
}

#[tokio::test]
async fn test_save_without_id_in_response_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.3/Opportunities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"OPPORTUNITY_NAME": "x"})))
        .mount(&server)
        .await;

    let mut opp = Opportunity::new("x");
    let err = opp.save(&client_for(&server)).await.unwrap_err();
    assert!(matches!(err, InsightlyError::UnexpectedResponse(_)));
    assert!(opp.is_new());
}

#[tokio::test]
async fn test_fetch_replaces_local_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Contacts/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "CONTACT_ID": 3,
            "FIRST_NAME": "Server"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut contact = Contact::new("Local", "Only");
    contact.contact_id = Some(3);
    contact.fetch(&client_for(&server)).await.unwrap();

    assert_eq!(contact.first_name.as_deref(), Some("Server"));
    assert_eq!(contact.last_name, None);
}

#[tokio::test]
async fn test_fetch_requires_id() {
    let server = MockServer::start().await;
    let mut contact = Contact::new("Never", "Saved");

    let err = contact.fetch(&client_for(&server)).await.unwrap_err();
    assert!(matches!(err, InsightlyError::MissingId { entity: "Contact" }));
}

#[tokio::test]
async fn test_delete_tolerates_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2.3/Opportunities/8"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    Opportunity::delete(&client_for(&server), 8).await.unwrap();
}

#[tokio::test]
async fn test_create_body_is_entire_state() {
    let server = MockServer::start().await;

    let mut contact = Contact::new("Jane", "Doe");
    contact.owner_user_id = Some(1);
    contact.set_custom_field("TIER__c", "gold");
    let expected = contact.to_json().unwrap();

    Mock::given(method("POST"))
        .and(path("/v2.3/Contacts"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"CONTACT_ID": 1})))
        .expect(1)
        .mount(&server)
        .await;

    contact.save(&client_for(&server)).await.unwrap();
    assert_eq!(contact.id(), Some(1));
}
