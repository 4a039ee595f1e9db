//! Tests for the resource-level client operations.
//!
//! Uses wiremock to mock the Insightly API.

use insightly::{Fields, InsightlyClient, Record, SearchFilter};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> InsightlyClient {
    InsightlyClient::new("test-key", &format!("{}/v{{version}}/", server.uri())).unwrap()
}

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_add_contact_drops_unknown_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.3/Contacts"))
        .and(body_json(json!({
            "FIRST_NAME": "Jane",
            "LAST_NAME": "Doe",
            "OWNER_USER_ID": 12,
            "BACKGROUND": "Met at the expo"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "CONTACT_ID": 77,
            "FIRST_NAME": "Jane",
            "LAST_NAME": "Doe",
            "OWNER_USER_ID": 12,
            "BACKGROUND": "Met at the expo"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let contact = client_for(&server)
        .add_contact(
            "Jane",
            "Doe",
            12,
            fields(json!({
                "BACKGROUND": "Met at the expo",
                "SHOE_SIZE": 42
            })),
        )
        .await
        .unwrap();

    assert_eq!(contact.id(), Some(77));
    assert_eq!(contact.background.as_deref(), Some("Met at the expo"));
}

#[tokio::test]
async fn test_add_organisation_sends_required_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.3/Organisations"))
        .and(body_json(json!({
            "ORGANISATION_NAME": "Acme Ltd",
            "OWNER_USER_ID": 1,
            "WEBSITE": "https://acme.example"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ORGANISATION_ID": 5,
            "ORGANISATION_NAME": "Acme Ltd"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let org = client_for(&server)
        .add_organisation(
            "Acme Ltd",
            1,
            fields(json!({"WEBSITE": "https://acme.example", "website": "ignored"})),
        )
        .await
        .unwrap();
    assert_eq!(org.id(), Some(5));
}

#[tokio::test]
async fn test_add_opportunity_with_no_extra_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2.3/Opportunities"))
        .and(body_json(json!({"OPPORTUNITY_NAME": "Renewal", "OWNER_USER_ID": 3})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "OPPORTUNITY_ID": 9,
            "OPPORTUNITY_NAME": "Renewal"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opp = client_for(&server)
        .add_opportunity("Renewal", 3, Fields::new())
        .await
        .unwrap();
    assert_eq!(opp.id(), Some(9));
}

#[tokio::test]
async fn test_list_with_filter_uses_search_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Organisations/Search"))
        .and(query_param("organisation_name", "Acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ORGANISATION_ID": 1, "ORGANISATION_NAME": "Acme"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = SearchFilter::from_json(&json!({"organisation_name": "Acme"})).unwrap();
    let found = client_for(&server)
        .list_organisations(Some(&filter))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn test_list_with_empty_filter_paginates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Opportunities"))
        .and(query_param("skip", "0"))
        .and(query_param("top", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"OPPORTUNITY_ID": 1},
            {"OPPORTUNITY_ID": 2}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let found = client_for(&server)
        .list_opportunities(Some(&SearchFilter::new()))
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn test_get_and_delete_contact() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Contacts/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"CONTACT_ID": 4})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2.3/Contacts/4"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let contact = client.get_contact(4).await.unwrap();
    client.delete_contact(contact.require_id().unwrap()).await.unwrap();
}

#[tokio::test]
async fn test_read_only_lists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.3/Relationships"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"RELATIONSHIP_ID": 7, "FORWARD_TITLE": "Parent", "REVERSE_TITLE": "Subsidiary"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.3/Users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"USER_ID": 1}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2.3/OpportunityCategories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"CATEGORY_ID": 1, "CATEGORY_NAME": "Hardware"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.list_relationships().await.unwrap()[0].id(), Some(7));
    assert_eq!(client.list_users().await.unwrap().len(), 1);
    assert_eq!(
        client.list_opportunity_categories().await.unwrap()[0]
            .category_name
            .as_deref(),
        Some("Hardware")
    );
}
