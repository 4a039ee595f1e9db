//! Mock Insightly API server for E2E testing.
//!
//! An in-memory server that simulates the Insightly API. Unlike wiremock,
//! which mocks single requests per test, this server keeps state across
//! requests, so create/update/link workflows can be tested end to end.
//!
//! # Example
//!
//! ```ignore
//! use insightly::mock_server::{Fixtures, MockServer};
//! use insightly::{Contact, Get, InsightlyClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = InsightlyClient::new("test-key", &server.api_url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let contact = Contact::get(&client, Fixtures::CONTACT_ID).await.unwrap();
//!     assert_eq!(contact.first_name.as_deref(), Some("Jane"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
