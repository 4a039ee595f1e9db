//! Mock Insightly API server.
//!
//! Provides an axum-based HTTP server that simulates the Insightly API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Insightly API server for testing.
///
/// The server runs in the background and accepts any API version in the
/// first path segment, so the client's default URL template works as-is
/// once the host is swapped.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// The server root, e.g. `http://127.0.0.1:4321`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Base URL template to pass to [`InsightlyClient::new`](crate::InsightlyClient::new).
    pub fn api_url(&self) -> String {
        format!("{}/v{{version}}/", self.url)
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server. Safe to call more than once.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for contact in &scenario.contacts {
            state = state.with_record(contact);
        }
        for organisation in &scenario.organisations {
            state = state.with_record(organisation);
        }
        for opportunity in &scenario.opportunities {
            state = state.with_record(opportunity);
        }
        for category in &scenario.categories {
            state = state.with_record(category);
        }
        for user in &scenario.users {
            state = state.with_record(user);
        }
        for relationship in &scenario.relationships {
            state = state.with_record(relationship);
        }

        state
    }

    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route(
                "/:version/:resource",
                get(handlers::list_records).post(handlers::create_record),
            )
            .route(
                "/:version/:resource/:id",
                get(handlers::get_record)
                    .put(handlers::update_record)
                    .delete(handlers::delete_record),
            )
            .route(
                "/:version/:resource/:id/:collection",
                axum::routing::post(handlers::add_link).put(handlers::update_link),
            )
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
