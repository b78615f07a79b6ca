//! Mock lawg API server.
//!
//! Provides an axum-based HTTP server that simulates the lawg API.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers::{self, ApiError};
use super::state::{MockState, SharedState};

/// A mock lawg API server for testing.
///
/// The server runs in the background and can be used to test the lawg client
/// against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "mock server stopped");
            }
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Pass this as the API root when creating a client; the client adds
    /// the `/v1` prefix itself.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows inspecting or modifying the mock data during a test.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for project in scenario.projects {
            state = state.with_project(project);
        }

        for log in scenario.logs {
            state = state.with_log(log);
        }

        for (namespace, insight) in scenario.insights {
            state = state.with_insight(&namespace, insight);
        }

        for user in scenario.users {
            state = state.with_user(user);
        }

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: SharedState) -> Router {
        let api = Router::new()
            // Project routes
            .route(
                "/v1/projects",
                post(handlers::create_project).get(handlers::list_projects),
            )
            .route(
                "/v1/projects/:namespace",
                get(handlers::get_project)
                    .patch(handlers::update_project)
                    .delete(handlers::delete_project),
            )
            // Membership routes
            .route(
                "/v1/projects/:namespace/invites/:username",
                post(handlers::invite_member).delete(handlers::revoke_invite),
            )
            .route(
                "/v1/projects/:namespace/members/:username",
                axum::routing::delete(handlers::remove_member),
            )
            // Feed routes
            .route(
                "/v1/projects/:namespace/feeds",
                post(handlers::create_feed).get(handlers::list_feeds),
            )
            .route(
                "/v1/projects/:namespace/feeds/:feed",
                get(handlers::get_feed)
                    .patch(handlers::update_feed)
                    .delete(handlers::delete_feed),
            )
            // Log routes
            .route(
                "/v1/projects/:namespace/feeds/:feed/logs",
                post(handlers::create_log).get(handlers::list_logs),
            )
            .route(
                "/v1/projects/:namespace/feeds/:feed/logs/:log_id",
                get(handlers::get_log)
                    .patch(handlers::update_log)
                    .delete(handlers::delete_log),
            )
            // Insight routes
            .route(
                "/v1/projects/:namespace/insights",
                post(handlers::create_insight).get(handlers::list_insights),
            )
            .route(
                "/v1/projects/:namespace/insights/:insight_id",
                get(handlers::get_insight)
                    .patch(handlers::update_insight)
                    .delete(handlers::delete_insight),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

        api
            // Health check, reachable without a token
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests whose `Authorization` header does not match the
/// configured token.
async fn require_token(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let required = state.read().await.required_token.clone();

    if let Some(required) = required {
        let provided = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        if provided != Some(required.as_str()) {
            return ApiError::unauthorized().into_response();
        }
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
