//! Mock lawg API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the lawg API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, so a
//! log created in one call shows up in the next listing.
//!
//! # Example
//!
//! ```ignore
//! use lawg::mock_server::MockServer;
//! use lawg::LawgClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = LawgClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let project = client.project("acme").fetch().await.unwrap();
//!     assert_eq!(project.name, "Acme");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use handlers::ApiError;
pub use server::MockServer;
pub use state::{MockState, SharedState};
