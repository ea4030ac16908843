//! Mock MyAnimeList API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! MyAnimeList v2 API for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server serves a catalog and
//! applies field selection, paging, ranking and authentication the way the
//! real API does.
//!
//! # Example
//!
//! ```ignore
//! use malapi::mock_server::MockServer;
//! use malapi::{DetailQuery, MalClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = MalClient::with_base_url("test-client", None, server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let detail = client.get_anime_detail(&DetailQuery::new(5114)).await.unwrap();
//!     assert_eq!(detail.title(), "Fullmetal Alchemist: Brotherhood");
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
