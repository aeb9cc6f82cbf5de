//! Common test infrastructure
//!
//! This module provides everything the end-to-end tests need: an isolated
//! server per test, an HTTP client wrapper and shared fixture ids.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestClient, TestServer, ORGANIZER_ID};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_list_rooms() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::as_user(server.base_url.clone(), ORGANIZER_ID);
//!
//!     let response = client.list_rooms().await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use constants::*;
pub use server::TestServer;

#[allow(unused_imports)]
pub(crate) use fixtures::create_test_library;
