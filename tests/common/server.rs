//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port with its own
//! registry, coordinator and fixture library.

use super::constants::*;
use super::fixtures::create_test_library;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use uuid::Uuid;
use voteroom_server::directory::InMemoryItemDirectory;
use voteroom_server::playback::PlaybackHandoff;
use voteroom_server::room::{RoomDefaults, RoomRegistry, VotingCoordinator};
use voteroom_server::server::{server::make_app, RequestsLoggingLevel, ServerConfig};
use voteroom_server::user::PassthroughIdentity;

/// Playback handoff that records every enqueue for assertions.
pub struct RecordingPlaybackHandoff {
    handoffs: Mutex<Vec<(String, Uuid)>>,
}

impl RecordingPlaybackHandoff {
    fn new() -> Self {
        Self {
            handoffs: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<(String, Uuid)> {
        self.handoffs.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaybackHandoff for RecordingPlaybackHandoff {
    async fn enqueue(&self, group_ref: &str, item_id: Uuid) -> Result<()> {
        self.handoffs
            .lock()
            .unwrap()
            .push((group_ref.to_owned(), item_id));
        Ok(())
    }
}

/// Test server instance with an isolated voting engine.
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Coordinator handle for direct engine access in tests.
    pub coordinator: Arc<VotingCoordinator>,

    /// Records playback handoffs for assertions.
    pub playback: Arc<RecordingPlaybackHandoff>,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port and waits until it
    /// answers on its stats endpoint.
    pub async fn spawn() -> Self {
        let (items, collections) = create_test_library();
        let directory = Arc::new(InMemoryItemDirectory::new(items, collections));

        let registry = Arc::new(Mutex::new(RoomRegistry::new()));
        let coordinator = Arc::new(VotingCoordinator::new(
            registry,
            directory.clone(),
            RoomDefaults::default(),
        ));

        let playback = Arc::new(RecordingPlaybackHandoff::new());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: None,
        };

        let app = make_app(
            config,
            coordinator.clone(),
            directory,
            playback.clone(),
            Arc::new(PassthroughIdentity),
        )
        .expect("Failed to build app");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            coordinator,
            playback,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the stats endpoint.
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    return;
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
