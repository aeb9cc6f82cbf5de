use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use crate::directory::ItemDirectory;
use crate::playback::PlaybackHandoff;
use crate::room::VotingCoordinator;
use crate::user::IdentitySource;

use super::ServerConfig;

pub type GuardedCoordinator = Arc<VotingCoordinator>;
pub type GuardedItemDirectory = Arc<dyn ItemDirectory>;
pub type GuardedPlaybackHandoff = Arc<dyn PlaybackHandoff>;
pub type GuardedIdentitySource = Arc<dyn IdentitySource>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub coordinator: GuardedCoordinator,
    pub directory: GuardedItemDirectory,
    pub playback: GuardedPlaybackHandoff,
    pub identity: GuardedIdentitySource,
}

impl FromRef<ServerState> for GuardedCoordinator {
    fn from_ref(input: &ServerState) -> Self {
        input.coordinator.clone()
    }
}

impl FromRef<ServerState> for GuardedItemDirectory {
    fn from_ref(input: &ServerState) -> Self {
        input.directory.clone()
    }
}

impl FromRef<ServerState> for GuardedPlaybackHandoff {
    fn from_ref(input: &ServerState) -> Self {
        input.playback.clone()
    }
}

impl FromRef<ServerState> for GuardedIdentitySource {
    fn from_ref(input: &ServerState) -> Self {
        input.identity.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
