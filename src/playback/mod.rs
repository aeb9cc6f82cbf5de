//! Playback handoff to the external group-playback mechanism.
//!
//! Once a room has a winner, the engine hands the item over for playback
//! and moves on; delivery is fire-and-forget from its perspective.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[async_trait]
pub trait PlaybackHandoff: Send + Sync {
    /// Request that the playback group enqueue the given item.
    async fn enqueue(&self, group_ref: &str, item_id: Uuid) -> Result<()>;
}

/// Default handoff that only records the request. Deployments substitute an
/// implementation talking to their playback backend.
pub struct LoggingPlaybackHandoff;

#[async_trait]
impl PlaybackHandoff for LoggingPlaybackHandoff {
    async fn enqueue(&self, group_ref: &str, item_id: Uuid) -> Result<()> {
        info!("Handing off item {} to playback group {}", item_id, group_ref);
        Ok(())
    }
}

/// A caller's view of the playback group behind their room.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackGroupInfo {
    pub group_ref: Option<String>,
    pub is_leader: bool,
    pub member_count: usize,
    pub member_user_ids: Vec<Uuid>,
}

impl PlaybackGroupInfo {
    /// What callers see when they are not in any room with a playback group.
    pub fn none() -> Self {
        PlaybackGroupInfo {
            group_ref: None,
            is_leader: false,
            member_count: 0,
            member_user_ids: Vec::new(),
        }
    }
}
