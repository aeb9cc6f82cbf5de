use anyhow::{bail, Result};
use uuid::Uuid;

use super::models::{Room, Vote};

/// In-memory storage for rooms and votes.
///
/// The registry has no business logic: it stores, indexes and hands back.
/// It is constructed once at process start and shared behind a single
/// mutex by the [`VotingCoordinator`](super::VotingCoordinator), which
/// serializes every mutation. Rooms and votes live for the process
/// lifetime; nothing here persists across restarts.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
    votes: Vec<Vote>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a room. Fails only on a duplicate id, which cannot happen
    /// with generated ids.
    pub fn add_room(&mut self, room: Room) -> Result<()> {
        if self.rooms.iter().any(|r| r.id == room.id) {
            bail!("Room with id {} already exists.", room.id);
        }
        self.rooms.push(room);
        Ok(())
    }

    pub fn find_room(&self, room_id: Uuid) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    pub fn find_room_mut(&mut self, room_id: Uuid) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == room_id)
    }

    /// All rooms with `is_active = true`, in creation order.
    pub fn active_rooms(&self) -> Vec<Room> {
        self.rooms.iter().filter(|r| r.is_active).cloned().collect()
    }

    /// Upserts a vote: any existing vote for the same (room, user, item)
    /// tuple is removed before the new one is inserted, so at most one
    /// survives. Callers hold the registry lock across the whole call.
    pub fn add_vote(&mut self, vote: Vote) {
        self.votes.retain(|v| {
            !(v.room_id == vote.room_id && v.user_id == vote.user_id && v.item_id == vote.item_id)
        });
        self.votes.push(vote);
    }

    pub fn votes_for_room(&self, room_id: Uuid, likes_only: bool) -> Vec<Vote> {
        self.votes
            .iter()
            .filter(|v| v.room_id == room_id && (!likes_only || v.is_like))
            .cloned()
            .collect()
    }
}
