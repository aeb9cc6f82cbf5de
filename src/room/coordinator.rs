use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::directory::ItemDirectory;

use super::models::{
    Room, RoomSpec, SortPreference, UserPermissions, Vote, VotedItem, VotingResults,
};
use super::registry::RoomRegistry;

const UNKNOWN_ITEM: &str = "Unknown";

/// Why a room transition was refused.
///
/// An inactive room is indistinguishable from a missing one: lookups only
/// consider active rooms, so both surface as `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VotingError {
    #[error("room not found")]
    NotFound,
    #[error("operation not allowed in the room's current state")]
    PreconditionFailed,
}

/// Fallbacks applied when a room spec omits the time limit or sort order.
#[derive(Debug, Clone, Copy)]
pub struct RoomDefaults {
    pub time_limit_minutes: i64,
    pub sort_by: SortPreference,
}

impl Default for RoomDefaults {
    fn default() -> Self {
        RoomDefaults {
            time_limit_minutes: 5,
            sort_by: SortPreference::Random,
        }
    }
}

/// The voting-room state machine.
///
/// Every transition rule lives here: room creation, admission, the single
/// `Created -> VotingActive` phase flip, vote upserts and tallying. Storage
/// is delegated to the [`RoomRegistry`]; item metadata comes from the
/// injected [`ItemDirectory`]. All mutation is serialized through the
/// registry mutex, so concurrent joins, votes and phase flips against the
/// same room cannot interleave mid-check.
///
/// There is no engine-enforced voting deadline and no terminal state: a
/// room stays in `VotingActive` once started, and the configured time limit
/// is advisory for callers tracking their own wall-clock deadline.
pub struct VotingCoordinator {
    registry: Arc<Mutex<RoomRegistry>>,
    directory: Arc<dyn ItemDirectory>,
    permissions: Mutex<HashMap<Uuid, UserPermissions>>,
    defaults: RoomDefaults,
}

impl VotingCoordinator {
    pub fn new(
        registry: Arc<Mutex<RoomRegistry>>,
        directory: Arc<dyn ItemDirectory>,
        defaults: RoomDefaults,
    ) -> Self {
        Self {
            registry,
            directory,
            permissions: Mutex::new(HashMap::new()),
            defaults,
        }
    }

    /// Creates a room with the organizer as its first member.
    ///
    /// The permission check (`can_organize`) belongs to the caller; this
    /// operation only applies the spec. The time limit is clamped into
    /// [1, 120] minutes, an unparsable sort order falls back to `Random`
    /// and an empty item-type filter falls back to Movie-only.
    pub fn create_room(&self, organizer_id: Uuid, spec: RoomSpec) -> Result<Room> {
        let mut room = Room::new(organizer_id, spec.name);
        room.playback_group_ref = spec.playback_group_ref;
        room.set_time_limit_minutes(spec.time_limit.unwrap_or(self.defaults.time_limit_minutes));
        room.sort_preference = spec
            .sort_by
            .map(|s| SortPreference::parse(&s))
            .unwrap_or(self.defaults.sort_by);
        room.selected_collections = spec.selected_collections;
        room.set_selected_genres(spec.selected_genres);
        room.max_parental_rating = spec.max_parental_rating;
        if !spec.item_types.is_empty() {
            room.set_item_types(spec.item_types);
        }

        self.registry.lock().unwrap().add_room(room.clone())?;
        info!("Created voting room {} by user {}", room.id, organizer_id);

        Ok(room)
    }

    /// All active rooms, in creation order.
    pub fn active_rooms(&self) -> Vec<Room> {
        self.registry.lock().unwrap().active_rooms()
    }

    pub fn get_room(&self, room_id: Uuid) -> Option<Room> {
        self.registry.lock().unwrap().find_room(room_id).cloned()
    }

    /// Admits a user to an active room. The membership check and insert run
    /// under one lock, so two racing joins cannot both succeed.
    pub fn join_room(&self, room_id: Uuid, user_id: Uuid) -> Result<(), VotingError> {
        let mut registry = self.registry.lock().unwrap();
        let room = registry
            .find_room_mut(room_id)
            .filter(|r| r.is_active)
            .ok_or(VotingError::NotFound)?;

        if !room.add_member(user_id) {
            return Err(VotingError::PreconditionFailed);
        }

        info!("User {} joined room {}", user_id, room_id);
        Ok(())
    }

    /// Flips the room into its voting phase. Only the organizer may start,
    /// and only once: a second call fails and leaves `voting_started_at`
    /// untouched.
    pub fn start_voting(&self, room_id: Uuid, requester_id: Uuid) -> Result<(), VotingError> {
        let mut registry = self.registry.lock().unwrap();
        let room = registry
            .find_room_mut(room_id)
            .filter(|r| r.is_active)
            .ok_or(VotingError::NotFound)?;

        if room.organizer_id != requester_id || room.is_voting_active {
            return Err(VotingError::PreconditionFailed);
        }

        room.is_voting_active = true;
        room.voting_started_at = Some(Utc::now());
        info!("Voting started in room {} by user {}", room_id, requester_id);

        Ok(())
    }

    /// Records a vote, replacing any prior vote by the same user for the
    /// same item. Requires an active room in its voting phase and a caller
    /// who is a member.
    pub fn cast_vote(
        &self,
        room_id: Uuid,
        user_id: Uuid,
        item_id: Uuid,
        is_like: bool,
    ) -> Result<(), VotingError> {
        let mut registry = self.registry.lock().unwrap();
        let room = registry
            .find_room(room_id)
            .filter(|r| r.is_active)
            .ok_or(VotingError::NotFound)?;

        if !room.is_voting_active || !room.is_member(user_id) {
            return Err(VotingError::PreconditionFailed);
        }

        registry.add_vote(Vote::new(room_id, user_id, item_id, is_like));
        info!(
            "User {} voted {} for item {} in room {}",
            user_id,
            if is_like { "like" } else { "dislike" },
            item_id,
            room_id
        );

        Ok(())
    }

    /// Tallies the room's like-votes.
    ///
    /// Pure read: a missing or not-yet-started room yields an empty result
    /// rather than an error. Items are ordered by like-count descending;
    /// ties keep the order in which each item received its first like, so
    /// the ordering is stable within a call. Metadata lookups run after the
    /// registry lock is released and degrade to "Unknown" placeholders when
    /// the directory cannot resolve an item.
    pub fn results(&self, room_id: Uuid) -> VotingResults {
        let likes = self.registry.lock().unwrap().votes_for_room(room_id, true);

        let mut first_liked: Vec<Uuid> = Vec::new();
        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        for vote in &likes {
            if !counts.contains_key(&vote.item_id) {
                first_liked.push(vote.item_id);
            }
            *counts.entry(vote.item_id).or_insert(0) += 1;
        }

        let mut liked_items: Vec<VotedItem> = first_liked
            .into_iter()
            .map(|item_id| {
                let summary = self.directory.resolve(item_id);
                if summary.is_none() {
                    debug!("Item {} not resolvable while tallying room {}", item_id, room_id);
                }
                let (name, year, item_type) = match summary {
                    Some(s) => (s.name, s.year, s.item_type),
                    None => (UNKNOWN_ITEM.to_owned(), None, UNKNOWN_ITEM.to_owned()),
                };
                VotedItem {
                    item_id,
                    vote_count: counts[&item_id],
                    name,
                    year,
                    item_type,
                }
            })
            .collect();

        liked_items.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));
        let winner = liked_items.first().cloned();

        VotingResults {
            room_id,
            liked_items,
            winner,
        }
    }

    /// Returns the user's permissions, lazily creating a fully permissive
    /// record on first sight and caching it for the process lifetime.
    pub fn user_permissions(&self, user_id: Uuid) -> UserPermissions {
        *self
            .permissions
            .lock()
            .unwrap()
            .entry(user_id)
            .or_insert_with(|| UserPermissions::permissive(user_id))
    }

    /// Overrides a user's cached permissions. This is the hook a policy
    /// source uses to replace the permissive defaults.
    pub fn set_user_permissions(&self, permissions: UserPermissions) {
        self.permissions
            .lock()
            .unwrap()
            .insert(permissions.user_id, permissions);
    }
}
