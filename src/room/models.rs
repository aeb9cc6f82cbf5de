use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_TIME_LIMIT_MINUTES: i64 = 1;
pub const MAX_TIME_LIMIT_MINUTES: i64 = 120;

const DEFAULT_ITEM_TYPE: &str = "Movie";

/// How candidate items are ordered before voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortPreference {
    Random,
    Title,
    CommunityRating,
    PremiereDate,
}

impl SortPreference {
    /// Case-insensitive parse, falling back to `Random` on anything
    /// unrecognized.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "title" => SortPreference::Title,
            "communityrating" => SortPreference::CommunityRating,
            "premieredate" => SortPreference::PremiereDate,
            _ => SortPreference::Random,
        }
    }
}

impl Default for SortPreference {
    fn default() -> Self {
        SortPreference::Random
    }
}

/// A voting room tied to a group of participating users.
///
/// Membership, the time limit, genre and item-type filters are kept behind
/// accessors so their invariants hold no matter who mutates the room: the
/// member list stays unique and insertion-ordered, the time limit stays
/// within [1, 120] minutes and the item-type filter is never empty.
#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    /// Opaque reference correlating this room to an external playback group.
    pub playback_group_ref: Option<String>,
    pub organizer_id: Uuid,
    members: Vec<Uuid>,
    pub is_active: bool,
    pub is_voting_active: bool,
    time_limit_minutes: i64,
    pub sort_preference: SortPreference,
    pub selected_collections: Vec<Uuid>,
    selected_genres: Vec<String>,
    pub max_parental_rating: Option<u32>,
    item_types: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub voting_started_at: Option<DateTime<Utc>>,
}

impl Room {
    pub fn new(organizer_id: Uuid, name: String) -> Self {
        Room {
            id: Uuid::new_v4(),
            name,
            playback_group_ref: None,
            organizer_id,
            members: vec![organizer_id],
            is_active: true,
            is_voting_active: false,
            time_limit_minutes: 5,
            sort_preference: SortPreference::default(),
            selected_collections: Vec::new(),
            selected_genres: Vec::new(),
            max_parental_rating: None,
            item_types: vec![DEFAULT_ITEM_TYPE.to_owned()],
            created_at: Utc::now(),
            voting_started_at: None,
        }
    }

    pub fn members(&self) -> &[Uuid] {
        &self.members
    }

    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    /// Adds a member, returning false if the user already joined.
    pub fn add_member(&mut self, user_id: Uuid) -> bool {
        if self.members.contains(&user_id) {
            return false;
        }
        self.members.push(user_id);
        true
    }

    pub fn remove_member(&mut self, user_id: Uuid) -> bool {
        let before = self.members.len();
        self.members.retain(|m| *m != user_id);
        self.members.len() != before
    }

    pub fn time_limit_minutes(&self) -> i64 {
        self.time_limit_minutes
    }

    /// Clamps into [1, 120] minutes on every assignment.
    pub fn set_time_limit_minutes(&mut self, minutes: i64) {
        self.time_limit_minutes = minutes.clamp(MIN_TIME_LIMIT_MINUTES, MAX_TIME_LIMIT_MINUTES);
    }

    pub fn selected_genres(&self) -> &[String] {
        &self.selected_genres
    }

    /// Replaces the genre filter, dropping blank entries.
    pub fn set_selected_genres<I: IntoIterator<Item = String>>(&mut self, genres: I) {
        self.selected_genres = genres
            .into_iter()
            .filter(|g| !g.trim().is_empty())
            .collect();
    }

    pub fn item_types(&self) -> &[String] {
        &self.item_types
    }

    /// Replaces the item-type filter, dropping blank entries. An empty
    /// result falls back to the Movie-only filter.
    pub fn set_item_types<I: IntoIterator<Item = String>>(&mut self, types: I) {
        self.item_types = types.into_iter().filter(|t| !t.trim().is_empty()).collect();
        if self.item_types.is_empty() {
            self.item_types.push(DEFAULT_ITEM_TYPE.to_owned());
        }
    }
}

/// A single user's vote on an item within a room.
#[derive(Debug, Clone, Serialize)]
pub struct Vote {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub item_id: Uuid,
    pub is_like: bool,
    pub voted_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(room_id: Uuid, user_id: Uuid, item_id: Uuid, is_like: bool) -> Self {
        Vote {
            id: Uuid::new_v4(),
            room_id,
            user_id,
            item_id,
            is_like,
            voted_at: Utc::now(),
        }
    }
}

/// What a user is allowed to do with voting rooms.
///
/// Defaults are fully permissive; a deployment wires a real policy source
/// through `VotingCoordinator::set_user_permissions`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserPermissions {
    pub user_id: Uuid,
    pub can_organize: bool,
    pub can_vote: bool,
}

impl UserPermissions {
    pub fn permissive(user_id: Uuid) -> Self {
        UserPermissions {
            user_id,
            can_organize: true,
            can_vote: true,
        }
    }
}

/// Caller-supplied fields for creating a room. Missing time limit and sort
/// order fall back to the coordinator's configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    pub playback_group_ref: Option<String>,
    pub time_limit: Option<i64>,
    pub sort_by: Option<String>,
    #[serde(default)]
    pub selected_collections: Vec<Uuid>,
    #[serde(default)]
    pub selected_genres: Vec<String>,
    pub max_parental_rating: Option<u32>,
    #[serde(default)]
    pub item_types: Vec<String>,
}

/// An item together with its like-count in a tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotedItem {
    pub item_id: Uuid,
    pub vote_count: usize,
    pub name: String,
    pub year: Option<i32>,
    pub item_type: String,
}

/// The outcome of tallying a room's like-votes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingResults {
    pub room_id: Uuid,
    pub liked_items: Vec<VotedItem>,
    pub winner: Option<VotedItem>,
}
