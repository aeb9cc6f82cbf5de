use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::room::{Room, SortPreference};

/// The subset of item metadata a tally needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    pub name: String,
    pub year: Option<i32>,
    pub item_type: String,
}

/// A library entry as the directory knows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryItem {
    pub id: Uuid,
    pub name: String,
    pub item_type: String,
    pub year: Option<i32>,
    pub premiere_date: Option<NaiveDate>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub community_rating: Option<f32>,
    /// Numeric parental rating level, higher meaning more restricted.
    pub parental_rating: Option<u32>,
    /// Display rating such as "PG-13".
    pub official_rating: Option<String>,
    pub overview: Option<String>,
    pub runtime_minutes: Option<u32>,
    /// Collections this item belongs to.
    #[serde(default)]
    pub collections: Vec<Uuid>,
    /// Users this item is hidden from.
    #[serde(default)]
    pub blocked_users: Vec<Uuid>,
}

impl LibraryItem {
    pub fn movie(id: Uuid, name: &str, year: Option<i32>) -> Self {
        LibraryItem {
            id,
            name: name.to_owned(),
            item_type: "Movie".to_owned(),
            year,
            premiere_date: None,
            genres: Vec::new(),
            community_rating: None,
            parental_rating: None,
            official_rating: None,
            overview: None,
            runtime_minutes: None,
            collections: Vec::new(),
            blocked_users: Vec::new(),
        }
    }

    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            name: self.name.clone(),
            year: self.year,
            item_type: self.item_type.clone(),
        }
    }
}

/// A library collection (folder, box set) items can belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub blocked_users: Vec<Uuid>,
}

/// A collection as reported to callers, with its per-user item count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub item_count: usize,
}

/// Filters and ordering for a candidate query, taken from a room's setup.
#[derive(Debug, Clone)]
pub struct CandidateQuery {
    pub item_types: Vec<String>,
    pub collections: Vec<Uuid>,
    pub genres: Vec<String>,
    pub max_parental_rating: Option<u32>,
    pub sort: SortPreference,
}

impl CandidateQuery {
    pub fn for_room(room: &Room) -> Self {
        CandidateQuery {
            item_types: room.item_types().to_vec(),
            collections: room.selected_collections.clone(),
            genres: room.selected_genres().to_vec(),
            max_parental_rating: room.max_parental_rating,
            sort: room.sort_preference,
        }
    }
}

/// A candidate item eligible for voting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: Uuid,
    pub name: String,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub community_rating: Option<f32>,
    pub official_rating: Option<String>,
    pub overview: Option<String>,
    pub runtime_minutes: Option<u32>,
}

impl From<&LibraryItem> for CandidateItem {
    fn from(item: &LibraryItem) -> Self {
        CandidateItem {
            id: item.id,
            name: item.name.clone(),
            year: item.year,
            genres: item.genres.clone(),
            community_rating: item.community_rating,
            official_rating: item.official_rating.clone(),
            overview: item.overview.clone(),
            runtime_minutes: item.runtime_minutes,
        }
    }
}

/// One page of candidates plus the total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePage {
    pub items: Vec<CandidateItem>,
    pub total_count: usize,
    pub start_index: usize,
}

/// A parental rating level offered to room organizers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentalRatingLevel {
    pub value: u32,
    pub name: String,
}
