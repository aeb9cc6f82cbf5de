use std::cmp::Ordering;
use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::room::SortPreference;

use super::models::{
    CandidateItem, CandidatePage, CandidateQuery, CollectionEntry, CollectionInfo, ItemSummary,
    LibraryItem,
};
use super::trait_def::ItemDirectory;

/// In-memory [`ItemDirectory`] backing tests and standalone deployments.
///
/// Holds a fixed set of items and collections, optionally loaded from a
/// JSON file at startup. Per-user visibility is a block-list on each entry.
pub struct InMemoryItemDirectory {
    items: Vec<LibraryItem>,
    collections: Vec<CollectionEntry>,
}

#[derive(Deserialize)]
struct LibraryFixture {
    #[serde(default)]
    items: Vec<LibraryItem>,
    #[serde(default)]
    collections: Vec<CollectionEntry>,
}

impl InMemoryItemDirectory {
    pub fn new(items: Vec<LibraryItem>, collections: Vec<CollectionEntry>) -> Self {
        Self { items, collections }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Loads items and collections from a JSON library file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading library file {:?}", path))?;
        let fixture: LibraryFixture = serde_json::from_str(&raw)
            .with_context(|| format!("Error parsing library file {:?}", path))?;
        info!(
            "Loaded {} items and {} collections from {:?}",
            fixture.items.len(),
            fixture.collections.len(),
            path
        );
        Ok(Self::new(fixture.items, fixture.collections))
    }

    fn item_visible(item: &LibraryItem, user_id: Uuid) -> bool {
        !item.blocked_users.contains(&user_id)
    }

    fn matching_items(&self, query: &CandidateQuery, user_id: Uuid) -> Vec<&LibraryItem> {
        self.items
            .iter()
            .filter(|item| Self::item_visible(item, user_id))
            .filter(|item| query.item_types.contains(&item.item_type))
            .filter(|item| {
                query.collections.is_empty()
                    || item.collections.iter().any(|c| query.collections.contains(c))
            })
            .filter(|item| {
                query.genres.is_empty() || item.genres.iter().any(|g| query.genres.contains(g))
            })
            .filter(|item| match (query.max_parental_rating, item.parental_rating) {
                (Some(max), Some(rating)) => rating <= max,
                // Unrated items pass the filter, as does an absent filter.
                _ => true,
            })
            .collect()
    }

    fn sort_items(items: &mut Vec<&LibraryItem>, sort: SortPreference) {
        match sort {
            SortPreference::Random => items.shuffle(&mut rand::rng()),
            SortPreference::Title => {
                items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
            SortPreference::CommunityRating => items.sort_by(|a, b| {
                b.community_rating
                    .partial_cmp(&a.community_rating)
                    .unwrap_or(Ordering::Equal)
            }),
            SortPreference::PremiereDate => {
                items.sort_by(|a, b| b.premiere_date.cmp(&a.premiere_date))
            }
        }
    }
}

impl ItemDirectory for InMemoryItemDirectory {
    fn resolve(&self, item_id: Uuid) -> Option<ItemSummary> {
        self.items
            .iter()
            .find(|item| item.id == item_id)
            .map(LibraryItem::summary)
    }

    fn query_candidates(
        &self,
        query: &CandidateQuery,
        skip: usize,
        limit: usize,
        user_id: Uuid,
    ) -> CandidatePage {
        let mut matches = self.matching_items(query, user_id);
        let total_count = matches.len();
        Self::sort_items(&mut matches, query.sort);

        let items = matches
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(CandidateItem::from)
            .collect();

        CandidatePage {
            items,
            total_count,
            start_index: skip,
        }
    }

    fn is_visible(&self, id: Uuid, user_id: Uuid) -> bool {
        if let Some(item) = self.items.iter().find(|i| i.id == id) {
            return Self::item_visible(item, user_id);
        }
        if let Some(collection) = self.collections.iter().find(|c| c.id == id) {
            return !collection.blocked_users.contains(&user_id);
        }
        false
    }

    fn collections(&self, user_id: Uuid) -> Vec<CollectionInfo> {
        self.collections
            .iter()
            .filter(|c| !c.blocked_users.contains(&user_id))
            .map(|c| CollectionInfo {
                id: c.id,
                name: c.name.clone(),
                kind: c.kind.clone(),
                item_count: self
                    .items
                    .iter()
                    .filter(|i| Self::item_visible(i, user_id))
                    .filter(|i| i.collections.contains(&c.id))
                    .count(),
            })
            .collect()
    }

    fn genres(&self, user_id: Uuid) -> Vec<String> {
        let mut genres: Vec<String> = self
            .items
            .iter()
            .filter(|i| Self::item_visible(i, user_id))
            .flat_map(|i| i.genres.iter().cloned())
            .collect();
        genres.sort();
        genres.dedup();
        genres
    }
}
