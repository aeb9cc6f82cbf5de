//! ItemDirectory trait definition.
//!
//! The narrow read-only interface through which the voting engine sees the
//! media catalog. Implementations answer metadata lookups, candidate
//! queries under a room's filters, and per-user visibility checks.

use uuid::Uuid;

use super::models::{CandidatePage, CandidateQuery, CollectionInfo, ItemSummary};

pub trait ItemDirectory: Send + Sync {
    /// Resolve display metadata for a single item. `None` means the item
    /// is unknown to the catalog; callers degrade rather than fail.
    fn resolve(&self, item_id: Uuid) -> Option<ItemSummary>;

    /// Query candidate items under the given filters and sort order,
    /// restricted to what `user_id` may see, with skip/limit pagination.
    /// `total_count` reflects all matches before pagination.
    fn query_candidates(
        &self,
        query: &CandidateQuery,
        skip: usize,
        limit: usize,
        user_id: Uuid,
    ) -> CandidatePage;

    /// Whether the item or collection with this id is visible to the user.
    fn is_visible(&self, id: Uuid, user_id: Uuid) -> bool;

    /// Collections visible to the user, with per-user item counts.
    fn collections(&self, user_id: Uuid) -> Vec<CollectionInfo>;

    /// Distinct genres across items visible to the user, sorted.
    fn genres(&self, user_id: Uuid) -> Vec<String>;
}
