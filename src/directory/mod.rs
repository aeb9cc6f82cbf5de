mod in_memory;
pub mod models;
mod trait_def;

pub use in_memory::InMemoryItemDirectory;
pub use models::{
    CandidateItem, CandidatePage, CandidateQuery, CollectionEntry, CollectionInfo, ItemSummary,
    LibraryItem, ParentalRatingLevel,
};
pub use trait_def::ItemDirectory;

/// The parental rating levels offered when configuring a room filter.
pub fn parental_rating_levels() -> Vec<ParentalRatingLevel> {
    [
        (0, "Unrated"),
        (1, "G / All Ages"),
        (6, "PG / 6+"),
        (12, "PG-13 / 12+"),
        (16, "R / 16+"),
        (18, "NC-17 / 18+"),
    ]
    .into_iter()
    .map(|(value, name)| ParentalRatingLevel {
        value,
        name: name.to_owned(),
    })
    .collect()
}
