//! Library fixture data for e2e tests.

use chrono::NaiveDate;
use uuid::Uuid;
use voteroom_server::directory::{CollectionEntry, LibraryItem};

use super::constants::*;

fn id(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("fixture ids are valid uuids")
}

/// A small library: three visible movies, one movie hidden from the
/// restricted user, and one series, spread over two collections.
pub fn create_test_library() -> (Vec<LibraryItem>, Vec<CollectionEntry>) {
    let movies_collection = id(MOVIES_COLLECTION_ID);
    let private_collection = id(PRIVATE_COLLECTION_ID);

    let mut alien = LibraryItem::movie(id(ALIEN_ID), "Alien", Some(1979));
    alien.genres = vec!["Horror".to_owned(), "SciFi".to_owned()];
    alien.community_rating = Some(8.5);
    alien.parental_rating = Some(16);
    alien.official_rating = Some("R".to_owned());
    alien.premiere_date = NaiveDate::from_ymd_opt(1979, 5, 25);
    alien.runtime_minutes = Some(117);
    alien.collections = vec![movies_collection];

    let mut airplane = LibraryItem::movie(id(AIRPLANE_ID), "Airplane!", Some(1980));
    airplane.genres = vec!["Comedy".to_owned()];
    airplane.community_rating = Some(7.7);
    airplane.parental_rating = Some(12);
    airplane.official_rating = Some("PG".to_owned());
    airplane.premiere_date = NaiveDate::from_ymd_opt(1980, 7, 2);
    airplane.runtime_minutes = Some(88);
    airplane.collections = vec![movies_collection];

    let mut halloween = LibraryItem::movie(id(HALLOWEEN_ID), "Halloween", Some(1978));
    halloween.genres = vec!["Horror".to_owned()];
    halloween.community_rating = Some(7.5);
    halloween.parental_rating = Some(16);
    halloween.official_rating = Some("R".to_owned());
    halloween.premiere_date = NaiveDate::from_ymd_opt(1978, 10, 25);
    halloween.runtime_minutes = Some(91);
    halloween.collections = vec![movies_collection];

    let mut hidden = LibraryItem::movie(id(HIDDEN_MOVIE_ID), "Hidden Gem", Some(2001));
    hidden.genres = vec!["Drama".to_owned()];
    hidden.collections = vec![private_collection];
    hidden.blocked_users = vec![id(RESTRICTED_ID)];

    let mut series = LibraryItem::movie(id(SERIES_ID), "The Wire", Some(2002));
    series.item_type = "Series".to_owned();
    series.genres = vec!["Drama".to_owned()];
    series.community_rating = Some(9.3);

    let collections = vec![
        CollectionEntry {
            id: movies_collection,
            name: "Movies".to_owned(),
            kind: "movies".to_owned(),
            blocked_users: Vec::new(),
        },
        CollectionEntry {
            id: private_collection,
            name: "Private Stash".to_owned(),
            kind: "boxset".to_owned(),
            blocked_users: vec![id(RESTRICTED_ID)],
        },
    ];

    (vec![alien, airplane, halloween, hidden, series], collections)
}
