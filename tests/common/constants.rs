//! Shared identifiers for e2e tests.
//!
//! Users authenticate with the passthrough identity source, so a user's
//! token is simply their id rendered as a string.

/// Organizes rooms in most tests.
pub const ORGANIZER_ID: &str = "7b6a3a70-4f3f-4ff5-9c11-3f2f6aa26001";

/// A regular participant.
pub const MEMBER_ID: &str = "9d0a1a84-92a0-4f37-8c67-3f2f6aa26002";

/// Never joins anything.
pub const OUTSIDER_ID: &str = "4fb0e6f0-7d3e-49a2-b2da-3f2f6aa26003";

/// Blocked from the hidden item and the private collection.
pub const RESTRICTED_ID: &str = "c3d94a0e-14b5-4c9e-9a9f-3f2f6aa26004";

// Library fixture ids.
pub const ALIEN_ID: &str = "11111111-1111-4111-8111-111111111111";
pub const AIRPLANE_ID: &str = "22222222-2222-4222-8222-222222222222";
pub const HALLOWEEN_ID: &str = "33333333-3333-4333-8333-333333333333";
pub const HIDDEN_MOVIE_ID: &str = "44444444-4444-4444-8444-444444444444";
pub const SERIES_ID: &str = "55555555-5555-4555-8555-555555555555";

pub const MOVIES_COLLECTION_ID: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa";
pub const PRIVATE_COLLECTION_ID: &str = "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb";

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
