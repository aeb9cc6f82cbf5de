mod coordinator;
pub mod models;
mod registry;

pub use coordinator::{RoomDefaults, VotingCoordinator, VotingError};
pub use models::{
    Room, RoomSpec, SortPreference, UserPermissions, Vote, VotedItem, VotingResults,
};
pub use registry::RoomRegistry;
