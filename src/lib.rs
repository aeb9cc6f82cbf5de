//! Voteroom Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod directory;
pub mod playback;
pub mod room;
pub mod server;
pub mod user;

// Re-export commonly used types for convenience
pub use directory::{InMemoryItemDirectory, ItemDirectory};
pub use playback::{LoggingPlaybackHandoff, PlaybackHandoff};
pub use room::{RoomDefaults, RoomRegistry, VotingCoordinator, VotingError};
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};
pub use user::{IdentitySource, PassthroughIdentity};
