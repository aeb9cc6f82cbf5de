pub mod auth;

pub use auth::{IdentitySource, PassthroughIdentity};
