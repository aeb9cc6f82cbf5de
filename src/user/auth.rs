use uuid::Uuid;

/// Resolves a presented session token to an opaque user id.
///
/// Identity lives outside this system; the engine only ever sees the id.
pub trait IdentitySource: Send + Sync {
    fn resolve_token(&self, token: &str) -> Option<Uuid>;
}

/// Treats the token itself as the user id.
///
/// This mirrors the permissive defaults elsewhere: good enough for demos
/// and tests, replaced by a real resolver in any deployment that fronts
/// actual authentication.
pub struct PassthroughIdentity;

impl IdentitySource for PassthroughIdentity {
    fn resolve_token(&self, token: &str) -> Option<Uuid> {
        Uuid::parse_str(token).ok()
    }
}
