/// Shared session token library for MediLink services
///
/// Issues and introspects the role-scoped bearer tokens used by every
/// downstream route. Tokens are stateless, signed, expiring JWTs; the server
/// keeps no session state, so logout is a client-side discard.
///
/// ## Security Design
///
/// - **No hardcoded secret**: the signing secret comes from host-service
///   configuration and there is no built-in fallback
/// - **Explicit wiring**: signing material lives in a `SessionConfig` built
///   once at startup and handed to the issuer/introspector, never read from
///   the environment at call time
/// - **Fail-closed introspection**: signature mismatch, expiry, and claim
///   shape mismatch are indistinguishable to callers
mod claims;
mod token;

pub use claims::{Claims, Role, RoleClaims, RoleDescriptor};
pub use token::{
    SessionConfig, SessionError, SessionIntrospector, SessionIssuer, DEFAULT_SESSION_TTL_SECS,
};
