/// Session token issuance and introspection
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::claims::{Claims, RoleClaims, RoleDescriptor};

/// Signing algorithm for session tokens. Pinned so a token presenting a
/// different `alg` header is rejected outright.
const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

/// Default session lifetime: 24 hours, no refresh mechanism.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 86_400;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Signature mismatch, malformed payload, claim shape disagreeing with
    /// the role claim, or expiry. One variant: introspection must not be
    /// usable as an oracle for which check failed.
    #[error("invalid or expired session token")]
    Invalid,

    #[error("session token could not be signed")]
    Signing,
}

/// Signing material and lifetime for session tokens.
///
/// Built once at startup from host-service configuration and passed
/// explicitly into [`SessionIssuer`] and [`SessionIntrospector`]. There is no
/// default secret.
#[derive(Clone)]
pub struct SessionConfig {
    secret: String,
    ttl: Duration,
}

impl SessionConfig {
    pub fn new(secret: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn issuer(&self) -> SessionIssuer {
        SessionIssuer {
            encoding_key: EncodingKey::from_secret(self.secret.as_bytes()),
            ttl: self.ttl,
        }
    }

    pub fn introspector(&self) -> SessionIntrospector {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        // Expiry must be deterministic: a token past `exp` always fails.
        validation.leeway = 0;
        SessionIntrospector {
            decoding_key: DecodingKey::from_secret(self.secret.as_bytes()),
            validation,
        }
    }
}

/// Encodes a verified identity into a signed, expiring session token.
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl SessionIssuer {
    /// Mint a token for `subject_id` with the given role-specific claims.
    ///
    /// The envelope role is derived from the claim shape, so issuer callers
    /// cannot produce a token whose role disagrees with its claims.
    pub fn issue(
        &self,
        subject_id: Uuid,
        email: &str,
        scope: RoleClaims,
    ) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject_id.to_string(),
            email: email.to_string(),
            role: scope.role(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            scope,
        };

        encode(&Header::new(SESSION_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|_| SessionError::Signing)
    }
}

/// Decodes and validates a bearer token into a [`RoleDescriptor`].
pub struct SessionIntrospector {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionIntrospector {
    /// Fails closed: bad signature, expiry, a non-UUID subject, and a role
    /// claim that disagrees with the claim shape all map to
    /// [`SessionError::Invalid`] with no partial descriptor.
    pub fn introspect(&self, token: &str) -> Result<RoleDescriptor, SessionError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| SessionError::Invalid)?;
        let claims = data.claims;

        if claims.scope.role() != claims.role {
            return Err(SessionError::Invalid);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| SessionError::Invalid)?;

        Ok(RoleDescriptor {
            user_type: claims.role,
            user_id,
            email: claims.email,
            dashboard_location: claims.role.dashboard_location(),
            scope: claims.scope,
        })
    }
}
