/// Claim structures carried by session tokens
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role encoded in every session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }

    /// Landing location for the role's dashboard. Pure function of role.
    pub fn dashboard_location(&self) -> &'static str {
        match self {
            Role::Patient => "/patient/dashboard",
            Role::Doctor => "/doctor/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role-specific claims merged into the common token envelope.
///
/// Untagged on the wire: the three variants have disjoint field sets (keyed
/// by `patient_id` / `doctor_id` / `admin_id`), and the envelope's `role`
/// claim is the authority: introspection rejects a token whose claim shape
/// disagrees with its role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleClaims {
    Patient {
        patient_id: Uuid,
        first_name: String,
        last_name: String,
        mobile: String,
    },
    Doctor {
        doctor_id: Uuid,
        name: String,
        department_id: Option<Uuid>,
    },
    Admin {
        admin_id: Uuid,
        name: String,
        admin_role: String,
    },
}

impl RoleClaims {
    pub fn role(&self) -> Role {
        match self {
            RoleClaims::Patient { .. } => Role::Patient,
            RoleClaims::Doctor { .. } => Role::Doctor,
            RoleClaims::Admin { .. } => Role::Admin,
        }
    }
}

/// Full token payload: common envelope plus role-specific claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID as UUID string)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Account role
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(flatten)]
    pub scope: RoleClaims,
}

/// Decoded, validated view of a session token, used by downstream routes for
/// authorization decisions.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDescriptor {
    pub user_type: Role,
    pub user_id: Uuid,
    pub email: String,
    pub dashboard_location: &'static str,
    pub scope: RoleClaims,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Patient).unwrap(), "\"patient\"");
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"doctor\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn dashboard_location_is_pure_per_role() {
        assert_eq!(Role::Patient.dashboard_location(), "/patient/dashboard");
        assert_eq!(Role::Doctor.dashboard_location(), "/doctor/dashboard");
        assert_eq!(Role::Admin.dashboard_location(), "/admin/dashboard");
    }

    #[test]
    fn role_claims_round_trip_stays_in_variant() {
        let claims = RoleClaims::Doctor {
            doctor_id: Uuid::new_v4(),
            name: "Dr. Mugisha".to_string(),
            department_id: None,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: RoleClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role(), Role::Doctor);
        assert_eq!(back, claims);
    }
}
