mod admin;
mod doctor;
mod patient;
mod requests;

pub use admin::Admin;
pub use doctor::Doctor;
pub use patient::Patient;
pub use requests::{LoginRequest, RegisterDoctorRequest, RegisterPatientRequest, RegisterRequest};

use serde::Serialize;
use session_core::{Role, RoleClaims};
use uuid::Uuid;

/// A credential-verified identity together with its role tag.
///
/// Produced by the identity resolver; everything downstream (token issuance,
/// response shaping) works from this.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum VerifiedIdentity {
    Patient(Patient),
    Doctor(Doctor),
    Admin(Admin),
}

impl VerifiedIdentity {
    pub fn role(&self) -> Role {
        match self {
            VerifiedIdentity::Patient(_) => Role::Patient,
            VerifiedIdentity::Doctor(_) => Role::Doctor,
            VerifiedIdentity::Admin(_) => Role::Admin,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            VerifiedIdentity::Patient(p) => p.id,
            VerifiedIdentity::Doctor(d) => d.id,
            VerifiedIdentity::Admin(a) => a.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            VerifiedIdentity::Patient(p) => &p.email,
            VerifiedIdentity::Doctor(d) => &d.email,
            VerifiedIdentity::Admin(a) => &a.email,
        }
    }

    /// Role-specific claims for the session token.
    pub fn role_claims(&self) -> RoleClaims {
        match self {
            VerifiedIdentity::Patient(p) => RoleClaims::Patient {
                patient_id: p.id,
                first_name: p.first_name.clone(),
                last_name: p.last_name.clone(),
                mobile: p.mobile.clone(),
            },
            VerifiedIdentity::Doctor(d) => RoleClaims::Doctor {
                doctor_id: d.id,
                name: d.doctor_name.clone(),
                department_id: d.department_id,
            },
            VerifiedIdentity::Admin(a) => RoleClaims::Admin {
                admin_id: a.id,
                name: a.name.clone(),
                admin_role: a.admin_role.clone(),
            },
        }
    }
}
