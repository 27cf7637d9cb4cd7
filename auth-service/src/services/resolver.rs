/// Ordered identity resolution across the three identity stores
///
/// Login does not know in advance which store a credential belongs to. The
/// resolver walks a fixed provider order (patient, then doctor, then admin)
/// and stops at the first verified match. The order is part of the
/// authentication contract: the same email may legitimately exist in more
/// than one store, and the order is the deterministic tie-breaker.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use session_core::Role;
use sqlx::PgPool;

use crate::db::{self, admin_repo, doctor_repo, patient_repo};
use crate::error::{AuthError, Result};
use crate::models::{Admin, Doctor, Patient, VerifiedIdentity};
use crate::security::credential::{doctor_policy, CredentialCheck, CredentialPolicy};

/// One identity store's slice of the login decision.
///
/// `Ok(None)` means "no verified match here, try the next store". Errors
/// abort the whole resolution: store failures, and the two intentional
/// disclosure exceptions (pending doctor, deactivated admin).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn role(&self) -> Role;

    async fn try_resolve(&self, email: &str, password: &str)
        -> Result<Option<VerifiedIdentity>>;
}

pub struct IdentityResolver {
    providers: Vec<Arc<dyn IdentityProvider>>,
}

impl IdentityResolver {
    /// Resolver over an explicit provider order. The order is part of the
    /// authentication contract; production wiring goes through
    /// [`IdentityResolver::with_default_order`].
    pub fn new(providers: Vec<Arc<dyn IdentityProvider>>) -> Self {
        Self { providers }
    }

    /// Patient, then doctor, then admin.
    pub fn with_default_order(
        db: PgPool,
        store_timeout: Duration,
        legacy_doctor_logins: bool,
    ) -> Self {
        Self::new(vec![
            Arc::new(PatientProvider::new(db.clone(), store_timeout)),
            Arc::new(DoctorProvider::new(
                db.clone(),
                store_timeout,
                legacy_doctor_logins,
            )),
            Arc::new(AdminProvider::new(db, store_timeout)),
        ])
    }

    /// Resolve `(email, password)` to a verified identity.
    ///
    /// Every failure short of the two disclosure exceptions collapses into
    /// the same `InvalidCredentials`: no externally observable signal says
    /// whether the email existed or in which store.
    pub async fn resolve(&self, email: &str, password: &str) -> Result<VerifiedIdentity> {
        for provider in &self.providers {
            match provider.try_resolve(email, password).await? {
                Some(identity) => {
                    tracing::info!(
                        role = %identity.role(),
                        email = %mask_email(identity.email()),
                        "login resolved"
                    );
                    return Ok(identity);
                }
                None => {
                    tracing::trace!(store = %provider.role(), "no verified match, continuing");
                }
            }
        }

        Err(AuthError::InvalidCredentials)
    }
}

/// Patient store: hashed credentials only.
pub struct PatientProvider {
    db: PgPool,
    store_timeout: Duration,
}

impl PatientProvider {
    pub fn new(db: PgPool, store_timeout: Duration) -> Self {
        Self { db, store_timeout }
    }

    /// Match decision over an already-fetched row.
    pub fn evaluate(patient: Patient, password: &str) -> Option<VerifiedIdentity> {
        let policy = CredentialPolicy::Hashed {
            hash: &patient.password_hash,
        };
        match policy.verify(password) {
            CredentialCheck::Match => Some(VerifiedIdentity::Patient(patient)),
            CredentialCheck::NoMatch | CredentialCheck::Indeterminate => None,
        }
    }
}

#[async_trait]
impl IdentityProvider for PatientProvider {
    fn role(&self) -> Role {
        Role::Patient
    }

    async fn try_resolve(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<VerifiedIdentity>> {
        let patient = db::with_store_timeout(
            self.store_timeout,
            patient_repo::find_by_email(&self.db, email),
        )
        .await?;

        Ok(patient.and_then(|p| Self::evaluate(p, password)))
    }
}

/// Doctor store: hashed credentials, or the legacy allow-list for hashless
/// rows when the migration shim is enabled.
pub struct DoctorProvider {
    db: PgPool,
    store_timeout: Duration,
    legacy_logins: bool,
}

impl DoctorProvider {
    pub fn new(db: PgPool, store_timeout: Duration, legacy_logins: bool) -> Self {
        Self {
            db,
            store_timeout,
            legacy_logins,
        }
    }

    /// Match decision over an already-fetched row.
    ///
    /// A pending doctor fails the whole login regardless of the submitted
    /// password. This reveals account existence on purpose, matching the
    /// platform's enrollment flow.
    pub fn evaluate(
        doctor: Doctor,
        password: &str,
        legacy_logins: bool,
    ) -> Result<Option<VerifiedIdentity>> {
        if doctor.is_pending() {
            return Err(AuthError::PendingApproval);
        }

        let check = match doctor_policy(doctor.password_hash.as_deref(), legacy_logins) {
            Some(policy) => policy.verify(password),
            None => CredentialCheck::Indeterminate,
        };

        match check {
            CredentialCheck::Match => Ok(Some(VerifiedIdentity::Doctor(doctor))),
            CredentialCheck::NoMatch | CredentialCheck::Indeterminate => Ok(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for DoctorProvider {
    fn role(&self) -> Role {
        Role::Doctor
    }

    async fn try_resolve(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<VerifiedIdentity>> {
        let doctor = db::with_store_timeout(
            self.store_timeout,
            doctor_repo::find_by_email(&self.db, email),
        )
        .await?;

        match doctor {
            Some(d) => Self::evaluate(d, password, self.legacy_logins),
            None => Ok(None),
        }
    }
}

/// Admin store: hashed credentials, active accounts only.
pub struct AdminProvider {
    db: PgPool,
    store_timeout: Duration,
}

impl AdminProvider {
    pub fn new(db: PgPool, store_timeout: Duration) -> Self {
        Self { db, store_timeout }
    }

    /// Match decision over an already-fetched row.
    ///
    /// Deactivation is only disclosed after the credential matched; a wrong
    /// password on a deactivated account stays indistinguishable from any
    /// other failed login.
    pub fn evaluate(admin: Admin, password: &str) -> Result<Option<VerifiedIdentity>> {
        let policy = CredentialPolicy::Hashed {
            hash: &admin.password_hash,
        };
        match policy.verify(password) {
            CredentialCheck::Match if !admin.is_active => Err(AuthError::AccountDeactivated),
            CredentialCheck::Match => Ok(Some(VerifiedIdentity::Admin(admin))),
            CredentialCheck::NoMatch | CredentialCheck::Indeterminate => Ok(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for AdminProvider {
    fn role(&self) -> Role {
        Role::Admin
    }

    async fn try_resolve(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<VerifiedIdentity>> {
        let admin = db::with_store_timeout(
            self.store_timeout,
            admin_repo::find_by_email(&self.db, email),
        )
        .await?;

        match admin {
            Some(a) => Self::evaluate(a, password),
            None => Ok(None),
        }
    }
}

/// Mask an email address for logging: keep the first character of the local
/// part and the domain.
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let head = local.chars().next().unwrap_or('*');
            format!("{}***@{}", head, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::password::hash_password;
    use chrono::Utc;
    use uuid::Uuid;

    fn patient_fixture(password: &str) -> Patient {
        Patient {
            id: Uuid::new_v4(),
            email: "amina@example.com".to_string(),
            mobile: "+250700000001".to_string(),
            first_name: "Amina".to_string(),
            last_name: "Uwase".to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn doctor_fixture(password_hash: Option<String>, is_approved: bool) -> Doctor {
        Doctor {
            id: Uuid::new_v4(),
            email: "mugisha@example.com".to_string(),
            doctor_name: "Dr. Mugisha".to_string(),
            password_hash,
            qualifications: "MBBS".to_string(),
            experience_years: 6,
            phone: "+250788111222".to_string(),
            city: "Kigali".to_string(),
            department_id: None,
            is_approved,
            is_available: is_approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn admin_fixture(password: &str, is_active: bool) -> Admin {
        Admin {
            id: Uuid::new_v4(),
            email: "ops@example.com".to_string(),
            name: "Grace".to_string(),
            password_hash: hash_password(password).unwrap(),
            admin_role: "admin".to_string(),
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_patient_evaluate_match() {
        let patient = patient_fixture("SecurePass123");
        let resolved = PatientProvider::evaluate(patient, "SecurePass123");
        assert!(matches!(resolved, Some(VerifiedIdentity::Patient(_))));
    }

    #[test]
    fn test_patient_evaluate_wrong_password_falls_through() {
        let patient = patient_fixture("SecurePass123");
        assert!(PatientProvider::evaluate(patient, "WrongPass123").is_none());
    }

    #[test]
    fn test_pending_doctor_fails_regardless_of_password() {
        let hash = hash_password("SecurePass123").unwrap();
        let doctor = doctor_fixture(Some(hash), false);
        let result = DoctorProvider::evaluate(doctor.clone(), "SecurePass123", false);
        assert!(matches!(result, Err(AuthError::PendingApproval)));

        let result = DoctorProvider::evaluate(doctor, "WrongPass123", false);
        assert!(matches!(result, Err(AuthError::PendingApproval)));
    }

    #[test]
    fn test_approved_doctor_with_hash() {
        let hash = hash_password("SecurePass123").unwrap();
        let doctor = doctor_fixture(Some(hash), true);
        let resolved = DoctorProvider::evaluate(doctor, "SecurePass123", false).unwrap();
        assert!(matches!(resolved, Some(VerifiedIdentity::Doctor(_))));
    }

    #[test]
    fn test_hashless_doctor_legacy_shim_enabled() {
        let doctor = doctor_fixture(None, true);
        let resolved = DoctorProvider::evaluate(doctor, "doctor123", true).unwrap();
        assert!(matches!(resolved, Some(VerifiedIdentity::Doctor(_))));
    }

    #[test]
    fn test_hashless_doctor_legacy_shim_disabled_falls_through() {
        let doctor = doctor_fixture(None, false);
        let resolved = DoctorProvider::evaluate(doctor, "doctor123", false).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn test_active_admin_match() {
        let admin = admin_fixture("SecurePass123", true);
        let resolved = AdminProvider::evaluate(admin, "SecurePass123").unwrap();
        assert!(matches!(resolved, Some(VerifiedIdentity::Admin(_))));
    }

    #[test]
    fn test_deactivated_admin_fails_only_after_credential_match() {
        let admin = admin_fixture("SecurePass123", false);
        let result = AdminProvider::evaluate(admin.clone(), "SecurePass123");
        assert!(matches!(result, Err(AuthError::AccountDeactivated)));

        // Wrong password on a deactivated account stays generic.
        let result = AdminProvider::evaluate(admin, "WrongPass123");
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_mask_email_keeps_domain_only() {
        assert_eq!(mask_email("amina@example.com"), "a***@example.com");
        assert_eq!(mask_email("no-at-sign"), "***");
    }

    // ------------------------------------------------------------------
    // Resolver order tests with in-memory providers
    // ------------------------------------------------------------------

    struct StaticProvider {
        role: Role,
        outcome: fn() -> Result<Option<VerifiedIdentity>>,
    }

    #[async_trait]
    impl IdentityProvider for StaticProvider {
        fn role(&self) -> Role {
            self.role
        }

        async fn try_resolve(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<Option<VerifiedIdentity>> {
            (self.outcome)()
        }
    }

    fn some_patient() -> Result<Option<VerifiedIdentity>> {
        Ok(Some(VerifiedIdentity::Patient(patient_fixture(
            "SecurePass123",
        ))))
    }

    fn some_admin() -> Result<Option<VerifiedIdentity>> {
        Ok(Some(VerifiedIdentity::Admin(admin_fixture(
            "SecurePass123",
            true,
        ))))
    }

    fn nothing() -> Result<Option<VerifiedIdentity>> {
        Ok(None)
    }

    fn pending() -> Result<Option<VerifiedIdentity>> {
        Err(AuthError::PendingApproval)
    }

    #[tokio::test]
    async fn test_resolver_returns_first_match_in_order() {
        let resolver = IdentityResolver::new(vec![
            Arc::new(StaticProvider {
                role: Role::Patient,
                outcome: some_patient,
            }),
            Arc::new(StaticProvider {
                role: Role::Admin,
                outcome: some_admin,
            }),
        ]);

        let identity = resolver.resolve("amina@example.com", "pw").await.unwrap();
        assert_eq!(identity.role(), Role::Patient);
    }

    #[tokio::test]
    async fn test_resolver_falls_through_to_later_providers() {
        let resolver = IdentityResolver::new(vec![
            Arc::new(StaticProvider {
                role: Role::Patient,
                outcome: nothing,
            }),
            Arc::new(StaticProvider {
                role: Role::Doctor,
                outcome: nothing,
            }),
            Arc::new(StaticProvider {
                role: Role::Admin,
                outcome: some_admin,
            }),
        ]);

        let identity = resolver.resolve("ops@example.com", "pw").await.unwrap();
        assert_eq!(identity.role(), Role::Admin);
    }

    #[tokio::test]
    async fn test_resolver_propagates_provider_errors() {
        let resolver = IdentityResolver::new(vec![
            Arc::new(StaticProvider {
                role: Role::Patient,
                outcome: nothing,
            }),
            Arc::new(StaticProvider {
                role: Role::Doctor,
                outcome: pending,
            }),
            Arc::new(StaticProvider {
                role: Role::Admin,
                outcome: some_admin,
            }),
        ]);

        let result = resolver.resolve("mugisha@example.com", "pw").await;
        assert!(matches!(result, Err(AuthError::PendingApproval)));
    }

    #[tokio::test]
    async fn test_resolver_collapses_exhaustion_into_invalid_credentials() {
        let resolver = IdentityResolver::new(vec![
            Arc::new(StaticProvider {
                role: Role::Patient,
                outcome: nothing,
            }),
            Arc::new(StaticProvider {
                role: Role::Doctor,
                outcome: nothing,
            }),
            Arc::new(StaticProvider {
                role: Role::Admin,
                outcome: nothing,
            }),
        ]);

        let result = resolver.resolve("nobody@example.com", "pw").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
