/// Account creation for patients and doctors
///
/// Admins have no self-registration path; they are provisioned out of band.
use std::time::Duration;

use sqlx::PgPool;
use validator::Validate;

use crate::db::{self, doctor_repo, patient_repo};
use crate::error::{AuthError, Result};
use crate::models::{Doctor, Patient, RegisterDoctorRequest, RegisterPatientRequest};
use crate::security::password;

pub struct RegistrationService {
    db: PgPool,
    store_timeout: Duration,
}

impl RegistrationService {
    pub fn new(db: PgPool, store_timeout: Duration) -> Self {
        Self { db, store_timeout }
    }

    /// Create a patient account.
    ///
    /// The email and mobile existence checks are a fast pre-check only; the
    /// UNIQUE constraints on the patients table are the authoritative
    /// duplicate signal, so a concurrent duplicate registration still fails
    /// at insert time with the same error.
    pub async fn register_patient(&self, request: RegisterPatientRequest) -> Result<Patient> {
        request.validate()?;

        let existing = db::with_store_timeout(
            self.store_timeout,
            patient_repo::find_by_email(&self.db, &request.email),
        )
        .await?;
        if existing.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let existing = db::with_store_timeout(
            self.store_timeout,
            patient_repo::find_by_mobile(&self.db, &request.mobile),
        )
        .await?;
        if existing.is_some() {
            return Err(AuthError::DuplicateMobile);
        }

        let password_hash = password::hash_password(&request.password)?;

        let patient = db::with_store_timeout(
            self.store_timeout,
            patient_repo::create(
                &self.db,
                &request.email,
                &request.mobile,
                &request.first_name,
                &request.last_name,
                &password_hash,
            ),
        )
        .await?;

        tracing::info!(patient_id = %patient.id, "patient registered");
        Ok(patient)
    }

    /// Create a doctor account in the pending state.
    ///
    /// Pending accounts cannot log in, so the caller must not issue a
    /// session token for the returned record.
    pub async fn register_doctor(&self, request: RegisterDoctorRequest) -> Result<Doctor> {
        request.validate()?;

        let existing = db::with_store_timeout(
            self.store_timeout,
            doctor_repo::find_by_email(&self.db, &request.email),
        )
        .await?;
        if existing.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = password::hash_password(&request.password)?;

        let doctor = db::with_store_timeout(
            self.store_timeout,
            doctor_repo::create(
                &self.db,
                &request.email,
                &request.doctor_name,
                &password_hash,
                &request.qualifications,
                request.experience_years,
                &request.phone,
                &request.city,
                request.department_id,
            ),
        )
        .await?;

        tracing::info!(doctor_id = %doctor.id, "doctor registered, awaiting approval");
        Ok(doctor)
    }
}
