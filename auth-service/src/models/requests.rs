/// Request bodies for the authentication endpoints
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    // Absent fields default to empty and surface as a 400, not a
    // deserialization error.
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration body, dispatched on the `userType` discriminator.
#[derive(Debug, Deserialize)]
#[serde(tag = "userType", rename_all = "lowercase")]
pub enum RegisterRequest {
    Patient(RegisterPatientRequest),
    Doctor(RegisterDoctorRequest),
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPatientRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "first name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "last name is required"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(email(message = "email address is not valid"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validators::validate_mobile_field"))]
    pub mobile: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validators::validate_password_field"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDoctorRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 150, message = "name is required"))]
    pub doctor_name: String,
    #[serde(default)]
    #[validate(email(message = "email address is not valid"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validators::validate_password_field"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 300, message = "qualifications are required"))]
    pub qualifications: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 80, message = "experience must be 0-80 years"))]
    pub experience_years: i32,
    #[serde(default)]
    #[validate(custom(function = "crate::validators::validate_mobile_field"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,
    pub department_id: Option<Uuid>,
}
