use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Input validation utilities for the auth service

// Compile regex patterns once at startup
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    // E.164-ish: optional leading +, 7 to 15 digits
    Regex::new(r"^\+?[0-9]{7,15}$").expect("hardcoded mobile regex is invalid - fix source code")
});

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Validate mobile number format
pub fn validate_mobile(mobile: &str) -> bool {
    MOBILE_REGEX.is_match(mobile)
}

/// Validate password strength requirements
/// - Minimum 8 characters
/// - At least one uppercase letter
/// - At least one lowercase letter
/// - At least one digit
pub fn validate_password(password: &str) -> bool {
    if password.len() < 8 {
        return false;
    }

    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    has_uppercase && has_lowercase && has_digit
}

/// validator crate compatible custom validator for mobile numbers
pub fn validate_mobile_field(mobile: &str) -> Result<(), ValidationError> {
    if validate_mobile(mobile) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_mobile"))
    }
}

/// validator crate compatible custom validator for password strength
pub fn validate_password_field(password: &str) -> Result<(), ValidationError> {
    if validate_password(password) {
        Ok(())
    } else {
        Err(ValidationError::new("weak_password"))
    }
}
