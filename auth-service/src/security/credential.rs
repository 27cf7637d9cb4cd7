/// Credential verification policies
///
/// Each identity store verifies submitted passwords under its own policy.
/// The policies are a closed set selected from the stored credential shape,
/// not inline conditionals scattered through the resolver.
use super::password;

/// Legacy default passwords accepted for doctor rows that predate hashed
/// credentials. Migration shim behind the `legacy_doctor_logins` setting;
/// remove once every doctor row carries a password hash.
pub const LEGACY_DOCTOR_PASSWORDS: [&str; 2] = ["doctor123", "password123"];

/// Outcome of checking a submitted password against a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCheck {
    Match,
    NoMatch,
    /// No verification policy applies to the stored credential shape (e.g. a
    /// hashless doctor row with the legacy shim disabled). Distinct from a
    /// wrong password, but treated the same by the resolver: fall through.
    Indeterminate,
}

/// Closed set of verification strategies.
#[derive(Debug, Clone, Copy)]
pub enum CredentialPolicy<'a> {
    /// Argon2 verification against a stored PHC-format hash. A malformed
    /// hash is `NoMatch`, never an error.
    Hashed { hash: &'a str },
    /// Exact match against the fixed legacy doctor allow-list.
    LegacyAllowlist,
}

impl CredentialPolicy<'_> {
    /// Never logs the submitted password and never errors.
    pub fn verify(&self, password: &str) -> CredentialCheck {
        let matched = match self {
            CredentialPolicy::Hashed { hash } => password::verify_password(password, hash),
            CredentialPolicy::LegacyAllowlist => {
                LEGACY_DOCTOR_PASSWORDS.iter().any(|p| *p == password)
            }
        };

        if matched {
            CredentialCheck::Match
        } else {
            CredentialCheck::NoMatch
        }
    }
}

/// Policy for a doctor credential: hashed when a hash is stored, the legacy
/// allow-list when the hash is absent and the shim is enabled, otherwise no
/// policy applies.
pub fn doctor_policy(
    password_hash: Option<&str>,
    legacy_logins: bool,
) -> Option<CredentialPolicy<'_>> {
    match password_hash {
        Some(hash) => Some(CredentialPolicy::Hashed { hash }),
        None if legacy_logins => Some(CredentialPolicy::LegacyAllowlist),
        None => None,
    }
}
