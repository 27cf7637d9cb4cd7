/// Security module for authentication
/// Provides password hashing and the per-store credential verification
/// policies.
pub mod credential;
pub mod password;

pub use credential::{doctor_policy, CredentialCheck, CredentialPolicy};
pub use password::{hash_password, verify_password};
