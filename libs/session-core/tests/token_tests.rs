/// Integration tests for session-core token handling
///
/// Covers:
/// - Issue → introspect round-trips for all three roles
/// - Deterministic expiry
/// - Signature tampering and wrong-secret rejection
/// - Role / claim-shape mismatch rejection
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use session_core::{Role, RoleClaims, SessionConfig, SessionError, DEFAULT_SESSION_TTL_SECS};
use uuid::Uuid;

const TEST_SECRET: &str = "test-session-secret-not-for-production";

fn test_config() -> SessionConfig {
    SessionConfig::new(TEST_SECRET, DEFAULT_SESSION_TTL_SECS)
}

fn patient_claims(patient_id: Uuid) -> RoleClaims {
    RoleClaims::Patient {
        patient_id,
        first_name: "Amina".to_string(),
        last_name: "Uwase".to_string(),
        mobile: "+250700000001".to_string(),
    }
}

// ============================================================================
// Round-trip Tests
// ============================================================================

#[test]
fn test_patient_round_trip_preserves_identity() {
    let config = test_config();
    let patient_id = Uuid::new_v4();

    let token = config
        .issuer()
        .issue(patient_id, "amina@example.com", patient_claims(patient_id))
        .expect("should issue patient token");
    assert_eq!(
        token.matches('.').count(),
        2,
        "JWT should have 3 parts separated by dots"
    );

    let descriptor = config
        .introspector()
        .introspect(&token)
        .expect("should introspect freshly issued token");

    assert_eq!(descriptor.user_type, Role::Patient);
    assert_eq!(descriptor.user_id, patient_id);
    assert_eq!(descriptor.email, "amina@example.com");
    assert_eq!(descriptor.dashboard_location, "/patient/dashboard");
    assert!(matches!(
        descriptor.scope,
        RoleClaims::Patient { patient_id: id, .. } if id == patient_id
    ));
}

#[test]
fn test_doctor_round_trip_preserves_identity() {
    let config = test_config();
    let doctor_id = Uuid::new_v4();
    let department_id = Uuid::new_v4();

    let token = config
        .issuer()
        .issue(
            doctor_id,
            "mugisha@example.com",
            RoleClaims::Doctor {
                doctor_id,
                name: "Dr. Mugisha".to_string(),
                department_id: Some(department_id),
            },
        )
        .expect("should issue doctor token");

    let descriptor = config
        .introspector()
        .introspect(&token)
        .expect("should introspect doctor token");

    assert_eq!(descriptor.user_type, Role::Doctor);
    assert_eq!(descriptor.user_id, doctor_id);
    assert_eq!(descriptor.dashboard_location, "/doctor/dashboard");
    assert!(matches!(
        descriptor.scope,
        RoleClaims::Doctor { department_id: Some(id), .. } if id == department_id
    ));
}

#[test]
fn test_admin_round_trip_preserves_identity() {
    let config = test_config();
    let admin_id = Uuid::new_v4();

    let token = config
        .issuer()
        .issue(
            admin_id,
            "ops@example.com",
            RoleClaims::Admin {
                admin_id,
                name: "Grace".to_string(),
                admin_role: "superadmin".to_string(),
            },
        )
        .expect("should issue admin token");

    let descriptor = config
        .introspector()
        .introspect(&token)
        .expect("should introspect admin token");

    assert_eq!(descriptor.user_type, Role::Admin);
    assert_eq!(descriptor.user_id, admin_id);
    assert_eq!(descriptor.dashboard_location, "/admin/dashboard");
    assert!(matches!(
        descriptor.scope,
        RoleClaims::Admin { ref admin_role, .. } if admin_role == "superadmin"
    ));
}

// ============================================================================
// Expiry Tests
// ============================================================================

#[test]
fn test_expired_token_always_fails() {
    let config = SessionConfig::new(TEST_SECRET, -3600);
    let patient_id = Uuid::new_v4();

    let token = config
        .issuer()
        .issue(patient_id, "amina@example.com", patient_claims(patient_id))
        .expect("should sign even when already expired");

    let result = config.introspector().introspect(&token);
    assert!(
        matches!(result, Err(SessionError::Invalid)),
        "expired token must fail regardless of signature validity"
    );
}

// ============================================================================
// Signature Tests
// ============================================================================

#[test]
fn test_tampered_signature_rejected() {
    let config = test_config();
    let patient_id = Uuid::new_v4();

    let token = config
        .issuer()
        .issue(patient_id, "amina@example.com", patient_claims(patient_id))
        .expect("should issue token");

    // Flip the final character of the signature segment.
    let mut tampered = token.clone();
    let last = tampered.pop().expect("token is non-empty");
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    assert!(matches!(
        config.introspector().introspect(&tampered),
        Err(SessionError::Invalid)
    ));
}

#[test]
fn test_wrong_secret_rejected() {
    let patient_id = Uuid::new_v4();
    let token = test_config()
        .issuer()
        .issue(patient_id, "amina@example.com", patient_claims(patient_id))
        .expect("should issue token");

    let other = SessionConfig::new("a-completely-different-secret", DEFAULT_SESSION_TTL_SECS);
    assert!(matches!(
        other.introspector().introspect(&token),
        Err(SessionError::Invalid)
    ));
}

#[test]
fn test_garbage_token_rejected() {
    let introspector = test_config().introspector();
    assert!(matches!(
        introspector.introspect("not-a-token"),
        Err(SessionError::Invalid)
    ));
    assert!(matches!(
        introspector.introspect(""),
        Err(SessionError::Invalid)
    ));
}

// ============================================================================
// Claim Shape Tests
// ============================================================================

#[test]
fn test_role_claim_shape_mismatch_fails_closed() {
    // A token whose `role` says admin but whose claims are patient-shaped,
    // signed with the correct secret.
    let now = chrono::Utc::now().timestamp();
    let payload = json!({
        "sub": Uuid::new_v4().to_string(),
        "email": "amina@example.com",
        "role": "admin",
        "iat": now,
        "exp": now + 3600,
        "patient_id": Uuid::new_v4().to_string(),
        "first_name": "Amina",
        "last_name": "Uwase",
        "mobile": "+250700000001",
    });
    let token = encode(
        &Header::new(Algorithm::HS256),
        &payload,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("should sign crafted payload");

    assert!(
        matches!(
            test_config().introspector().introspect(&token),
            Err(SessionError::Invalid)
        ),
        "claim shape disagreeing with role claim must be rejected"
    );
}

#[test]
fn test_non_uuid_subject_rejected() {
    let now = chrono::Utc::now().timestamp();
    let payload = json!({
        "sub": "42",
        "email": "amina@example.com",
        "role": "patient",
        "iat": now,
        "exp": now + 3600,
        "patient_id": Uuid::new_v4().to_string(),
        "first_name": "Amina",
        "last_name": "Uwase",
        "mobile": "+250700000001",
    });
    let token = encode(
        &Header::new(Algorithm::HS256),
        &payload,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("should sign crafted payload");

    assert!(matches!(
        test_config().introspector().introspect(&token),
        Err(SessionError::Invalid)
    ));
}
