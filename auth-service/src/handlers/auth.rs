/// Authentication handlers
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::json;
use session_core::RoleClaims;
use uuid::Uuid;

use crate::{
    error::{AuthError, Result},
    models::{LoginRequest, RegisterRequest, VerifiedIdentity},
    AppState,
};

/// Login response with the session token and role-derived landing location
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    #[serde(rename = "userType")]
    pub user_type: &'static str,
    #[serde(rename = "dashboardUrl")]
    pub dashboard_url: &'static str,
    pub user: VerifiedIdentity,
}

/// Registration response; token and dashboard are absent for pending doctors
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(rename = "userType")]
    pub user_type: &'static str,
    #[serde(rename = "dashboardUrl")]
    pub dashboard_url: Option<&'static str>,
    pub user: RegisteredUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub email: String,
}

/// Introspection response for downstream authorization
#[derive(Debug, Serialize)]
pub struct UserRoleResponse {
    pub success: bool,
    #[serde(rename = "userType")]
    pub user_type: &'static str,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    #[serde(rename = "dashboardUrl")]
    pub dashboard_url: &'static str,
    #[serde(flatten)]
    pub claims: RoleClaims,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(AuthError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let identity = state.resolver.resolve(email, &payload.password).await?;
    let token = state
        .issuer
        .issue(identity.id(), identity.email(), identity.role_claims())?;

    let role = identity.role();
    Ok(Json(LoginResponse {
        success: true,
        token,
        user_type: role.as_str(),
        dashboard_url: role.dashboard_location(),
        user: identity,
    }))
}

/// Register endpoint handler
///
/// The body is dispatched on `userType`; an unknown discriminator is a 400,
/// not a framework-level deserialization rejection.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse> {
    let request: RegisterRequest = serde_json::from_value(payload)
        .map_err(|_| AuthError::BadRequest("userType must be \"patient\" or \"doctor\"".to_string()))?;

    match request {
        RegisterRequest::Patient(request) => {
            let patient = state.registration.register_patient(request).await?;
            let identity = VerifiedIdentity::Patient(patient);
            let token = state
                .issuer
                .issue(identity.id(), identity.email(), identity.role_claims())?;

            let role = identity.role();
            Ok((
                StatusCode::CREATED,
                Json(RegisterResponse {
                    success: true,
                    user_type: role.as_str(),
                    dashboard_url: Some(role.dashboard_location()),
                    user: RegisteredUser {
                        id: identity.id(),
                        email: identity.email().to_string(),
                    },
                    token: Some(token),
                }),
            ))
        }
        RegisterRequest::Doctor(request) => {
            let doctor = state.registration.register_doctor(request).await?;

            // Pending accounts cannot log in, so no token is issued and
            // there is no dashboard to land on yet.
            Ok((
                StatusCode::CREATED,
                Json(RegisterResponse {
                    success: true,
                    user_type: session_core::Role::Doctor.as_str(),
                    dashboard_url: None,
                    user: RegisteredUser {
                        id: doctor.id,
                        email: doctor.email,
                    },
                    token: None,
                }),
            ))
        }
    }
}

/// Role introspection endpoint handler
pub async fn user_role(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let token = bearer_token(&headers).ok_or(AuthError::InvalidToken)?;
    let descriptor = state.introspector.introspect(token)?;

    Ok(Json(UserRoleResponse {
        success: true,
        user_type: descriptor.user_type.as_str(),
        user_id: descriptor.user_id,
        email: descriptor.email,
        dashboard_url: descriptor.dashboard_location,
        claims: descriptor.scope,
    }))
}

/// Logout endpoint handler
///
/// Sessions are stateless bearer tokens: the server holds nothing to revoke,
/// and the client discards its copy. This is an acknowledgement, not a
/// revocation.
pub async fn logout() -> impl IntoResponse {
    Json(json!({ "success": true }))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
