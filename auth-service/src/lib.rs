// Auth Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod security;
pub mod services;
pub mod validators;

pub use error::{AuthError, Result};

// Re-export commonly used types
pub use models::{Admin, Doctor, Patient, VerifiedIdentity};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use session_core::{SessionIntrospector, SessionIssuer};
use tower_http::trace::TraceLayer;

use services::{registration::RegistrationService, resolver::IdentityResolver};

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub resolver: Arc<IdentityResolver>,
    pub registration: Arc<RegistrationService>,
    pub issuer: Arc<SessionIssuer>,
    pub introspector: Arc<SessionIntrospector>,
}

/// Build the REST API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Authentication endpoints
        .route("/auth/login", post(handlers::login))
        .route("/auth/register", post(handlers::register))
        .route("/auth/user-role", get(handlers::user_role))
        .route("/auth/logout", post(handlers::logout))
        // Health check
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
