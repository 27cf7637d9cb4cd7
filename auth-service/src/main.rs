/// MediLink Auth Service - Main entry point
/// Unified login, registration, and session introspection for patients,
/// doctors, and administrators.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use auth_service::{
    config::Settings,
    services::{IdentityResolver, RegistrationService},
    AppState,
};
use session_core::SessionConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration; startup fails here when the signing secret is absent
    let settings = Settings::load()?;

    tracing::info!(
        "Starting auth service on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database connection pool
    let db_pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .acquire_timeout(Duration::from_secs(settings.database.acquire_timeout))
        .connect(&settings.database.url)
        .await?;

    tracing::info!("Database connection pool initialized");

    if settings.auth.legacy_doctor_logins {
        tracing::warn!(
            "legacy doctor default passwords are enabled; disable LEGACY_DOCTOR_LOGINS once all doctor rows carry a password hash"
        );
    }

    let session_config = SessionConfig::new(
        settings.session.signing_secret.as_str(),
        settings.session.ttl_secs,
    );
    let store_timeout = Duration::from_secs(settings.auth.store_timeout_secs);

    // Create shared application state
    let state = AppState {
        db: db_pool.clone(),
        resolver: Arc::new(IdentityResolver::with_default_order(
            db_pool.clone(),
            store_timeout,
            settings.auth.legacy_doctor_logins,
        )),
        registration: Arc::new(RegistrationService::new(db_pool, store_timeout)),
        issuer: Arc::new(session_config.issuer()),
        introspector: Arc::new(session_config.introspector()),
    };

    let addr: SocketAddr =
        format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("REST API listening on {}", addr);

    axum::serve(listener, auth_service::router(state)).await?;

    Ok(())
}
