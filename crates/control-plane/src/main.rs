// Spark! Bytes API server
// Decision: PostgreSQL when DATABASE_URL is set, in-memory store otherwise

use anyhow::{Context, Result};
use sparkbytes_control_plane::{
    auth::AuthConfig, build_app, config::ServerConfig, storage::StorageBackend,
};
use sparkbytes_core::telemetry::{init_telemetry, TelemetryConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence
    let _ = dotenvy::dotenv();

    // Configure via environment variables:
    // - RUST_LOG: Log filter (default: "sparkbytes_control_plane=debug,tower_http=debug")
    // - LOG_FORMAT: "json" for structured output
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter =
            Some("sparkbytes_control_plane=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_telemetry(telemetry_config);

    tracing::info!("sparkbytes-control-plane starting...");

    let server_config = ServerConfig::from_env();

    let db = match &server_config.database_url {
        Some(url) => {
            let db = StorageBackend::postgres(url, server_config.database_max_connections)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on exit)");
            StorageBackend::in_memory()
        }
    };

    tracing::info!(dev_mode = db.is_dev_mode(), "Storage ready");

    let auth_config = AuthConfig::from_env();
    tracing::info!(
        algorithm = ?auth_config.jwt.algorithm,
        access_token_lifetime_secs = auth_config.jwt.access_token_lifetime.as_secs(),
        signup_enabled = !auth_config.disable_signup,
        "Authentication configured"
    );

    if !server_config.api_prefix.is_empty() {
        tracing::info!(prefix = %server_config.api_prefix, "API prefix configured");
    }

    let app = build_app(Arc::new(db), auth_config, &server_config);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", server_config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
