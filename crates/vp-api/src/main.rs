//! Veriport API binary.
//!
//! Development wiring: in-memory record adapters behind the real pipeline
//! and storage backends. A deployment replaces the record adapters with
//! database-backed ones through [`ApiService::new`].

use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vp_api::{ApiConfig, ApiService, StorageBackendKind};
use vp_records::{InMemoryAuditLog, InMemoryKycRecords, InMemoryUserRecords};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    info!(
        version = vp_api::VERSION,
        addr = %config.http_addr(),
        backend = ?config.storage.backend,
        "Starting Veriport API"
    );

    let mut service = ApiService::new(
        config,
        Arc::new(InMemoryUserRecords::new()),
        Arc::new(InMemoryKycRecords::new()),
        Arc::new(InMemoryAuditLog::new()),
    )
    .context("failed to initialize service")?;

    tokio::select! {
        result = service.start() => {
            result.context("server terminated with error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
        }
    }
    service.shutdown();

    Ok(())
}

/// Defaults overridden by `VP_*` environment variables.
fn load_config() -> anyhow::Result<ApiConfig> {
    let mut config = ApiConfig::default();

    if let Ok(port) = std::env::var("VP_HTTP_PORT") {
        config.http.port = port.parse().context("invalid VP_HTTP_PORT")?;
    }
    if let Ok(dir) = std::env::var("VP_UPLOAD_DIR") {
        config.storage.local_root = dir.into();
    }
    if let Ok(max) = std::env::var("VP_MAX_UPLOAD_BYTES") {
        config.limits.max_upload_bytes = max.parse().context("invalid VP_MAX_UPLOAD_BYTES")?;
    }
    if let Ok(url) = std::env::var("VP_OBJECT_STORE_URL") {
        config.storage.backend = StorageBackendKind::Remote;
        config.storage.remote_endpoint = Some(url);
    }
    // token=identity pairs, comma separated
    if let Ok(tokens) = std::env::var("VP_API_TOKENS") {
        for pair in tokens.split(',') {
            if let Some((token, identity)) = pair.split_once('=') {
                config
                    .auth
                    .tokens
                    .insert(token.trim().to_string(), identity.trim().to_string());
            }
        }
    }

    Ok(config)
}
