//! Service wiring and lifecycle.
//!
//! `ApiService` owns the adapter selection: it turns the configuration into
//! a concrete media store, builds the pipeline, and runs the HTTP server
//! until shutdown. Record adapters are injected by the caller, so the same
//! wiring serves the in-memory development setup and a database-backed
//! deployment.

use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info};
use vp_media_store::{HttpObjectStore, LocalDiskStore, MediaStore, StoreConstraints};
use vp_records::{AuditLog, KycRecords, UserRecords};

use crate::domain::config::{ApiConfig, StorageBackendKind};
use crate::domain::error::ServiceError;
use crate::middleware::auth::{IdentityVerifier, StaticTokenVerifier};
use crate::pipeline::{AssetPipeline, AuditEmitter};
use crate::router::{build_router, AppState};

/// The HTTP service.
pub struct ApiService {
    config: ApiConfig,
    pipeline: Arc<AssetPipeline>,
    verifier: Arc<dyn IdentityVerifier>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiService {
    /// Validate the configuration and wire the pipeline.
    pub fn new(
        config: ApiConfig,
        users: Arc<dyn UserRecords>,
        kyc: Arc<dyn KycRecords>,
        audit: Arc<dyn AuditLog>,
    ) -> Result<Self, ServiceError> {
        config.validate()?;

        let media = build_media_store(&config)?;
        let constraints = StoreConstraints {
            max_bytes: config.limits.max_upload_bytes,
            ..StoreConstraints::default()
        };

        let pipeline = Arc::new(AssetPipeline::new(
            media,
            users,
            kyc,
            AuditEmitter::new(audit),
            constraints,
        ));

        let verifier: Arc<dyn IdentityVerifier> =
            Arc::new(StaticTokenVerifier::new(config.auth.tokens.clone()));

        Ok(Self {
            config,
            pipeline,
            verifier,
            shutdown_tx: None,
        })
    }

    /// Swap in a different credential verifier before starting.
    pub fn with_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// The wired pipeline, for callers that drive it without the server.
    pub fn pipeline(&self) -> Arc<AssetPipeline> {
        Arc::clone(&self.pipeline)
    }

    /// Bind and serve until [`shutdown`](Self::shutdown) or a server error.
    pub async fn start(&mut self) -> Result<(), ServiceError> {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let router = build_router(
            AppState {
                pipeline: Arc::clone(&self.pipeline),
            },
            Arc::clone(&self.verifier),
            self.config.limits.max_upload_bytes,
        );

        let addr = self.config.http_addr();
        info!(addr = %addr, "Starting HTTP server");
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServiceError::Bind(e.to_string()))?;

        let server = tokio::spawn(async move { axum::serve(listener, router).await });

        tokio::select! {
            _ = &mut shutdown_rx => {
                info!("Received shutdown signal");
            }
            result = server => {
                match result {
                    Ok(Err(e)) => {
                        error!(error = %e, "HTTP server error");
                        return Err(ServiceError::Internal(e.to_string()));
                    }
                    Err(e) => {
                        error!(error = %e, "HTTP server task panicked");
                        return Err(ServiceError::Internal(e.to_string()));
                    }
                    Ok(Ok(())) => {}
                }
            }
        }

        info!("HTTP server stopped");
        Ok(())
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Select and construct the media store named by the configuration.
fn build_media_store(config: &ApiConfig) -> Result<Arc<dyn MediaStore>, ServiceError> {
    let store: Arc<dyn MediaStore> = match config.storage.backend {
        StorageBackendKind::Local => Arc::new(LocalDiskStore::new(
            config.storage.local_root.clone(),
            config.storage.prefix.clone(),
        )),
        StorageBackendKind::Remote => {
            let endpoint = config
                .storage
                .remote_endpoint
                .as_deref()
                .ok_or_else(|| ServiceError::Config("remote_endpoint not set".into()))?;
            Arc::new(HttpObjectStore::new(
                endpoint,
                config.storage.prefix.clone(),
            ))
        }
    };
    Ok(store)
}
