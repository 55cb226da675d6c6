//! Route table and shared handler state.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{kyc, profile_photo};
use crate::middleware::auth::{AuthLayer, IdentityVerifier};
use crate::pipeline::AssetPipeline;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AssetPipeline>,
}

/// Assemble the full route table.
///
/// `/profile/photo` and `/kyc` sit behind the auth layer; `/health` does
/// not. The body limit is the configured upload ceiling plus headroom for
/// multipart framing and the text fields.
pub fn build_router(
    state: AppState,
    verifier: Arc<dyn IdentityVerifier>,
    max_upload_bytes: usize,
) -> Router {
    let protected = Router::new()
        .route("/profile/photo", post(profile_photo::replace_photo))
        .route("/kyc", post(kyc::submit_kyc))
        .layer(AuthLayer::new(verifier))
        .with_state(state);

    Router::new()
        .merge(protected)
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(max_upload_bytes + 64 * 1024)),
        )
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}
