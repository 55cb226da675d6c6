//! Shared fixtures for the HTTP flow tests.
//!
//! `wire` assembles the real router around any media backend, with handles
//! to the in-memory record adapters so tests can seed records and assert on
//! side effects. `MultipartBuilder` produces raw multipart bodies byte for
//! byte, so the tests exercise the actual multipart decoding path.

pub mod concurrency;
pub mod upload_flow;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use vp_api::middleware::auth::StaticTokenVerifier;
use vp_api::pipeline::{AssetPipeline, AuditEmitter};
use vp_api::router::{build_router, AppState};
use vp_media_store::{InMemoryMediaStore, MediaStore, StoreConstraints};
use vp_records::{
    Identity, InMemoryAuditLog, InMemoryKycRecords, InMemoryUserRecords, UserRecord,
};

/// Token accepted by the test verifier for user `u1`.
pub const TOKEN_U1: &str = "tok-u1";
/// Token accepted by the test verifier for `ghost`, who has no record.
pub const TOKEN_GHOST: &str = "tok-ghost";
/// Token the verifier maps to a blank identity (a misconfigured upstream).
pub const TOKEN_BLANK: &str = "tok-blank";

const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Full application wiring over in-memory adapters.
pub struct TestApp {
    pub router: Router,
    pub media: Arc<InMemoryMediaStore>,
    pub users: Arc<InMemoryUserRecords>,
    pub kyc: Arc<InMemoryKycRecords>,
    pub log: Arc<InMemoryAuditLog>,
}

impl TestApp {
    pub fn new() -> Self {
        let media = Arc::new(InMemoryMediaStore::new());
        let (router, users, kyc, log) = wire(media.clone());
        Self {
            router,
            media,
            users,
            kyc,
            log,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the real router around `media`, with `u1` seeded and the two test
/// tokens registered.
pub fn wire(
    media: Arc<dyn MediaStore>,
) -> (
    Router,
    Arc<InMemoryUserRecords>,
    Arc<InMemoryKycRecords>,
    Arc<InMemoryAuditLog>,
) {
    let users = Arc::new(InMemoryUserRecords::new());
    let kyc = Arc::new(InMemoryKycRecords::new());
    let log = Arc::new(InMemoryAuditLog::new());

    users.insert(UserRecord {
        id: Identity::new("u1"),
        email: "u1@example.com".to_string(),
        full_name: "User One".to_string(),
        profile_pic: None,
    });

    let pipeline = Arc::new(AssetPipeline::new(
        media,
        users.clone(),
        kyc.clone(),
        AuditEmitter::new(log.clone()),
        StoreConstraints {
            max_bytes: MAX_UPLOAD_BYTES,
            ..StoreConstraints::default()
        },
    ));

    let mut tokens = HashMap::new();
    tokens.insert(TOKEN_U1.to_string(), "u1".to_string());
    tokens.insert(TOKEN_GHOST.to_string(), "ghost".to_string());
    tokens.insert(TOKEN_BLANK.to_string(), String::new());

    let router = build_router(
        AppState { pipeline },
        Arc::new(StaticTokenVerifier::new(tokens)),
        MAX_UPLOAD_BYTES,
    );

    (router, users, kyc, log)
}

/// Send a request through the router and decode the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router never fails");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Wait for the fire-and-forget audit task to land `want` entries.
pub async fn await_audit(log: &InMemoryAuditLog, want: usize) {
    for _ in 0..100 {
        if log.entries().len() >= want {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "audit log never reached {} entries (have {})",
        want,
        log.entries().len()
    );
}

const BOUNDARY: &str = "vp-test-boundary-4Yb0cKxGgpQ";

/// Raw multipart/form-data body assembler.
#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Terminate the body and wrap it in a POST with the given bearer token.
    pub fn post(mut self, uri: &str, token: Option<&str>) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder().method("POST").uri(uri).header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(self.body)).expect("request build")
    }
}

/// Payload bytes for a pretend PNG; the format checks only look at the
/// declared name and content type.
pub fn png_bytes() -> &'static [u8] {
    b"\x89PNG\r\n\x1a\nfake-image-payload"
}
