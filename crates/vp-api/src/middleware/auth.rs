//! Authentication middleware.
//!
//! Every protected route runs behind this layer. The caller presents a
//! bearer token in the `Authorization` header (or a `session` cookie for
//! browser clients); the configured [`IdentityVerifier`] resolves it to an
//! [`Identity`], which is stashed in the request extensions for handlers to
//! pick up. Anything else answers 401 with the standard error envelope and
//! never reaches a handler.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::debug;
use vp_records::Identity;

use crate::domain::response::ErrorResponse;

/// Resolves a presented credential to the identity it belongs to.
///
/// Production wires this to the platform's session service; tests and
/// development runs use [`StaticTokenVerifier`].
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Option<Identity>;
}

/// Fixed token table, from the `auth.tokens` configuration section.
#[derive(Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .map(|(token, id)| (token, Identity::new(id)))
                .collect(),
        }
    }

    /// Convenience for tests: one token, one identity.
    pub fn single(token: impl Into<String>, identity: impl Into<String>) -> Self {
        let mut tokens = HashMap::new();
        tokens.insert(token.into(), Identity::new(identity));
        Self { tokens }
    }
}

impl IdentityVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str) -> Option<Identity> {
        self.tokens.get(token).cloned()
    }
}

/// Authentication layer
#[derive(Clone)]
pub struct AuthLayer {
    verifier: Arc<dyn IdentityVerifier>,
}

impl AuthLayer {
    pub fn new(verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            verifier: Arc::clone(&self.verifier),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    verifier: Arc<dyn IdentityVerifier>,
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let verifier = Arc::clone(&self.verifier);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let identity = extract_token(&req).and_then(|token| verifier.verify(&token));

            match identity {
                Some(identity) => {
                    debug!(identity = %identity, "request authenticated");
                    req.extensions_mut().insert(identity);
                    inner.call(req).await
                }
                None => Ok(unauthorized_response()),
            }
        })
    }
}

/// Pull the credential out of the request: `Authorization: Bearer <token>`
/// first, then a `session` cookie.
fn extract_token<B>(req: &Request<B>) -> Option<String> {
    if let Some(auth) = req.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    if let Some(cookies) = req.headers().get(header::COOKIE) {
        if let Ok(cookie_str) = cookies.to_str() {
            for pair in cookie_str.split(';') {
                if let Some(token) = pair.trim().strip_prefix("session=") {
                    return Some(token.to_string());
                }
            }
        }
    }

    None
}

fn unauthorized_response() -> Response {
    let body = ErrorResponse::new("Unauthorized. Please login");

    let mut response = Response::new(Body::from(serde_json::to_vec(&body).unwrap_or_default()));
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response
        .headers_mut()
        .insert("Content-Type", "application/json".parse().unwrap());
    response
        .headers_mut()
        .insert("WWW-Authenticate", "Bearer".parse().unwrap());

    response
}
