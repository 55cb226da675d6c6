//! Tower middleware for the HTTP surface.

pub mod auth;

pub use auth::{AuthLayer, IdentityVerifier, StaticTokenVerifier};
