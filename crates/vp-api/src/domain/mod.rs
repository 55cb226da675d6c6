//! Domain types for the API crate: configuration, errors, response envelopes.

pub mod config;
pub mod error;
pub mod response;
