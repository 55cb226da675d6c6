//! # Veriport Test Suite
//!
//! Unified test crate exercising the HTTP surface end to end: real router,
//! real middleware, real pipeline, in-memory (or tempdir-backed) adapters.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── upload_flow.rs   # Profile photo replacement over HTTP
//!     ├── kyc_flow.rs      # KYC submission over HTTP
//!     ├── local_disk.rs    # Same flows against the on-disk backend
//!     └── concurrency.rs   # Racing replacements
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p vp-tests
//!
//! # By flow
//! cargo test -p vp-tests integration::upload_flow::
//! cargo test -p vp-tests integration::kyc_flow::
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
