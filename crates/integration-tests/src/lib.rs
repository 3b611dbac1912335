//! Integration tests for HonduMarket.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the API
//! cargo run -p hondumarket-web
//!
//! # Run the live tests
//! cargo test -p hondumarket-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_live` - Black-box tests against a running server (ignored by
//!   default; set `HONDUMARKET_TEST_BASE_URL` to point elsewhere)
//! - `environment` - Environment contract checks for the test environment
//!
//! Router-level in-process tests live in `crates/web/tests`; this crate
//! only covers the deployed surface.
