//! HonduMarket Core - Shared types library.
//!
//! This crate provides common types used across all HonduMarket components:
//! - `web` - Marketplace HTTP API and session store
//! - `integration-tests` - Black-box API tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, statuses, auth contracts, and the
//!   cart/messaging entities
//!
//! Authentication (JWT issuance and verification) and persistence are owned
//! by external collaborators; this crate only defines the data shapes
//! exchanged with them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
