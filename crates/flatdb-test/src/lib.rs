//! # flatdb-test
//!
//! Integration tests for FlatDB.
//!
//! This crate contains:
//! - End-to-end tests over a real database file (`tests/`)
//! - Shared fixtures for those tests

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Test utilities and helpers
pub mod utils;
