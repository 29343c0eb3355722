//! Configuration for FlatDB.
//!
//! This module provides the configuration for opening a file-backed store.

mod store;

pub use store::{StoreConfig, StoreConfigBuilder};
