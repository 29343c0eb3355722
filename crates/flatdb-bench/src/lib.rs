//! FlatDB Performance Benchmarks
//!
//! This crate contains benchmarks for the storage engine:
//! - Row inserts (the whole file is rewritten per insert)
//! - Selects with projection, filter and order-by
//! - Table location in files holding many tables
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p flatdb-bench
//! ```

pub mod utils;
