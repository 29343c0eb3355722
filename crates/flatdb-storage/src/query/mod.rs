//! Query execution.
//!
//! A select runs in three stages over the located table region:
//!
//! ```text
//! data lines ──▶ project ──▶ filter ──▶ sort (optional) ──▶ ResultSet
//! ```
//!
//! - **Projection** maps requested column names to schema positions. A name
//!   that does not resolve produces an absent value in that position rather
//!   than an error.
//! - **Filter** runs the caller's predicate on the projected row.
//! - **Sort** orders by the raw stored text of a schema column (which need
//!   not be projected), ascending and stable.
//!
//! Results are fully materialized before they are returned, so later writes
//! never show through an existing `ResultSet`.

mod operators;
mod result;
mod select;

pub use operators::{execute, project, resolve_order_column};
pub use result::{ResultSet, Row};
pub use select::{RowPredicate, SelectQuery};
