//! Line-oriented file I/O for FlatDB.
//!
//! Every database file is read and written as a whole: a read loads all
//! lines into memory, a write truncates the file and writes every line back.
//! There is no buffering layer between operations and no atomic rename, so
//! a crash in the middle of a write can leave a truncated file.
//!
//! # Usage
//!
//! ```rust,no_run
//! use flatdb_storage::file::LineFile;
//!
//! fn example() -> flatdb_common::DbResult<()> {
//!     let file = LineFile::new("data.txt", false);
//!     file.create_empty()?;
//!
//!     let mut lines = file.read_lines()?;
//!     lines.push("#users".to_string());
//!     file.write_lines(&lines)?;
//!     Ok(())
//! }
//! ```

mod line_file;

pub use line_file::LineFile;
