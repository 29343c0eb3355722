//! Snapshot-based transactions.
//!
//! A transaction is a full copy of the database file. While it is open,
//! every read and write goes to the copy; commit copies it back over the
//! primary file, rollback deletes it.
//!
//! # Transaction States
//!
//! ```text
//! ┌──────┐    begin()    ┌────────┐
//! │ Idle │──────────────▶│ Active │
//! └──────┘               └────────┘
//!    ▲                        │
//!    │   commit() / rollback()│
//!    └────────────────────────┘
//! ```
//!
//! There is a single snapshot slot per database file. Its path is fixed by
//! configuration, so a second handle on the same file sees the slot as
//! taken while the first handle's transaction is open. A snapshot left by a
//! crashed process holds the slot too, until it is explicitly discarded.

use std::fmt;
use std::path::Path;

use flatdb_common::{DbError, DbResult};
use tracing::{info, warn};

use crate::file::LineFile;

/// The state of the transaction slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// No transaction; the primary file is current.
    Idle,
    /// A snapshot exists and is current.
    Active,
}

impl TransactionState {
    /// Returns true if a transaction is open.
    pub fn is_active(&self) -> bool {
        *self == TransactionState::Active
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionState::Idle => write!(f, "Idle"),
            TransactionState::Active => write!(f, "Active"),
        }
    }
}

/// Owns the primary file, the snapshot file and the slot state.
#[derive(Debug)]
pub struct TransactionManager {
    /// The primary database file.
    primary: LineFile,
    /// Where the snapshot lives while a transaction is open.
    snapshot: LineFile,
    /// Current state.
    state: TransactionState,
}

impl TransactionManager {
    /// Creates an idle manager.
    pub fn new(primary: LineFile, snapshot: LineFile) -> Self {
        Self {
            primary,
            snapshot,
            state: TransactionState::Idle,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Returns true if a transaction is open.
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Returns the primary file.
    pub fn primary(&self) -> &LineFile {
        &self.primary
    }

    /// Returns the snapshot file.
    pub fn snapshot(&self) -> &LineFile {
        &self.snapshot
    }

    /// Returns the file every operation should read and write.
    pub fn current(&self) -> &LineFile {
        match self.state {
            TransactionState::Idle => &self.primary,
            TransactionState::Active => &self.snapshot,
        }
    }

    /// Returns the path of the current file.
    pub fn current_path(&self) -> &Path {
        self.current().path()
    }

    /// Opens a transaction by copying the primary file to the snapshot.
    ///
    /// # Errors
    ///
    /// `TransactionAlreadyOpen` if this manager is active or another handle
    /// holds the snapshot slot.
    pub fn begin(&mut self) -> DbResult<()> {
        if self.state.is_active() || self.snapshot.exists() {
            return Err(DbError::TransactionAlreadyOpen);
        }

        self.primary.copy_to(&self.snapshot)?;
        self.state = TransactionState::Active;

        info!(snapshot = %self.snapshot.path().display(), "transaction started");
        Ok(())
    }

    /// Copies the snapshot over the primary file and deletes it.
    ///
    /// If the copy fails the transaction stays open.
    pub fn commit(&mut self) -> DbResult<()> {
        if !self.state.is_active() {
            return Err(DbError::NoActiveTransaction);
        }

        self.snapshot.copy_to(&self.primary)?;
        self.snapshot.remove()?;
        self.state = TransactionState::Idle;

        info!(primary = %self.primary.path().display(), "transaction committed");
        Ok(())
    }

    /// Deletes the snapshot without touching the primary file.
    pub fn rollback(&mut self) -> DbResult<()> {
        if !self.state.is_active() {
            return Err(DbError::NoActiveTransaction);
        }

        self.snapshot.remove()?;
        self.state = TransactionState::Idle;

        info!(primary = %self.primary.path().display(), "transaction rolled back");
        Ok(())
    }

    /// Deletes a snapshot left behind by a crashed process.
    ///
    /// Returns true if a snapshot was found and removed. Does nothing while
    /// this manager is active.
    pub fn discard_stale_snapshot(&mut self) -> DbResult<bool> {
        if self.state.is_active() || !self.snapshot.exists() {
            return Ok(false);
        }

        warn!(
            snapshot = %self.snapshot.path().display(),
            "discarding stale transaction snapshot"
        );
        self.snapshot.remove()?;
        Ok(true)
    }
}

impl Drop for TransactionManager {
    fn drop(&mut self) {
        if self.state.is_active() {
            warn!(
                snapshot = %self.snapshot.path().display(),
                "open transaction dropped, rolling back"
            );
            if let Err(e) = self.snapshot.remove() {
                warn!(error = %e, "failed to remove snapshot");
            }
        }
    }
}
