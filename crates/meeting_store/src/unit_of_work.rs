//! Transaction scope passed into every store and service operation.

use std::fmt;

use sqlx::{Sqlite, SqliteConnection, Transaction};

use crate::{StoreError, StoreResult};

/// Whether a unit of work may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Reads only; committing rolls back.
    ReadOnly,
    /// Reads and writes; committing persists.
    ReadWrite,
}

/// A single database transaction.
///
/// Dropping a unit of work without calling [`UnitOfWork::commit`] rolls the
/// transaction back, so every early return through `?` releases it.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
    mode: AccessMode,
}

impl UnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>, mode: AccessMode) -> Self {
        Self { tx, mode }
    }

    /// Returns true if writes are rejected.
    pub fn is_read_only(&self) -> bool {
        self.mode == AccessMode::ReadOnly
    }

    /// Connection for queries that only read.
    pub(crate) fn reader(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Connection for queries that write.
    pub(crate) fn writer(&mut self) -> StoreResult<&mut SqliteConnection> {
        if self.is_read_only() {
            return Err(StoreError::ReadOnly);
        }
        Ok(&mut self.tx)
    }

    /// Ends the unit of work: commits a read-write one, rolls back a
    /// read-only one.
    pub async fn commit(self) -> StoreResult<()> {
        match self.mode {
            AccessMode::ReadWrite => self.tx.commit().await?,
            AccessMode::ReadOnly => self.tx.rollback().await?,
        }
        Ok(())
    }
}

impl fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitOfWork").field("mode", &self.mode).finish()
    }
}
