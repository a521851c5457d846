//! Database connection management.
//!
//! The [`Database`] struct owns one [`rusqlite::Connection`] for the life of
//! the process and guarantees that migrations are run before any other
//! operation.  The connection is closed when the handle is dropped.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::migrations::{self, MigrationPolicy};

/// Wrapper around a [`rusqlite::Connection`].
///
/// `Connection` is `Send` but not `Sync`: share a `Database` between threads
/// behind a `Mutex`, which also serializes writers.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database described by `config`, creating its
    /// parent directory if needed.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!(path = %config.db_path.display(), "opening database");

        Self::open_with_policy(&config.db_path, config.migration_policy)
    }

    /// Open (or create) a database at an explicit path with additive
    /// migrations.
    pub fn open_at(path: &Path) -> Result<Self> {
        Self::open_with_policy(path, MigrationPolicy::Additive)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_with_policy(path: &Path, policy: MigrationPolicy) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn, policy)
    }

    /// A private, throwaway database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, MigrationPolicy::Additive)
    }

    fn init(conn: Connection, policy: MigrationPolicy) -> Result<Self> {
        // WAL is a no-op for in-memory databases; SQLite reports "memory".
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::ensure_schema(&conn, migrations::CURRENT_VERSION, policy)?;

        Ok(Self { conn })
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    ///
    /// Callers should prefer the typed helpers, but direct access is
    /// occasionally needed for ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin an `IMMEDIATE` transaction: the write lock is taken up front so
    /// a read-then-write sequence inside it cannot interleave with another
    /// writer.  Rolled back on drop unless committed.
    pub(crate) fn write_txn(&self) -> Result<Transaction<'_>> {
        Ok(Transaction::new_unchecked(
            &self.conn,
            TransactionBehavior::Immediate,
        )?)
    }

    /// Current `PRAGMA user_version`.
    pub fn schema_version(&self) -> Result<u32> {
        migrations::schema_version(&self.conn)
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}
