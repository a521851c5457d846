//! Schema manager.
//!
//! Migrations are executed in order on every [`Database::open`] call.  Each
//! one is guarded by the `user_version` pragma so it runs exactly once, and
//! each only adds: new tables, new columns, new indexes.  Upgrading an
//! existing database therefore keeps its rows.
//!
//! Dropping and recreating the schema is still available, but only when the
//! caller opts in with [`MigrationPolicy::RecreateOnMismatch`].
//!
//! `user_version` alone is not trusted.  A file written by the first mobile
//! release stamps its own version (up to 3) over a different layout: the
//! listings table is `artwork` and `users` has none of the later columns.
//! Such a file is adopted as version 1 before migrating, and any other
//! database whose tables disagree with its version is refused.
//!
//! [`Database::open`]: crate::Database::open

pub mod v001_initial;
pub mod v002_user_profile;
pub mod v003_artwork_pricing;
pub mod v004_ledger;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Current schema version.  Bump this and add a new migration module whenever
/// the schema changes.
pub const CURRENT_VERSION: u32 = 4;

type Up = fn(&Connection) -> std::result::Result<(), rusqlite::Error>;

/// `(version, name, up)` in application order.
const MIGRATIONS: &[(u32, &str, Up)] = &[
    (1, "v001_initial", v001_initial::up),
    (2, "v002_user_profile", v002_user_profile::up),
    (3, "v003_artwork_pricing", v003_artwork_pricing::up),
    (4, "v004_ledger", v004_ledger::up),
];

/// Drop order respects foreign keys: children first.
const TABLES: &[&str] = &["purchases", "wishlist", "artworks", "users"];

/// Listings table of the first mobile release.
const LEGACY_ARTWORK_TABLE: &str = "artwork";

/// `(version, table, column)` that must exist once `version` is applied.
const SHAPE: &[(u32, &str, Option<&str>)] = &[
    (1, "users", None),
    (1, "artworks", None),
    (2, "users", Some("role")),
    (3, "artworks", Some("artist_email")),
    (4, "wishlist", None),
    (4, "purchases", None),
];

/// What to do with a database whose schema is older than the code.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MigrationPolicy {
    /// Apply the pending migrations in place.
    #[default]
    Additive,
    /// Drop all four tables and rebuild them empty.  Every row is lost.
    RecreateOnMismatch,
}

/// Read `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> Result<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Bring the schema from whatever version it is at up to `target`.
pub fn ensure_schema(conn: &Connection, target: u32, policy: MigrationPolicy) -> Result<()> {
    if target > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "unknown schema version {target} (latest is {CURRENT_VERSION})"
        )));
    }

    adopt_legacy_layout(conn)?;
    let current = schema_version(conn)?;

    tracing::info!(
        current_version = current,
        target_version = target,
        ?policy,
        "checking database migrations"
    );

    if current > target {
        return Err(StoreError::Migration(format!(
            "database schema version {current} is newer than {target}"
        )));
    }
    if let Err(e) = verify_shape(conn, current) {
        if policy != MigrationPolicy::RecreateOnMismatch {
            return Err(e);
        }
        tracing::warn!(error = %e, "schema does not match its version");
        return recreate(conn, target);
    }
    if current == target {
        return Ok(());
    }

    match policy {
        MigrationPolicy::RecreateOnMismatch if current > 0 => recreate(conn, target),
        _ => run_migrations(conn, current, target),
    }
}

/// Apply every migration with `current < version <= target`, each in its own
/// transaction together with the version bump.
fn run_migrations(conn: &Connection, current: u32, target: u32) -> Result<()> {
    for &(version, name, up) in MIGRATIONS {
        if version <= current || version > target {
            continue;
        }

        tracing::info!(migration = name, "applying migration");

        let tx = conn.unchecked_transaction()?;
        up(&tx).map_err(|e| StoreError::Migration(format!("{name}: {e}")))?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
    }
    Ok(())
}

/// Rename the first release's `artwork` table and restamp the file as
/// version 1, so the regular migrations add everything it lacks.
fn adopt_legacy_layout(conn: &Connection) -> Result<()> {
    if !table_exists(conn, LEGACY_ARTWORK_TABLE)? || table_exists(conn, "artworks")? {
        return Ok(());
    }

    let stamped = schema_version(conn)?;
    tracing::warn!(stamped_version = stamped, "adopting first-release database layout");

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(&format!("ALTER TABLE {LEGACY_ARTWORK_TABLE} RENAME TO artworks;"))?;
    if table_exists(&tx, "users")? && !column_exists(&tx, "users", "profile_image")? {
        tx.execute_batch("ALTER TABLE users ADD COLUMN profile_image TEXT;")?;
    }
    v001_initial::up(&tx).map_err(|e| StoreError::Migration(format!("v001_initial: {e}")))?;
    tx.pragma_update(None, "user_version", 1)?;
    tx.commit()?;
    Ok(())
}

/// Refuse a database whose tables do not match the version it claims.
fn verify_shape(conn: &Connection, version: u32) -> Result<()> {
    for &(applied_in, table, column) in SHAPE {
        if applied_in > version {
            continue;
        }
        let present = match column {
            Some(column) => column_exists(conn, table, column)?,
            None => table_exists(conn, table)?,
        };
        if !present {
            return Err(StoreError::Migration(format!(
                "schema version {version} but {table}{} is missing",
                column.map(|c| format!(".{c}")).unwrap_or_default()
            )));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        params![table],
        |row| row.get(0),
    )?)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2)",
        params![table, column],
        |row| row.get(0),
    )?)
}

fn recreate(conn: &Connection, target: u32) -> Result<()> {
    tracing::warn!(target_version = target, "dropping and recreating all tables");

    let tx = conn.unchecked_transaction()?;
    for table in TABLES {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
    }
    tx.pragma_update(None, "user_version", 0)?;
    tx.commit()?;

    run_migrations(conn, 0, target)
}
