//! v001 -- Initial schema creation.
//!
//! The two tables the first release shipped with: `users` (name,
//! credentials, avatar) and `artworks` (descriptive fields and image size).

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Users
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    firstname     TEXT NOT NULL,
    lastname      TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,       -- normalized, the external key
    password      TEXT NOT NULL,              -- Argon2id PHC string
    profile_image TEXT                        -- path inside the image store
);

-- ----------------------------------------------------------------
-- Artworks
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS artworks (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL,
    description  TEXT NOT NULL,
    image_path   TEXT NOT NULL,
    medium       TEXT NOT NULL,
    style        TEXT NOT NULL,
    theme        TEXT NOT NULL,
    image_width  INTEGER NOT NULL DEFAULT 0,  -- pixels
    image_height INTEGER NOT NULL DEFAULT 0
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
