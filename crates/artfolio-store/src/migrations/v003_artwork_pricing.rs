use rusqlite::Connection;

// Listings created before ownership existed keep a NULL artist and show up
// with no phone number.
const UP_SQL: &str = r#"
ALTER TABLE artworks ADD COLUMN artist_email TEXT REFERENCES users(email);
ALTER TABLE artworks ADD COLUMN original_price REAL NOT NULL DEFAULT 0;
ALTER TABLE artworks ADD COLUMN discounted_price REAL;   -- NULL = no discount

CREATE INDEX IF NOT EXISTS idx_artworks_artist_email ON artworks(artist_email);
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
