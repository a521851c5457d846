use rusqlite::Connection;

// Existing accounts predate roles and become buyers.
const UP_SQL: &str = r#"
ALTER TABLE users ADD COLUMN mobile TEXT;
ALTER TABLE users ADD COLUMN role TEXT NOT NULL DEFAULT 'buyer'
    CHECK (role IN ('artist', 'buyer'));
ALTER TABLE users ADD COLUMN bio TEXT;              -- artists only
ALTER TABLE users ADD COLUMN social_links TEXT;     -- artists only, free text
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
