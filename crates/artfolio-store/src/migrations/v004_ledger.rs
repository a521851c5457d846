use rusqlite::Connection;

const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Wishlist: one row per (buyer, artwork); goes away with the artwork
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS wishlist (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    buyer_email TEXT NOT NULL,                -- FK -> users(email)
    artwork_id  INTEGER NOT NULL,             -- FK -> artworks(id)

    FOREIGN KEY (buyer_email) REFERENCES users(email),
    FOREIGN KEY (artwork_id) REFERENCES artworks(id) ON DELETE CASCADE
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_wishlist_buyer_artwork
    ON wishlist(buyer_email, artwork_id);

-- ----------------------------------------------------------------
-- Purchases: append-only history, kept after the artwork is deleted
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS purchases (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    buyer_email   TEXT NOT NULL,              -- FK -> users(email)
    artwork_id    INTEGER NOT NULL,           -- no FK: history outlives listings
    purchase_date TEXT NOT NULL,              -- YYYY-MM-DD

    FOREIGN KEY (buyer_email) REFERENCES users(email)
);

CREATE INDEX IF NOT EXISTS idx_purchases_buyer ON purchases(buyer_email);
CREATE INDEX IF NOT EXISTS idx_purchases_artwork ON purchases(artwork_id);
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
