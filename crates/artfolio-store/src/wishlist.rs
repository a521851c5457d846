//! Ledger: artworks a buyer saved for later.
//!
//! A (buyer, artwork) pair is stored at most once; adding it again is a
//! no-op that returns the existing entry.

use artfolio_shared::types::normalize_email;
use rusqlite::{params, Connection, OptionalExtension};

use crate::artworks::{row_to_artwork_with_phone, ARTWORK_WITH_PHONE_COLUMNS};
use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{ArtworkWithPhone, WriteOutcome};

impl Database {
    /// Save `artwork_id` for `buyer_email` and return the entry id.
    pub fn add_to_wishlist(&self, buyer_email: &str, artwork_id: i64) -> Result<i64> {
        let buyer = normalize_email(buyer_email);

        let tx = self.write_txn()?;
        ensure_artwork_exists(&tx, artwork_id)?;
        let id = insert_entry(&tx, &buyer, artwork_id)?;
        tx.commit()?;

        tracing::debug!(buyer = %buyer, artwork_id, entry_id = id, "added to wishlist");
        Ok(id)
    }

    pub fn remove_from_wishlist(&self, buyer_email: &str, artwork_id: i64) -> Result<WriteOutcome> {
        let affected = self.conn().execute(
            "DELETE FROM wishlist WHERE buyer_email = ?1 AND artwork_id = ?2",
            params![normalize_email(buyer_email), artwork_id],
        )?;
        Ok(WriteOutcome::from_rows(affected))
    }

    /// Flip membership atomically.  Returns `true` if the artwork is in the
    /// wishlist afterwards.
    pub fn toggle_wishlist(&self, buyer_email: &str, artwork_id: i64) -> Result<bool> {
        let buyer = normalize_email(buyer_email);

        let tx = self.write_txn()?;
        let removed = tx.execute(
            "DELETE FROM wishlist WHERE buyer_email = ?1 AND artwork_id = ?2",
            params![buyer, artwork_id],
        )?;
        let now_saved = if removed > 0 {
            false
        } else {
            ensure_artwork_exists(&tx, artwork_id)?;
            insert_entry(&tx, &buyer, artwork_id)?;
            true
        };
        tx.commit()?;

        tracing::debug!(buyer = %buyer, artwork_id, now_saved, "wishlist toggled");
        Ok(now_saved)
    }

    pub fn is_in_wishlist(&self, buyer_email: &str, artwork_id: i64) -> Result<bool> {
        Ok(self.conn().query_row(
            "SELECT EXISTS (SELECT 1 FROM wishlist WHERE buyer_email = ?1 AND artwork_id = ?2)",
            params![normalize_email(buyer_email), artwork_id],
            |row| row.get(0),
        )?)
    }

    /// Ids of every saved artwork, for marking listings as wishlisted.
    pub fn wishlist_ids(&self, buyer_email: &str) -> Result<Vec<i64>> {
        let mut stmt = self.conn().prepare(
            "SELECT artwork_id FROM wishlist WHERE buyer_email = ?1 ORDER BY id ASC",
        )?;
        let rows = stmt.query_map(params![normalize_email(buyer_email)], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    /// Saved artworks that still exist, in the order they were saved.
    pub fn get_wishlist(&self, buyer_email: &str) -> Result<Vec<ArtworkWithPhone>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {ARTWORK_WITH_PHONE_COLUMNS}
             FROM wishlist w
             JOIN artworks a ON a.id = w.artwork_id
             LEFT JOIN users u ON u.email = a.artist_email
             WHERE w.buyer_email = ?1
             ORDER BY w.id ASC"
        ))?;

        let rows = stmt.query_map(
            params![normalize_email(buyer_email)],
            row_to_artwork_with_phone,
        )?;

        let mut artworks = Vec::new();
        for row in rows {
            artworks.push(row?);
        }
        Ok(artworks)
    }
}

pub(crate) fn ensure_artwork_exists(conn: &Connection, artwork_id: i64) -> Result<()> {
    conn.query_row(
        "SELECT 1 FROM artworks WHERE id = ?1",
        params![artwork_id],
        |_| Ok(()),
    )
    .optional()?
    .ok_or(StoreError::NotFound)
}

fn insert_entry(conn: &Connection, buyer: &str, artwork_id: i64) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO wishlist (buyer_email, artwork_id) VALUES (?1, ?2)",
        params![buyer, artwork_id],
    )?;
    Ok(conn.query_row(
        "SELECT id FROM wishlist WHERE buyer_email = ?1 AND artwork_id = ?2",
        params![buyer, artwork_id],
        |row| row.get(0),
    )?)
}
