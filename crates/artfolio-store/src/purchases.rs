use artfolio_shared::constants::PURCHASE_DATE_FORMAT;
use artfolio_shared::types::normalize_email;
use chrono::NaiveDate;
use rusqlite::params;

use crate::artworks::{row_to_artwork_with_phone, ARTWORK_WITH_PHONE_COLUMNS};
use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{ArtworkWithPhone, PurchaseRecord};
use crate::wishlist::ensure_artwork_exists;

/// Parse a `YYYY-MM-DD` purchase date.
pub fn parse_purchase_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), PURCHASE_DATE_FORMAT)?)
}

impl Database {
    /// Append a purchase.  There is no stock: the same artwork can be bought
    /// any number of times, and the listing and wishlists are left alone.
    pub fn record_purchase(&self, buyer_email: &str, artwork_id: i64, date: NaiveDate) -> Result<i64> {
        let buyer = normalize_email(buyer_email);

        let tx = self.write_txn()?;
        ensure_artwork_exists(&tx, artwork_id)?;
        tx.execute(
            "INSERT INTO purchases (buyer_email, artwork_id, purchase_date)
             VALUES (?1, ?2, ?3)",
            params![
                buyer,
                artwork_id,
                date.format(PURCHASE_DATE_FORMAT).to_string(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::info!(buyer = %buyer, artwork_id, %date, purchase_id = id, "purchase recorded");
        Ok(id)
    }

    /// Bought artworks that still exist, oldest purchase first.
    pub fn get_purchase_history(&self, buyer_email: &str) -> Result<Vec<ArtworkWithPhone>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {ARTWORK_WITH_PHONE_COLUMNS}
             FROM purchases p
             JOIN artworks a ON a.id = p.artwork_id
             LEFT JOIN users u ON u.email = a.artist_email
             WHERE p.buyer_email = ?1
             ORDER BY p.purchase_date ASC, p.id ASC"
        ))?;

        let rows = stmt.query_map(
            params![normalize_email(buyer_email)],
            row_to_artwork_with_phone,
        )?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    /// Raw ledger rows, including purchases of since-deleted artworks.
    pub fn purchase_records(&self, buyer_email: &str) -> Result<Vec<PurchaseRecord>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, buyer_email, artwork_id, purchase_date
             FROM purchases
             WHERE buyer_email = ?1
             ORDER BY purchase_date ASC, id ASC",
        )?;

        let rows = stmt.query_map(params![normalize_email(buyer_email)], row_to_purchase)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

fn row_to_purchase(row: &rusqlite::Row<'_>) -> rusqlite::Result<PurchaseRecord> {
    let date_str: String = row.get(3)?;
    let purchase_date = NaiveDate::parse_from_str(&date_str, PURCHASE_DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(PurchaseRecord {
        id: row.get(0)?,
        buyer_email: row.get(1)?,
        artwork_id: row.get(2)?,
        purchase_date,
    })
}
