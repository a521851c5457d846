//! Catalog: CRUD operations for [`Artwork`] records.

use artfolio_shared::constants::PHONE_NOT_AVAILABLE;
use artfolio_shared::types::{normalize_email, Role};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::{Artwork, ArtworkDraft, ArtworkWithPhone, WriteOutcome};

/// Columns read by [`row_to_artwork_with_phone`], for queries that alias
/// `artworks` as `a` and left-join the owner as `u`.
pub(crate) const ARTWORK_WITH_PHONE_COLUMNS: &str =
    "a.id, a.title, a.description, a.image_path, a.medium, a.style, a.theme,
     a.image_width, a.image_height, a.artist_email, a.original_price,
     a.discounted_price, u.mobile";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new listing owned by `artist_email` and return its id.
    ///
    /// The owner must be a registered user with the artist role.
    pub fn add_artwork(&self, draft: &ArtworkDraft, artist_email: &str) -> Result<i64> {
        draft.validate()?;
        let artist_email = normalize_email(artist_email);

        let tx = self.write_txn()?;

        let role: Option<String> = tx
            .query_row(
                "SELECT role FROM users WHERE email = ?1",
                params![artist_email],
                |row| row.get(0),
            )
            .optional()?;
        if role.as_deref() != Some(Role::Artist.as_str()) {
            return Err(StoreError::NotAnArtist(artist_email));
        }

        tx.execute(
            "INSERT INTO artworks (title, description, image_path, medium, style, theme,
                                   image_width, image_height, artist_email,
                                   original_price, discounted_price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                draft.title,
                draft.description,
                draft.image_path,
                draft.medium,
                draft.style,
                draft.theme,
                draft.image_width,
                draft.image_height,
                artist_email,
                draft.original_price,
                draft.discounted_price,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(artwork_id = id, artist = %artist_email, "artwork added");
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single listing by id.
    pub fn get_artwork(&self, id: i64) -> Result<ArtworkWithPhone> {
        self.conn()
            .query_row(
                &format!(
                    "SELECT {ARTWORK_WITH_PHONE_COLUMNS}
                     FROM artworks a
                     LEFT JOIN users u ON u.email = a.artist_email
                     WHERE a.id = ?1"
                ),
                params![id],
                row_to_artwork_with_phone,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// Listings visible to `role`, ordered by id.
    ///
    /// An artist with an email sees only their own works; everyone else
    /// (buyers, or an artist without an email) sees the whole catalog.
    pub fn list_artworks(&self, role: Role, email: Option<&str>) -> Result<Vec<ArtworkWithPhone>> {
        let owner = match (role, email) {
            (Role::Artist, Some(email)) => Some(normalize_email(email)),
            _ => None,
        };

        let mut stmt = self.conn().prepare(&format!(
            "SELECT {ARTWORK_WITH_PHONE_COLUMNS}
             FROM artworks a
             LEFT JOIN users u ON u.email = a.artist_email
             WHERE ?1 IS NULL OR a.artist_email = ?1
             ORDER BY a.id ASC"
        ))?;

        let rows = stmt.query_map(params![owner], row_to_artwork_with_phone)?;

        let mut artworks = Vec::new();
        for row in rows {
            artworks.push(row?);
        }
        Ok(artworks)
    }

    /// Works by `artist_email` that have been bought, one row per purchase.
    pub fn past_sales(&self, artist_email: &str) -> Result<Vec<ArtworkWithPhone>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {ARTWORK_WITH_PHONE_COLUMNS}
             FROM purchases p
             JOIN artworks a ON a.id = p.artwork_id
             LEFT JOIN users u ON u.email = a.artist_email
             WHERE a.artist_email = ?1
             ORDER BY p.purchase_date ASC, p.id ASC"
        ))?;

        let rows = stmt.query_map(
            params![normalize_email(artist_email)],
            row_to_artwork_with_phone,
        )?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Overwrite every editable field of the listing with `artwork.id`.
    ///
    /// Ownership is not reassigned: `artwork.artist_email` is ignored.
    pub fn update_artwork(&self, artwork: &Artwork) -> Result<WriteOutcome> {
        let draft = &artwork.draft;
        draft.validate()?;

        let affected = self.conn().execute(
            "UPDATE artworks
             SET title = ?1, description = ?2, image_path = ?3, medium = ?4, style = ?5,
                 theme = ?6, image_width = ?7, image_height = ?8,
                 original_price = ?9, discounted_price = ?10
             WHERE id = ?11",
            params![
                draft.title,
                draft.description,
                draft.image_path,
                draft.medium,
                draft.style,
                draft.theme,
                draft.image_width,
                draft.image_height,
                draft.original_price,
                draft.discounted_price,
                artwork.id,
            ],
        )?;

        tracing::debug!(artwork_id = artwork.id, affected, "artwork updated");
        Ok(WriteOutcome::from_rows(affected))
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a listing.  Wishlist entries go with it (ON DELETE CASCADE);
    /// purchase records stay but no longer join to anything.
    pub fn delete_artwork(&self, id: i64) -> Result<WriteOutcome> {
        let affected = self
            .conn()
            .execute("DELETE FROM artworks WHERE id = ?1", params![id])?;
        Ok(WriteOutcome::from_rows(affected))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a row selected with [`ARTWORK_WITH_PHONE_COLUMNS`].
pub(crate) fn row_to_artwork_with_phone(row: &rusqlite::Row<'_>) -> rusqlite::Result<ArtworkWithPhone> {
    let artist_email: Option<String> = row.get(9)?;
    let mobile: Option<String> = row.get(12)?;

    let artist_phone = mobile
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| PHONE_NOT_AVAILABLE.to_string());

    Ok(ArtworkWithPhone {
        artwork: Artwork {
            id: row.get(0)?,
            artist_email: artist_email.unwrap_or_default(),
            draft: ArtworkDraft {
                title: row.get(1)?,
                description: row.get(2)?,
                image_path: row.get(3)?,
                medium: row.get(4)?,
                style: row.get(5)?,
                theme: row.get(6)?,
                image_width: row.get(7)?,
                image_height: row.get(8)?,
                original_price: row.get(10)?,
                discounted_price: row.get(11)?,
            },
        },
        artist_phone,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::testutil::{draft, register, test_db};

    #[test]
    fn test_add_then_list_round_trip() {
        let db = test_db();
        register(&db, "a@x.com", Role::Artist, "555-0100");

        let sunset = draft("Sunset", 100.0, Some(80.0));
        let id = db.add_artwork(&sunset, "a@x.com").unwrap();

        let listed = db.list_artworks(Role::Buyer, None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), id);
        assert_eq!(listed[0].artwork.draft, sunset);
        assert_eq!(listed[0].artwork.artist_email, "a@x.com");
        assert_eq!(listed[0].artwork.draft.discounted_price, Some(80.0));
        assert_eq!(listed[0].artist_phone, "555-0100");
    }

    #[test]
    fn test_artist_sees_only_own_works() {
        let db = test_db();
        register(&db, "a@x.com", Role::Artist, "1");
        register(&db, "b@x.com", Role::Artist, "2");

        let mine = db.add_artwork(&draft("Mine", 10.0, None), "a@x.com").unwrap();
        db.add_artwork(&draft("Theirs", 10.0, None), "b@x.com").unwrap();

        let own = db.list_artworks(Role::Artist, Some("A@X.com")).unwrap();
        assert_eq!(own.iter().map(|a| a.id()).collect::<Vec<_>>(), vec![mine]);

        assert_eq!(db.list_artworks(Role::Buyer, Some("a@x.com")).unwrap().len(), 2);
        assert_eq!(db.list_artworks(Role::Artist, None).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_phone_uses_sentinel() {
        let db = test_db();
        register(&db, "a@x.com", Role::Artist, "555");
        db.conn()
            .execute("UPDATE users SET mobile = '  ' WHERE email = 'a@x.com'", [])
            .unwrap();
        db.add_artwork(&draft("Sunset", 10.0, None), "a@x.com").unwrap();

        let listed = db.list_artworks(Role::Buyer, None).unwrap();
        assert_eq!(listed[0].artist_phone, PHONE_NOT_AVAILABLE);
    }

    #[test]
    fn test_ownerless_and_null_phone_rows_stay_visible() {
        let db = test_db();
        register(&db, "a@x.com", Role::Artist, "555");
        db.conn()
            .execute("UPDATE users SET mobile = NULL WHERE email = 'a@x.com'", [])
            .unwrap();
        let owned = db.add_artwork(&draft("Owned", 10.0, None), "a@x.com").unwrap();

        // A listing from before artworks had owners.
        db.conn()
            .execute(
                "INSERT INTO artworks (title, description, image_path, medium, style, theme,
                                       image_width, image_height)
                 VALUES ('Orphan', 'Old', '/img/o.jpg', 'ink', 'sketch', 'city', 10, 10)",
                [],
            )
            .unwrap();

        let listed = db.list_artworks(Role::Buyer, None).unwrap();
        assert_eq!(listed.len(), 2);

        assert_eq!(listed[0].id(), owned);
        assert_eq!(listed[0].artwork.artist_email, "a@x.com");
        assert_eq!(listed[0].artist_phone, PHONE_NOT_AVAILABLE);

        assert_eq!(listed[1].artwork.draft.title, "Orphan");
        assert_eq!(listed[1].artwork.artist_email, "");
        assert_eq!(listed[1].artist_phone, PHONE_NOT_AVAILABLE);
        assert_eq!(listed[1].artwork.draft.original_price, 0.0);
        assert_eq!(listed[1].artwork.draft.discounted_price, None);

        // Only owned works show up under an artist's own listing.
        assert_eq!(db.list_artworks(Role::Artist, Some("a@x.com")).unwrap().len(), 1);
    }

    #[test]
    fn test_only_artists_may_list() {
        let db = test_db();
        register(&db, "b@x.com", Role::Buyer, "1");

        let err = db.add_artwork(&draft("Nope", 10.0, None), "b@x.com").unwrap_err();
        assert!(matches!(err, StoreError::NotAnArtist(_)));

        let err = db.add_artwork(&draft("Nope", 10.0, None), "ghost@x.com").unwrap_err();
        assert!(matches!(err, StoreError::NotAnArtist(_)));
        assert!(db.list_artworks(Role::Buyer, None).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pricing_rejected() {
        let db = test_db();
        register(&db, "a@x.com", Role::Artist, "1");

        let err = db.add_artwork(&draft("Greedy", 80.0, Some(100.0)), "a@x.com").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_update_overwrites_fields() {
        let db = test_db();
        register(&db, "a@x.com", Role::Artist, "1");
        let id = db.add_artwork(&draft("Sunset", 100.0, None), "a@x.com").unwrap();

        let mut artwork = db.get_artwork(id).unwrap().artwork;
        artwork.draft.title = "Sunrise".into();
        artwork.draft.discounted_price = Some(50.0);

        assert_eq!(db.update_artwork(&artwork).unwrap(), WriteOutcome::Applied);
        let stored = db.get_artwork(id).unwrap();
        assert_eq!(stored.artwork.draft.title, "Sunrise");
        assert_eq!(stored.artwork.draft.discounted_price, Some(50.0));
        assert_eq!(stored.artwork.artist_email, "a@x.com");
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let db = test_db();
        register(&db, "a@x.com", Role::Artist, "1");
        let id = db.add_artwork(&draft("Sunset", 100.0, None), "a@x.com").unwrap();
        let before = db.list_artworks(Role::Buyer, None).unwrap();

        let ghost = Artwork {
            id: id + 100,
            artist_email: "a@x.com".into(),
            draft: draft("Ghost", 1.0, None),
        };
        assert_eq!(db.update_artwork(&ghost).unwrap(), WriteOutcome::NotFound);
        assert_eq!(db.list_artworks(Role::Buyer, None).unwrap(), before);
    }

    #[test]
    fn test_delete_removes_from_every_view() {
        let db = test_db();
        register(&db, "a@x.com", Role::Artist, "1");
        register(&db, "b@x.com", Role::Buyer, "2");
        let id = db.add_artwork(&draft("Sunset", 100.0, None), "a@x.com").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        db.add_to_wishlist("b@x.com", id).unwrap();
        db.record_purchase("b@x.com", id, date).unwrap();
        assert_eq!(db.past_sales("a@x.com").unwrap().len(), 1);

        assert_eq!(db.delete_artwork(id).unwrap(), WriteOutcome::Applied);
        assert_eq!(db.delete_artwork(id).unwrap(), WriteOutcome::NotFound);

        assert!(db.list_artworks(Role::Buyer, None).unwrap().is_empty());
        assert!(db.past_sales("a@x.com").unwrap().is_empty());
        assert!(db.get_wishlist("b@x.com").unwrap().is_empty());
        assert!(db.get_purchase_history("b@x.com").unwrap().is_empty());
        assert!(matches!(db.get_artwork(id), Err(StoreError::NotFound)));
    }

    #[test]
    fn test_past_sales_one_row_per_sale() {
        let db = test_db();
        register(&db, "a@x.com", Role::Artist, "1");
        register(&db, "b@x.com", Role::Buyer, "2");
        register(&db, "c@x.com", Role::Buyer, "3");
        let sold = db.add_artwork(&draft("Sold", 100.0, None), "a@x.com").unwrap();
        db.add_artwork(&draft("Unsold", 100.0, None), "a@x.com").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        db.record_purchase("b@x.com", sold, date).unwrap();
        db.record_purchase("c@x.com", sold, date).unwrap();

        let sales = db.past_sales("a@x.com").unwrap();
        assert_eq!(sales.len(), 2);
        assert!(sales.iter().all(|s| s.id() == sold));
        assert!(db.past_sales("b@x.com").unwrap().is_empty());
    }
}
