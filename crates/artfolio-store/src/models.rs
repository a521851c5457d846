//! Domain model structs persisted in the local SQLite database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the presentation layer.

use artfolio_shared::error::ValidationError;
use artfolio_shared::pricing::Pricing;
use artfolio_shared::types::Role;
use artfolio_shared::validation::{require, validate_email};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Write outcome
// ---------------------------------------------------------------------------

/// Result of an update or delete keyed by id or email.
///
/// A write that matched nothing is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WriteOutcome {
    /// At least one row was changed.
    Applied,
    /// No row matched the key.
    NotFound,
}

impl WriteOutcome {
    pub fn from_rows(affected: usize) -> Self {
        if affected > 0 {
            WriteOutcome::Applied
        } else {
            WriteOutcome::NotFound
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied)
    }
}

// ---------------------------------------------------------------------------
// Artwork
// ---------------------------------------------------------------------------

/// The artist-editable part of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkDraft {
    pub title: String,
    pub description: String,
    /// Path of the image file inside the image store.
    pub image_path: String,
    pub medium: String,
    pub style: String,
    pub theme: String,
    /// Pixel dimensions supplied by the caller; the store never opens the image.
    pub image_width: u32,
    pub image_height: u32,
    pub original_price: f64,
    pub discounted_price: Option<f64>,
}

impl ArtworkDraft {
    pub fn pricing(&self) -> Pricing {
        Pricing::new(self.original_price, self.discounted_price)
    }

    /// Every text field is required and the prices must be consistent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("image", &self.image_path)?;
        require("medium", &self.medium)?;
        require("style", &self.style)?;
        require("theme", &self.theme)?;
        self.pricing().validate()
    }
}

/// A persisted listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: i64,
    /// Normalized email of the owning artist.
    pub artist_email: String,
    #[serde(flatten)]
    pub draft: ArtworkDraft,
}

/// An [`Artwork`] enriched with the owning artist's phone number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkWithPhone {
    #[serde(flatten)]
    pub artwork: Artwork,
    /// The artist's mobile number, or
    /// [`PHONE_NOT_AVAILABLE`](artfolio_shared::constants::PHONE_NOT_AVAILABLE).
    pub artist_phone: String,
}

impl ArtworkWithPhone {
    pub fn id(&self) -> i64 {
        self.artwork.id
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Signup form contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Plain text as typed; hashed before it is stored.
    pub password: String,
    pub mobile: String,
    pub role: Role,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("first name", &self.first_name)?;
        require("last name", &self.last_name)?;
        validate_email(&self.email)?;
        require("password", &self.password)?;
        require("mobile number", &self.mobile)?;
        Ok(())
    }
}

/// A registered user.  The password hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub mobile: Option<String>,
    pub avatar_path: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// What a successful sign-in reveals about the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub email: String,
    /// `"{first name} {last name}"`
    pub display_name: String,
    pub avatar_path: Option<String>,
    pub role: Role,
}

/// Public profile fields shown on an artist's page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub bio: Option<String>,
    pub social_links: Option<String>,
    pub mobile: Option<String>,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// One purchase of one artwork by one buyer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: i64,
    pub buyer_email: String,
    pub artwork_id: i64,
    pub purchase_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::draft;

    #[test]
    fn test_listing_payload_is_flat_camel_case() {
        let listing = ArtworkWithPhone {
            artwork: Artwork {
                id: 7,
                artist_email: "a@x.com".into(),
                draft: draft("Sunset", 100.0, Some(80.0)),
            },
            artist_phone: "555-0100".into(),
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["artistEmail"], "a@x.com");
        assert_eq!(json["title"], "Sunset");
        assert_eq!(json["imageWidth"], 1920);
        assert_eq!(json["originalPrice"], 100.0);
        assert_eq!(json["discountedPrice"], 80.0);
        assert_eq!(json["artistPhone"], "555-0100");
        assert!(json.get("artwork").is_none());
        assert!(json.get("draft").is_none());

        let back: ArtworkWithPhone = serde_json::from_value(json).unwrap();
        assert_eq!(back, listing);
    }

    #[test]
    fn test_missing_discount_serializes_as_null() {
        let json = serde_json::to_value(draft("Plain", 50.0, None)).unwrap();
        assert!(json["discountedPrice"].is_null());
    }
}
