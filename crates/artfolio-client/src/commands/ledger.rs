use std::sync::Mutex;

use artfolio_shared::types::Role;
use artfolio_store::{ArtworkWithPhone, StoreError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::commands::user_message;
use crate::state::AppState;

/// Shown to the buyer once a purchase is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub purchase_id: i64,
    pub artwork_id: i64,
    pub title: String,
    pub price_paid: f64,
    pub purchase_date: NaiveDate,
}

/// Flip the artwork in or out of the signed-in buyer's wishlist.  Returns
/// whether it is wishlisted afterwards.
pub fn toggle_wishlist(state: &Mutex<AppState>, artwork_id: i64) -> Result<bool, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let session = guard.session_as(Role::Buyer)?;

    let now_listed = guard
        .db()?
        .toggle_wishlist(&session.email, artwork_id)
        .map_err(|e| user_message("update wishlist", e))?;

    info!(artwork_id, wishlisted = now_listed, "wishlist toggled");
    Ok(now_listed)
}

/// Ids the signed-in buyer has wishlisted, for marking hearts in the catalog.
pub fn wishlisted_ids(state: &Mutex<AppState>) -> Vec<i64> {
    let Ok(guard) = state.lock() else {
        return Vec::new();
    };
    let (Ok(session), Ok(db)) = (guard.session_as(Role::Buyer), guard.db()) else {
        return Vec::new();
    };

    db.wishlist_ids(&session.email).unwrap_or_else(|e| {
        error!(error = %e, "failed to load wishlist ids");
        Vec::new()
    })
}

pub fn my_wishlist(state: &Mutex<AppState>) -> Vec<ArtworkWithPhone> {
    let Ok(guard) = state.lock() else {
        return Vec::new();
    };
    let (Ok(session), Ok(db)) = (guard.session_as(Role::Buyer), guard.db()) else {
        return Vec::new();
    };

    db.get_wishlist(&session.email).unwrap_or_else(|e| {
        error!(error = %e, "failed to load wishlist");
        Vec::new()
    })
}

/// Buy an artwork at its current effective price, dated today.
pub fn buy_artwork(state: &Mutex<AppState>, artwork_id: i64) -> Result<PurchaseReceipt, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let session = guard.session_as(Role::Buyer)?;
    let db = guard.db()?;

    let artwork = match db.get_artwork(artwork_id) {
        Ok(found) => found.artwork,
        Err(StoreError::NotFound) => return Err("Artwork no longer exists".to_string()),
        Err(e) => return Err(user_message("load artwork", e)),
    };

    let purchase_date = chrono::Local::now().date_naive();
    let purchase_id = db
        .record_purchase(&session.email, artwork_id, purchase_date)
        .map_err(|e| user_message("record purchase", e))?;

    let receipt = PurchaseReceipt {
        purchase_id,
        artwork_id,
        title: artwork.draft.title.clone(),
        price_paid: artwork.draft.pricing().effective(),
        purchase_date,
    };
    info!(
        purchase_id,
        artwork_id,
        price = receipt.price_paid,
        "artwork purchased"
    );
    Ok(receipt)
}

/// Everything the signed-in buyer has bought, oldest first.
pub fn my_purchases(state: &Mutex<AppState>) -> Vec<ArtworkWithPhone> {
    let Ok(guard) = state.lock() else {
        return Vec::new();
    };
    let (Ok(session), Ok(db)) = (guard.session_as(Role::Buyer), guard.db()) else {
        return Vec::new();
    };

    db.get_purchase_history(&session.email).unwrap_or_else(|e| {
        error!(error = %e, "failed to load purchase history");
        Vec::new()
    })
}
