//! Command handlers invoked by the presentation layer.
//!
//! Each sub-module groups related commands by domain.  Commands take the
//! shared `Mutex<AppState>`, so concurrent callers are serialized, and
//! report failures as user-facing strings after logging the cause.

pub mod catalog;
pub mod identity;
pub mod ledger;
pub mod profile;

use artfolio_store::StoreError;
use tracing::{error, warn};

/// Turn a store error into the short message shown to the user.
pub(crate) fn user_message(action: &str, e: StoreError) -> String {
    match e {
        StoreError::Validation(v) => {
            warn!(action, error = %v, "input rejected");
            v.to_string()
        }
        StoreError::NotFound => {
            warn!(action, "record not found");
            "Not found".to_string()
        }
        StoreError::NotAnArtist(email) => {
            warn!(action, email = %email, "not an artist");
            "Only artists can list artworks".to_string()
        }
        other => {
            error!(action, error = %other, "storage failure");
            format!("Could not {action}, please try again")
        }
    }
}
