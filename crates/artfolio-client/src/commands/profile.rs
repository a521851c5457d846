use std::path::Path;
use std::sync::Mutex;

use artfolio_shared::types::Role;
use artfolio_store::{Profile, WriteOutcome};
use tracing::{info, warn};

use crate::commands::user_message;
use crate::state::AppState;

/// Anyone may look at a profile; signing in is not required.
pub fn view_profile(state: &Mutex<AppState>, email: &str) -> Result<Profile, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    guard
        .db()?
        .get_profile(email)
        .map_err(|e| user_message("load profile", e))
}

pub fn update_my_profile(
    state: &Mutex<AppState>,
    bio: &str,
    social_links: &str,
) -> Result<(), String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let session = guard.session_as(Role::Artist)?;

    match guard
        .db()?
        .update_profile(&session.email, bio, social_links)
        .map_err(|e| user_message("update profile", e))?
    {
        WriteOutcome::Applied => {
            info!(email = %session.email, "profile updated");
            Ok(())
        }
        WriteOutcome::NotFound => Err("Account no longer exists".to_string()),
    }
}

/// Replace the signed-in user's avatar with a copy of `image_source`.
/// Returns the stored path.
pub fn change_avatar(state: &Mutex<AppState>, image_source: &Path) -> Result<String, String> {
    let mut guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let (email, previous) = {
        let session = guard.session()?;
        (session.email.clone(), session.avatar_path.clone())
    };

    let images = guard.images()?;
    let stored = images
        .import(image_source)
        .map_err(|e| user_message("save image", e))?;
    let stored_path = stored.to_string_lossy().into_owned();

    let outcome = guard
        .db()?
        .update_avatar(&email, &stored_path)
        .map_err(|e| user_message("update avatar", e));
    if !outcome.as_ref().is_ok_and(WriteOutcome::is_applied) {
        if let Err(e) = images.remove(&stored) {
            warn!(error = %e, "orphaned avatar left behind");
        }
        return match outcome {
            Err(message) => Err(message),
            Ok(_) => Err("Account no longer exists".to_string()),
        };
    }

    if let Some(old) = previous.as_deref().map(Path::new) {
        if old.starts_with(images.base_path()) {
            if let Err(e) = images.remove(old) {
                warn!(error = %e, path = %old.display(), "could not remove old avatar");
            }
        }
    }

    info!(email = %email, "avatar changed");
    if let Some(session) = guard.session.as_mut() {
        session.avatar_path = Some(stored_path.clone());
    }
    Ok(stored_path)
}
