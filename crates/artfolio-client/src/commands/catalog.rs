use std::path::Path;
use std::sync::Mutex;

use artfolio_shared::types::Role;
use artfolio_store::{Artwork, ArtworkDraft, ArtworkWithPhone, StoreError, WriteOutcome};
use tracing::{error, info, warn};

use crate::commands::user_message;
use crate::state::AppState;

/// List a new artwork for the signed-in artist.  The picked image is copied
/// into the image store first; `draft.image_path` is overwritten.
pub fn upload_artwork(
    state: &Mutex<AppState>,
    mut draft: ArtworkDraft,
    image_source: &Path,
) -> Result<i64, String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let session = guard.session_as(Role::Artist)?;
    let db = guard.db()?;
    let images = guard.images()?;

    let stored = images
        .import(image_source)
        .map_err(|e| user_message("save image", e))?;
    draft.image_path = stored.to_string_lossy().into_owned();

    match db.add_artwork(&draft, &session.email) {
        Ok(id) => {
            info!(artwork_id = id, title = %draft.title, "artwork uploaded");
            Ok(id)
        }
        Err(e) => {
            if let Err(cleanup) = images.remove(&stored) {
                warn!(error = %cleanup, path = %stored.display(), "orphaned image left behind");
            }
            Err(user_message("add artwork", e))
        }
    }
}

/// What the signed-in user's home screen shows: an artist's own works, or
/// the whole catalog for buyers and signed-out visitors.
pub fn browse_artworks(state: &Mutex<AppState>) -> Vec<ArtworkWithPhone> {
    let Ok(guard) = state.lock() else {
        return Vec::new();
    };
    let Ok(db) = guard.db() else {
        return Vec::new();
    };

    let result = match &guard.session {
        Some(session) => db.list_artworks(session.role, Some(&session.email)),
        None => db.list_artworks(Role::Buyer, None),
    };
    result.unwrap_or_else(|e| {
        error!(error = %e, "failed to list artworks");
        Vec::new()
    })
}

/// Save edits to one of the signed-in artist's works.  When `new_image` is
/// given it replaces the stored image.
pub fn edit_artwork(
    state: &Mutex<AppState>,
    mut artwork: Artwork,
    new_image: Option<&Path>,
) -> Result<(), String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let session = guard.session_as(Role::Artist)?;
    let db = guard.db()?;

    let existing = owned_artwork(&guard, &session.email, artwork.id)?;

    let images = guard.images()?;
    let imported = match new_image {
        Some(source) => {
            let stored = images
                .import(source)
                .map_err(|e| user_message("save image", e))?;
            artwork.draft.image_path = stored.to_string_lossy().into_owned();
            Some(stored)
        }
        None => {
            if artwork.draft.image_path.is_empty() {
                artwork.draft.image_path = existing.draft.image_path.clone();
            }
            None
        }
    };

    let result = match db.update_artwork(&artwork) {
        Ok(WriteOutcome::Applied) => {
            info!(artwork_id = artwork.id, "artwork edited");
            if artwork.draft.image_path != existing.draft.image_path {
                discard_image(&guard, &existing.draft.image_path);
            }
            return Ok(());
        }
        Ok(WriteOutcome::NotFound) => Err("Artwork no longer exists".to_string()),
        Err(e) => Err(user_message("update artwork", e)),
    };

    if let Some(stored) = imported {
        if let Err(e) = images.remove(&stored) {
            warn!(error = %e, path = %stored.display(), "orphaned image left behind");
        }
    }
    result
}

/// Delete one of the signed-in artist's works together with its image.
pub fn remove_artwork(state: &Mutex<AppState>, artwork_id: i64) -> Result<(), String> {
    let guard = state.lock().map_err(|e| format!("Lock poisoned: {e}"))?;
    let session = guard.session_as(Role::Artist)?;
    let db = guard.db()?;

    let existing = owned_artwork(&guard, &session.email, artwork_id)?;

    match db.delete_artwork(artwork_id) {
        Ok(WriteOutcome::Applied) => {
            info!(artwork_id, "artwork deleted");
            discard_image(&guard, &existing.draft.image_path);
            Ok(())
        }
        Ok(WriteOutcome::NotFound) => Err("Artwork no longer exists".to_string()),
        Err(e) => Err(user_message("delete artwork", e)),
    }
}

/// The signed-in artist's sold works, one entry per sale.
pub fn my_past_sales(state: &Mutex<AppState>) -> Vec<ArtworkWithPhone> {
    let Ok(guard) = state.lock() else {
        return Vec::new();
    };
    let (Ok(session), Ok(db)) = (guard.session_as(Role::Artist), guard.db()) else {
        return Vec::new();
    };

    db.past_sales(&session.email).unwrap_or_else(|e| {
        error!(error = %e, "failed to load past sales");
        Vec::new()
    })
}

/// Fetch `artwork_id`, refusing works owned by someone else.
fn owned_artwork(guard: &AppState, email: &str, artwork_id: i64) -> Result<Artwork, String> {
    let existing = match guard.db()?.get_artwork(artwork_id) {
        Ok(found) => found.artwork,
        Err(StoreError::NotFound) => return Err("Artwork no longer exists".to_string()),
        Err(e) => return Err(user_message("load artwork", e)),
    };
    if existing.artist_email != email {
        warn!(artwork_id, email, "artwork owned by someone else");
        return Err("You can only change your own artworks".to_string());
    }
    Ok(existing)
}

fn discard_image(guard: &AppState, path: &str) {
    let Ok(images) = guard.images() else {
        return;
    };
    let path = Path::new(path);
    if !path.starts_with(images.base_path()) {
        return;
    }
    if let Err(e) = images.remove(path) {
        warn!(error = %e, path = %path.display(), "could not remove image");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::identity::{sign_in, sign_out, sign_up};
    use crate::state::testutil::{draft, open_state, picked_image, signed_in, signup};

    #[test]
    fn test_upload_and_browse() {
        let (state, dir) = open_state();
        signed_in(&state, "a@x.com", Role::Artist);

        let id = upload_artwork(&state, draft("Sunset"), &picked_image(&dir, "s.jpg")).unwrap();

        let listed = browse_artworks(&state);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), id);
        assert_eq!(listed[0].artwork.draft.discounted_price, Some(80.0));
        assert_eq!(listed[0].artist_phone, "555-0100");

        let stored = Path::new(&listed[0].artwork.draft.image_path);
        assert!(stored.exists());
        assert!(stored.starts_with(dir.path().join("images")));
    }

    #[test]
    fn test_buyers_cannot_upload() {
        let (state, dir) = open_state();
        signed_in(&state, "b@x.com", Role::Buyer);

        let err = upload_artwork(&state, draft("Nope"), &picked_image(&dir, "n.jpg")).unwrap_err();
        assert_eq!(err, "Only artists can do that");
        assert!(browse_artworks(&state).is_empty());
    }

    #[test]
    fn test_invalid_draft_cleans_up_image() {
        let (state, dir) = open_state();
        signed_in(&state, "a@x.com", Role::Artist);

        let mut bad = draft("Greedy");
        bad.discounted_price = Some(500.0);
        assert!(upload_artwork(&state, bad, &picked_image(&dir, "g.jpg")).is_err());

        let leftover = std::fs::read_dir(dir.path().join("images")).unwrap().count();
        assert_eq!(leftover, 0);
    }

    #[test]
    fn test_artists_browse_only_their_own() {
        let (state, dir) = open_state();
        signed_in(&state, "a@x.com", Role::Artist);
        upload_artwork(&state, draft("Mine"), &picked_image(&dir, "m.jpg")).unwrap();

        sign_out(&state).unwrap();
        signed_in(&state, "c@x.com", Role::Artist);
        upload_artwork(&state, draft("Theirs"), &picked_image(&dir, "t.jpg")).unwrap();
        assert_eq!(browse_artworks(&state).len(), 1);

        sign_out(&state).unwrap();
        assert_eq!(browse_artworks(&state).len(), 2);
    }

    #[test]
    fn test_edit_own_artwork() {
        let (state, dir) = open_state();
        signed_in(&state, "a@x.com", Role::Artist);
        let id = upload_artwork(&state, draft("Sunset"), &picked_image(&dir, "s.jpg")).unwrap();
        let mut artwork = browse_artworks(&state)[0].artwork.clone();
        let old_image = artwork.draft.image_path.clone();

        artwork.draft.title = "Sunrise".into();
        edit_artwork(&state, artwork.clone(), None).unwrap();
        assert_eq!(browse_artworks(&state)[0].artwork.draft.title, "Sunrise");
        assert_eq!(browse_artworks(&state)[0].artwork.draft.image_path, old_image);

        edit_artwork(&state, artwork, Some(&picked_image(&dir, "new.png"))).unwrap();
        let updated = &browse_artworks(&state)[0];
        assert_eq!(updated.id(), id);
        assert!(updated.artwork.draft.image_path.ends_with(".png"));
        assert!(!Path::new(&old_image).exists());
    }

    #[test]
    fn test_rejected_edit_cleans_up_new_image() {
        let (state, dir) = open_state();
        signed_in(&state, "a@x.com", Role::Artist);
        upload_artwork(&state, draft("Sunset"), &picked_image(&dir, "s.jpg")).unwrap();
        let mut artwork = browse_artworks(&state)[0].artwork.clone();
        let kept_image = artwork.draft.image_path.clone();

        artwork.draft.discounted_price = Some(999.0);
        let err = edit_artwork(&state, artwork, Some(&picked_image(&dir, "new.png"))).unwrap_err();
        assert!(err.contains("999"), "{err}");

        let stored: Vec<_> = std::fs::read_dir(dir.path().join("images"))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(stored, vec![std::path::PathBuf::from(&kept_image)]);
        assert_eq!(browse_artworks(&state)[0].artwork.draft.image_path, kept_image);
    }

    #[test]
    fn test_cannot_touch_someone_elses_artwork() {
        let (state, dir) = open_state();
        signed_in(&state, "a@x.com", Role::Artist);
        let id = upload_artwork(&state, draft("Sunset"), &picked_image(&dir, "s.jpg")).unwrap();
        let artwork = browse_artworks(&state)[0].artwork.clone();

        sign_out(&state).unwrap();
        assert!(sign_up(&state, signup("Eve", "e@x.com", Role::Artist)));
        sign_in(&state, "e@x.com", "pw").unwrap();

        assert!(edit_artwork(&state, artwork, None).is_err());
        assert!(remove_artwork(&state, id).is_err());
    }

    #[test]
    fn test_remove_artwork() {
        let (state, dir) = open_state();
        signed_in(&state, "a@x.com", Role::Artist);
        let id = upload_artwork(&state, draft("Sunset"), &picked_image(&dir, "s.jpg")).unwrap();
        let image = browse_artworks(&state)[0].artwork.draft.image_path.clone();

        remove_artwork(&state, id).unwrap();
        assert!(browse_artworks(&state).is_empty());
        assert!(!Path::new(&image).exists());
        assert_eq!(remove_artwork(&state, id).unwrap_err(), "Artwork no longer exists");
    }
}
