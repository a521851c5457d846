//! Fixtures shared by the store's unit tests.

use artfolio_shared::types::Role;

use crate::database::Database;
use crate::models::{ArtworkDraft, NewUser};

pub fn test_db() -> Database {
    Database::open_in_memory().expect("in-memory database")
}

pub fn new_user(email: &str, password: &str, role: Role) -> NewUser {
    NewUser {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: email.into(),
        password: password.into(),
        mobile: "555-0100".into(),
        role,
    }
}

/// Register `email` with password `pw`.
pub fn register(db: &Database, email: &str, role: Role, mobile: &str) {
    let mut user = new_user(email, "pw", role);
    user.mobile = mobile.into();
    assert!(db.register_user(&user).unwrap(), "{email} already registered");
}

pub fn draft(title: &str, original: f64, discounted: Option<f64>) -> ArtworkDraft {
    ArtworkDraft {
        title: title.into(),
        description: format!("{title}, oil on canvas"),
        image_path: format!("/images/{}.jpg", title.to_lowercase()),
        medium: "oil".into(),
        style: "impressionist".into(),
        theme: "landscape".into(),
        image_width: 1920,
        image_height: 1080,
        original_price: original,
        discounted_price: discounted,
    }
}
