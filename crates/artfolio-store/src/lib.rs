//! # artfolio-store
//!
//! Local storage for the Artfolio marketplace, backed by a single SQLite file.
//!
//! The crate exposes a synchronous [`Database`] handle that owns one
//! long-lived `rusqlite::Connection` and provides typed helpers for the
//! catalog (artworks), identity (users and profiles) and the ledger
//! (wishlist and purchase history).  Picked images are copied into an
//! [`ImageStore`] and referenced by path.

pub mod artworks;
pub mod config;
pub mod database;
pub mod images;
pub mod migrations;
pub mod models;
pub mod purchases;
pub mod users;
pub mod wishlist;

mod error;
#[cfg(test)]
mod testutil;

pub use config::StoreConfig;
pub use database::Database;
pub use error::{Result, StoreError};
pub use images::ImageStore;
pub use migrations::MigrationPolicy;
pub use purchases::parse_purchase_date;
pub use models::*;
