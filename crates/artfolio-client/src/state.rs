//! Application state shared across all commands.
//!
//! The [`AppState`] struct is wrapped in a `Mutex` by the host so that every
//! command sees one database handle and one session.

use artfolio_shared::types::Role;
use artfolio_store::{AuthenticatedUser, Database, ImageStore, StoreConfig, StoreError};

/// Central application state.
pub struct AppState {
    /// Handle to the catalog database, opened once at start-up.
    /// `None` only for a state built with [`AppState::new`].
    pub database: Option<Database>,

    /// Where picked images are copied to.
    pub images: Option<ImageStore>,

    /// The signed-in user.  `None` until sign-in succeeds.
    pub session: Option<AuthenticatedUser>,
}

impl AppState {
    /// Create a new, uninitialised application state.
    pub fn new() -> Self {
        Self {
            database: None,
            images: None,
            session: None,
        }
    }

    /// Open the database and image store described by `config`.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let database = Database::open(config)?;
        let images = ImageStore::new(config.image_dir.clone())?;
        Ok(Self {
            database: Some(database),
            images: Some(images),
            session: None,
        })
    }

    pub(crate) fn db(&self) -> Result<&Database, String> {
        self.database
            .as_ref()
            .ok_or_else(|| "Database not opened".to_string())
    }

    pub(crate) fn images(&self) -> Result<&ImageStore, String> {
        self.images
            .as_ref()
            .ok_or_else(|| "Image store not opened".to_string())
    }

    pub(crate) fn session(&self) -> Result<&AuthenticatedUser, String> {
        self.session
            .as_ref()
            .ok_or_else(|| "Please sign in first".to_string())
    }

    /// The session, provided it has `role`.
    pub(crate) fn session_as(&self, role: Role) -> Result<&AuthenticatedUser, String> {
        let session = self.session()?;
        if session.role != role {
            return Err(format!("Only {role}s can do that"));
        }
        Ok(session)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
