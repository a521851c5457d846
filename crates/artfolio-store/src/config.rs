//! Store configuration loaded from environment variables.
//!
//! Everything has a default so the catalog can start with zero
//! configuration: the database and images live in the platform data
//! directory.

use std::path::{Path, PathBuf};

use artfolio_shared::constants::{DATABASE_FILE_NAME, IMAGE_DIR_NAME};
use directories::ProjectDirs;

use crate::error::{Result, StoreError};
use crate::migrations::MigrationPolicy;

/// Where the catalog keeps its files and how it treats old schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file.
    /// Env: `ARTFOLIO_DB_PATH`
    /// Default: `<data dir>/ArtGallery.db`
    pub db_path: PathBuf,

    /// Directory that picked images are copied into.
    /// Env: `ARTFOLIO_IMAGE_DIR`
    /// Default: `<data dir>/images`
    pub image_dir: PathBuf,

    /// Whether an outdated schema may be dropped and recreated.
    /// Env: `ARTFOLIO_DESTRUCTIVE_MIGRATION` (true/false)
    /// Default: `false` (additive migrations only)
    pub migration_policy: MigrationPolicy,
}

impl StoreConfig {
    /// Lay everything out under one directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DATABASE_FILE_NAME),
            image_dir: dir.join(IMAGE_DIR_NAME),
            migration_policy: MigrationPolicy::Additive,
        }
    }

    /// The platform-appropriate data directory:
    /// - Linux:   `~/.local/share/artfolio`
    /// - macOS:   `~/Library/Application Support/com.artfolio.artfolio`
    /// - Windows: `{FOLDERID_RoamingAppData}\artfolio\artfolio\data`
    pub fn default_data_dir() -> Result<PathBuf> {
        let project_dirs =
            ProjectDirs::from("com", "artfolio", "artfolio").ok_or(StoreError::NoDataDir)?;
        Ok(project_dirs.data_dir().to_path_buf())
    }

    /// Load configuration from environment variables, falling back to the
    /// platform data directory.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup("ARTFOLIO_DB_PATH").filter(|v| !v.is_empty());
        let image_dir = lookup("ARTFOLIO_IMAGE_DIR").filter(|v| !v.is_empty());

        let mut config = match (&db_path, &image_dir) {
            (Some(_), Some(_)) => Self::in_dir(Path::new(".")),
            _ => Self::in_dir(&Self::default_data_dir()?),
        };

        if let Some(path) = db_path {
            config.db_path = PathBuf::from(path);
        }
        if let Some(dir) = image_dir {
            config.image_dir = PathBuf::from(dir);
        }

        if let Some(val) = lookup("ARTFOLIO_DESTRUCTIVE_MIGRATION") {
            config.migration_policy = if val == "true" || val == "1" {
                MigrationPolicy::RecreateOnMismatch
            } else {
                MigrationPolicy::Additive
            };
        }

        tracing::debug!(?config, "loaded store configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_in_dir_layout() {
        let config = StoreConfig::in_dir(Path::new("/data"));
        assert_eq!(config.db_path, PathBuf::from("/data/ArtGallery.db"));
        assert_eq!(config.image_dir, PathBuf::from("/data/images"));
        assert_eq!(config.migration_policy, MigrationPolicy::Additive);
    }

    #[test]
    fn test_env_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("ARTFOLIO_DB_PATH", "/tmp/a.db"),
            ("ARTFOLIO_IMAGE_DIR", "/tmp/img"),
            ("ARTFOLIO_DESTRUCTIVE_MIGRATION", "true"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/a.db"));
        assert_eq!(config.image_dir, PathBuf::from("/tmp/img"));
        assert_eq!(config.migration_policy, MigrationPolicy::RecreateOnMismatch);
    }

    #[test]
    fn test_destructive_migration_off_unless_asked() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("ARTFOLIO_DB_PATH", "/tmp/a.db"),
            ("ARTFOLIO_IMAGE_DIR", "/tmp/img"),
            ("ARTFOLIO_DESTRUCTIVE_MIGRATION", "yes please"),
        ]))
        .unwrap();
        assert_eq!(config.migration_policy, MigrationPolicy::Additive);
    }
}
