//! Local image files for artworks and avatars.
//!
//! Picked images are copied into the store directory under a fresh UUID
//! name; the database only ever holds the resulting path.  Image bytes are
//! never decoded here.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, StoreError};

#[derive(Debug, Clone)]
pub struct ImageStore {
    base_path: PathBuf,
}

impl ImageStore {
    pub fn new(base_path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_path)?;
        info!(path = %base_path.display(), "image store initialized");
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Copy `source` into the store and return the stored path.
    ///
    /// The extension is kept (lowercased) so viewers can sniff the type.
    pub fn import(&self, source: &Path) -> Result<PathBuf> {
        let metadata = std::fs::metadata(source)?;
        if !metadata.is_file() || metadata.len() == 0 {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a non-empty image file: {}", source.display()),
            )));
        }

        let mut file_name = Uuid::new_v4().to_string();
        if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
            file_name.push('.');
            file_name.push_str(&ext.to_ascii_lowercase());
        }

        let target = self.base_path.join(file_name);
        let bytes = std::fs::copy(source, &target)?;

        debug!(
            source = %source.display(),
            target = %target.display(),
            bytes,
            "image imported"
        );
        Ok(target)
    }

    /// Delete a previously imported image.  Returns `false` if it was
    /// already gone.  Paths outside the store are refused.
    pub fn remove(&self, path: &Path) -> Result<bool> {
        let target = self.ensure_within(path)?;
        match std::fs::remove_file(&target) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn ensure_within(&self, path: &Path) -> Result<PathBuf> {
        let traversal = || {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("path outside image store: {}", path.display()),
            ))
        };

        let relative = path.strip_prefix(&self.base_path).map_err(|_| traversal())?;
        let mut components = relative.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.base_path.join(name)),
            _ => Err(traversal()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (ImageStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ImageStore::new(dir.path().join("images")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_import_copies_file() {
        let (store, dir) = test_store();
        let source = dir.path().join("Sunset.JPG");
        std::fs::write(&source, b"jpeg-bytes").unwrap();

        let stored = store.import(&source).unwrap();
        assert!(stored.starts_with(store.base_path()));
        assert_eq!(stored.extension().unwrap(), "jpg");
        assert_eq!(std::fs::read(&stored).unwrap(), b"jpeg-bytes");
        // The source is left in place.
        assert!(source.exists());
    }

    #[test]
    fn test_imports_get_distinct_names() {
        let (store, dir) = test_store();
        let source = dir.path().join("a.png");
        std::fs::write(&source, b"png").unwrap();

        assert_ne!(store.import(&source).unwrap(), store.import(&source).unwrap());
    }

    #[test]
    fn test_empty_or_missing_source_rejected() {
        let (store, dir) = test_store();
        let empty = dir.path().join("empty.png");
        std::fs::write(&empty, b"").unwrap();

        assert!(store.import(&empty).is_err());
        assert!(store.import(&dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn test_remove() {
        let (store, dir) = test_store();
        let source = dir.path().join("a.png");
        std::fs::write(&source, b"png").unwrap();
        let stored = store.import(&source).unwrap();

        assert!(store.remove(&stored).unwrap());
        assert!(!stored.exists());
        assert!(!store.remove(&stored).unwrap());
    }

    #[test]
    fn test_remove_outside_store_refused() {
        let (store, dir) = test_store();
        let outside = dir.path().join("a.png");
        std::fs::write(&outside, b"png").unwrap();

        assert!(store.remove(&outside).is_err());
        assert!(store
            .remove(&store.base_path().join("..").join("a.png"))
            .is_err());
        assert!(outside.exists());
    }
}
