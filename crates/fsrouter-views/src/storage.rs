//! Where template sources come from
//!
//! The cache asks a [`ViewStorage`] for raw source text by view identifier.
//! [`FsStorage`] reads from disk; tests plug in their own.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Source of raw template text
pub trait ViewStorage: Send + Sync {
    /// Reads the full source of `view`.
    fn read(&self, view: &str) -> io::Result<String>;
}

/// Reads views from the filesystem
///
/// Identifiers are file paths, resolved against `base_dir` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FsStorage {
    base_dir: Option<PathBuf>,
}

impl FsStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Path the identifier maps to on disk
    pub fn resolve(&self, view: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(view),
            None => PathBuf::from(view),
        }
    }
}

impl ViewStorage for FsStorage {
    fn read(&self, view: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(view))
    }
}

impl<S: ViewStorage + ?Sized> ViewStorage for std::sync::Arc<S> {
    fn read(&self, view: &str) -> io::Result<String> {
        (**self).read(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_without_base() {
        let storage = FsStorage::new();
        assert_eq!(storage.resolve("views/a.html"), PathBuf::from("views/a.html"));
        assert!(storage.base_dir().is_none());
    }

    #[test]
    fn test_resolve_with_base() {
        let storage = FsStorage::with_base_dir("/srv/views");
        assert_eq!(
            storage.resolve("blog/[slug].html"),
            Path::new("/srv/views").join("blog/[slug].html")
        );
    }

    #[test]
    fn test_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.html"), "<p>a</p>").unwrap();

        let storage = FsStorage::with_base_dir(dir.path());
        assert_eq!(storage.read("a.html").unwrap(), "<p>a</p>");

        let err = storage.read("missing.html").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_shared_storage() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.html"), "b").unwrap();

        let shared: std::sync::Arc<dyn ViewStorage> =
            std::sync::Arc::new(FsStorage::with_base_dir(dir.path()));
        let cache = crate::TemplateCache::with_storage(shared, false);
        let template = cache.template("b.html").unwrap();
        assert_eq!(template.render_to_string(&serde_json::json!({})).unwrap(), "b");
    }
}
