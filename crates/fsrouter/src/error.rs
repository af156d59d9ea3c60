//! Error types for route discovery and preset construction
//!
//! Parsing a single path never fails, so the only fallible operations in this
//! crate are enumerating the view tree and building a custom preset.

use std::path::PathBuf;

/// Failure while enumerating view files or rooting them.
///
/// Any of these aborts `FsRouter::load_routes` as a whole; no partial route
/// list is ever returned.
#[derive(thiserror::Error, Debug)]
pub enum DiscoveryError {
    /// The root directory does not exist or is not a directory.
    #[error("view root {0:?} is not a readable directory")]
    RootNotFound(PathBuf),

    /// The include pattern is not a valid glob.
    #[error("invalid include pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// An entry could not be read while walking the tree.
    #[error("failed to walk view tree: {0}")]
    Walk(#[from] glob::GlobError),

    /// A discovered path does not live under the configured root.
    #[error("discovered path {path:?} is not under root {root:?}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// A path (or the root) is not valid UTF-8 and cannot become a URL.
    #[error("path {0:?} is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    /// Failure reported by a custom discovery source.
    #[error("discovery source failed: {0}")]
    Source(String),
}

impl DiscoveryError {
    /// Build a [`DiscoveryError::Source`] value.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }
}

/// Failure while building a preset.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    /// A replacement template has the wrong number of `$name` placeholders.
    #[error("template {template:?} must contain {expected} `$name` placeholder(s), found {found}")]
    PlaceholderCount {
        template: String,
        expected: &'static str,
        found: usize,
    },

    /// No built-in preset has this name.
    #[error("unknown preset {0:?} (expected one of: fiber, chi, axum)")]
    UnknownPreset(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_outside_root() {
        let err = DiscoveryError::OutsideRoot {
            path: PathBuf::from("/elsewhere/a.html"),
            root: PathBuf::from("/views"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/elsewhere/a.html"));
        assert!(msg.contains("/views"));
    }

    #[test]
    fn test_custom_helper() {
        let err = DiscoveryError::custom("disk on fire");
        assert!(matches!(err, DiscoveryError::Source(ref m) if m == "disk on fire"));
    }

    #[test]
    fn test_display_unknown_preset() {
        let err = PresetError::UnknownPreset("gin".to_string());
        assert_eq!(
            err.to_string(),
            "unknown preset \"gin\" (expected one of: fiber, chi, axum)"
        );
    }
}
