//! Filesystem path helpers for the route loader
//!
//! Discovered files are absolute (or root-prefixed) OS paths; routes are built
//! from forward-slash strings relative to the view root. These helpers do the
//! conversion. They never touch the filesystem.

use std::path::{Component, Path, PathBuf};

use crate::error::DiscoveryError;

/// Strips `root` from `path`, ignoring `.` components on either side
///
/// Returns `None` when `path` does not live under `root`.
///
/// # Examples
///
/// ```
/// use fsrouter::path::relative_to;
/// use std::path::Path;
///
/// let rel = relative_to(Path::new("views/blog/post.html"), Path::new("./views"));
/// assert_eq!(rel.as_deref(), Some(Path::new("blog/post.html")));
///
/// assert!(relative_to(Path::new("other/post.html"), Path::new("views")).is_none());
/// ```
pub fn relative_to(path: &Path, root: &Path) -> Option<PathBuf> {
    let path = without_cur_dir(path);
    let root = without_cur_dir(root);

    path.strip_prefix(&root).ok().map(Path::to_path_buf)
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Joins the components of a relative path with `/`
///
/// Gives the same string on every platform, so route patterns do not depend
/// on the OS separator.
///
/// # Examples
///
/// ```
/// use fsrouter::path::to_route_path;
/// use std::path::PathBuf;
///
/// let path: PathBuf = ["blog", "[slug].html"].iter().collect();
/// assert_eq!(to_route_path(&path).unwrap(), "blog/[slug].html");
/// ```
pub fn to_route_path(relative: &Path) -> Result<String, DiscoveryError> {
    let segments = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(
                segment
                    .to_str()
                    .ok_or_else(|| DiscoveryError::NonUtf8Path(relative.to_path_buf())),
            ),
            Component::ParentDir => Some(Ok("..")),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(segments.join("/"))
}
