//! Route list loading
//!
//! [`FsRouter`] walks a view directory through a [`DiscoverySource`], sorts
//! what it finds and parses every file into a [`Route`]. Each call recomputes
//! the list from scratch; callers that want a snapshot keep the returned `Vec`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::RoutingConfig;
use crate::error::DiscoveryError;
use crate::path::{relative_to, to_route_path};
use crate::preset::{Preset, TemplatePreset};
use crate::route::parser::{parse_route_with, ParseOptions};
use crate::Route;

/// Glob used when none is configured: every `.html` file, recursively.
pub const DEFAULT_INCLUDE_PATTERN: &str = "**/*.html";

/// Enumerates candidate view files under a root directory
///
/// Implementations return paths that start with `root`. Order does not
/// matter; the loader sorts.
pub trait DiscoverySource {
    fn enumerate(&self, root: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError>;
}

/// [`DiscoverySource`] backed by the `glob` crate
///
/// Supports `**` recursion and the usual `*`, `?`, `[...]` wildcards in the
/// include pattern. The root itself is matched literally, so a root such as
/// `views/[tenant]` works. Directories are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobDiscovery;

impl DiscoverySource for GlobDiscovery {
    fn enumerate(&self, root: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
        if !root.is_dir() {
            return Err(DiscoveryError::RootNotFound(root.to_path_buf()));
        }

        let root_str = root
            .to_str()
            .ok_or_else(|| DiscoveryError::NonUtf8Path(root.to_path_buf()))?;

        let full_pattern = format!(
            "{}/{}",
            glob::Pattern::escape(root_str.trim_end_matches('/')),
            pattern.trim_start_matches('/')
        );

        let entries = glob::glob(&full_pattern).map_err(|source| DiscoveryError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        entries
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(Ok(path)),
                Ok(_) => None,
                Err(err) => Some(Err(DiscoveryError::Walk(err))),
            })
            .collect()
    }
}

/// File-system router: view directory + preset → ordered route list
///
/// # Examples
///
/// ```no_run
/// use fsrouter::{FsRouter, TemplatePreset};
///
/// let router = FsRouter::new("views", TemplatePreset::chi());
/// for route in router.load_routes()? {
///     println!("{} -> {}", route.pattern, route.source_path);
/// }
/// # Ok::<(), fsrouter::DiscoveryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FsRouter {
    root: PathBuf,
    include_pattern: String,
    preset: Arc<dyn Preset>,
    options: ParseOptions,
}

impl FsRouter {
    /// Creates a router over `root` with the default include pattern and extensions
    pub fn new(root: impl Into<PathBuf>, preset: impl Preset + 'static) -> Self {
        Self::with_shared_preset(root, Arc::new(preset))
    }

    /// Creates a router that shares an already-built preset
    pub fn with_shared_preset(root: impl Into<PathBuf>, preset: Arc<dyn Preset>) -> Self {
        Self {
            root: root.into(),
            include_pattern: DEFAULT_INCLUDE_PATTERN.to_string(),
            preset,
            options: ParseOptions::default(),
        }
    }

    /// Creates a router from the `[routing]` configuration section
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.root.clone(), config.preset.build())
            .with_include_pattern(config.include_pattern.clone())
            .with_extensions(&config.extensions)
    }

    /// Replaces the include glob (relative to the root)
    pub fn with_include_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.include_pattern = pattern.into();
        self
    }

    /// Replaces the extensions stripped during suffix normalization
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options = ParseOptions::with_extensions(extensions);
        self
    }

    /// Replaces the preset
    pub fn with_preset(mut self, preset: impl Preset + 'static) -> Self {
        self.preset = Arc::new(preset);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn include_pattern(&self) -> &str {
        &self.include_pattern
    }

    pub fn preset(&self) -> &dyn Preset {
        self.preset.as_ref()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses one path relative to the root with this router's preset and options
    pub fn parse_route(&self, relative_path: &str) -> Route {
        parse_route_with(relative_path, self.preset.as_ref(), &self.options)
    }

    /// Loads every route under the root using [`GlobDiscovery`]
    pub fn load_routes(&self) -> Result<Vec<Route>, DiscoveryError> {
        self.load_routes_from(&GlobDiscovery)
    }

    /// Loads every route under the root using a custom discovery source
    ///
    /// Paths are sorted byte-wise before parsing so the result does not
    /// depend on filesystem iteration order. Any failure aborts the whole
    /// load.
    pub fn load_routes_from<D>(&self, source: &D) -> Result<Vec<Route>, DiscoveryError>
    where
        D: DiscoverySource + ?Sized,
    {
        let mut matches = source.enumerate(&self.root, &self.include_pattern)?;
        matches.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        let routes = matches
            .iter()
            .map(|path| self.route_for(path))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            root = %self.root.display(),
            pattern = %self.include_pattern,
            count = routes.len(),
            "loaded file-system routes"
        );

        Ok(routes)
    }

    fn route_for(&self, path: &Path) -> Result<Route, DiscoveryError> {
        let relative = relative_to(path, &self.root).ok_or_else(|| DiscoveryError::OutsideRoot {
            path: path.to_path_buf(),
            root: self.root.clone(),
        })?;

        let route = self.parse_route(&to_route_path(&relative)?);
        debug!(pattern = %route.pattern, source = %route.source_path, "parsed route");

        let duplicates = route.duplicate_params();
        if !duplicates.is_empty() {
            warn!(
                source = %route.source_path,
                params = ?duplicates,
                "route declares the same parameter more than once"
            );
        }

        Ok(route)
    }
}

impl Default for FsRouter {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}
