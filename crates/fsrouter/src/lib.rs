//! # fsrouter
//!
//! File-system routing for Rust web stacks. A directory of view files becomes
//! an ordered list of route definitions:
//!
//! - Static files (`about.html` → `/about`)
//! - Index files (`blog/index.html` → `/blog/`)
//! - Single parameters (`users/[id].html` → `/users/:id`)
//! - Catch-all parameters (`docs/[...path].html` → `/docs/*`)
//!
//! The placeholder syntax of the output is chosen by a [`Preset`], so the
//! same view tree can feed Fiber-, chi- or axum-style routers.
//!
//! This crate only produces route *definitions*. Registering them with a
//! router and dispatching requests is the host's job; [`Route::extract_map`],
//! [`Route::realize`] and [`Route::url`] bridge the host's parameters back.
//!
//! ## Example
//!
//! ```
//! use fsrouter::{Route, TemplatePreset};
//! use std::collections::HashMap;
//!
//! let route = Route::from_path("blog/[slug].html", &TemplatePreset::chi());
//! assert_eq!(route.pattern, "/blog/{slug}");
//!
//! let params = HashMap::from([("slug".to_string(), "hello".to_string())]);
//! assert_eq!(route.url(&params), "/blog/hello");
//! assert_eq!(route.realize(&params), "blog/hello.html");
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
pub mod loader;
pub mod path;
pub mod preset;
pub mod route;

pub use config::{Config, RoutingConfig, ViewsConfig};
pub use error::{DiscoveryError, PresetError};
pub use loader::{DiscoverySource, FsRouter, GlobDiscovery, DEFAULT_INCLUDE_PATTERN};
pub use preset::{Preset, PresetKind, TemplatePreset};
pub use route::parser::{parse_route, parse_route_with, ParseOptions};
pub use route::pattern::{ParamToken, Token};

use route::pattern::tokenize;

// ============================================================================
// Core Types
// ============================================================================

/// A parameter declared in a view path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteParam {
    /// Identifier inside the brackets (ASCII letters and digits)
    pub name: String,
    /// `true` for `[...name]`, `false` for `[name]`
    pub is_nested: bool,
}

impl RouteParam {
    /// A `[name]` parameter
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_nested: false,
        }
    }

    /// A `[...name]` parameter
    pub fn nested(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_nested: true,
        }
    }

    /// The bracket token as written in the file name
    ///
    /// ```
    /// use fsrouter::RouteParam;
    ///
    /// assert_eq!(RouteParam::single("id").token(), "[id]");
    /// assert_eq!(RouteParam::nested("rest").token(), "[...rest]");
    /// ```
    pub fn token(&self) -> String {
        if self.is_nested {
            format!("[...{}]", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }

    fn matches(&self, token: &ParamToken<'_>) -> bool {
        self.name == token.name() && self.is_nested == token.is_nested()
    }
}

impl From<ParamToken<'_>> for RouteParam {
    fn from(token: ParamToken<'_>) -> Self {
        Self {
            name: token.name().to_string(),
            is_nested: token.is_nested(),
        }
    }
}

/// One parsed view file
///
/// Immutable once built; the loader rebuilds the whole list on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Router-ready pattern like "/users/:id"
    pub pattern: String,
    /// Declared parameters, left to right as they appear in the path
    pub params: Vec<RouteParam>,
    /// The view path relative to the root, as discovered
    pub source_path: String,
    /// Absolute, suffix-normalized path with the brackets kept, like "/users/[id]"
    pub url_template: String,
}

// ============================================================================
// Route Implementation
// ============================================================================

impl Route {
    /// Creates a route from a path relative to the view root
    ///
    /// Shorthand for [`parse_route`] with the default extensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsrouter::{Route, RouteParam, TemplatePreset};
    ///
    /// let route = Route::from_path("a/[id]/b/[...rest].html", &TemplatePreset::fiber());
    /// assert_eq!(route.pattern, "/a/:id/b/*");
    /// assert_eq!(route.params, vec![RouteParam::single("id"), RouteParam::nested("rest")]);
    /// ```
    pub fn from_path(relative_path: &str, preset: &dyn Preset) -> Self {
        parse_route(relative_path, preset)
    }

    /// Substitutes parameter values into the source path
    ///
    /// Every `[name]` / `[...name]` token of a declared parameter is replaced
    /// by its value. A missing value becomes the empty string; this never
    /// fails. Values are inserted verbatim and are not scanned for tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsrouter::{Route, TemplatePreset};
    /// use std::collections::HashMap;
    ///
    /// let route = Route::from_path("docs/[...path].html", &TemplatePreset::fiber());
    /// let params = HashMap::from([("path".to_string(), "guide/intro".to_string())]);
    /// assert_eq!(route.realize(&params), "docs/guide/intro.html");
    /// assert_eq!(route.realize(&HashMap::new()), "docs/.html");
    /// ```
    pub fn realize(&self, params: &HashMap<String, String>) -> String {
        self.substitute(&self.source_path, params)
    }

    /// Builds a concrete URL from parameter values
    ///
    /// Same substitution as [`realize`](Self::realize), applied to
    /// [`url_template`](Self::url_template) so the result is a request path
    /// rather than a file path.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsrouter::{Route, TemplatePreset};
    /// use std::collections::HashMap;
    ///
    /// let route = Route::from_path("users/[id]/index.html", &TemplatePreset::fiber());
    /// let params = HashMap::from([("id".to_string(), "42".to_string())]);
    /// assert_eq!(route.url(&params), "/users/42/");
    /// ```
    pub fn url(&self, params: &HashMap<String, String>) -> String {
        self.substitute(&self.url_template, params)
    }

    fn substitute(&self, template: &str, params: &HashMap<String, String>) -> String {
        tokenize(template)
            .into_iter()
            .fold(String::with_capacity(template.len()), |mut out, token| {
                match token {
                    Token::Param(param) if self.declares(&param) => {
                        let value = params.get(param.name()).map(String::as_str);
                        out.push_str(value.unwrap_or_default());
                    }
                    Token::Param(param) => out.push_str(&RouteParam::from(param).token()),
                    Token::Literal(text) => out.push_str(text),
                }
                out
            })
    }

    fn declares(&self, token: &ParamToken<'_>) -> bool {
        self.params.iter().any(|param| param.matches(token))
    }

    /// Collects parameter values through a host-provided accessor
    ///
    /// Calls `value_fn` once per declared parameter, in declaration order.
    /// If a name is declared twice, the later call wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsrouter::{Route, TemplatePreset};
    ///
    /// let route = Route::from_path("shop/[category]/[item].html", &TemplatePreset::chi());
    /// let values = route.extract_map(|name| name.to_uppercase());
    /// assert_eq!(values["category"], "CATEGORY");
    /// assert_eq!(values["item"], "ITEM");
    /// ```
    pub fn extract_map<F>(&self, mut value_fn: F) -> HashMap<String, String>
    where
        F: FnMut(&str) -> String,
    {
        self.params
            .iter()
            .map(|param| (param.name.clone(), value_fn(&param.name)))
            .collect()
    }

    /// Names of the declared parameters, in order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|param| param.name.as_str())
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// Whether any parameter is a `[...name]` catch-all
    pub fn has_catch_all(&self) -> bool {
        self.params.iter().any(|param| param.is_nested)
    }

    /// Parameter names declared more than once, each reported once
    ///
    /// Such paths are accepted but ambiguous: `extract_map` keeps the last
    /// value and `realize` writes the same value into every occurrence.
    pub fn duplicate_params(&self) -> Vec<&str> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for name in self.param_names() {
            *seen.entry(name).or_default() += 1;
        }

        let mut duplicates: Vec<&str> = seen
            .into_iter()
            .filter_map(|(name, count)| (count > 1).then_some(name))
            .collect();
        duplicates.sort_unstable();
        duplicates
    }

    /// The on-disk location of this route's view under `root`
    ///
    /// This is the identifier a template cache loads the view by.
    pub fn view_path(&self, root: impl AsRef<Path>) -> PathBuf {
        self.source_path
            .split('/')
            .fold(root.as_ref().to_path_buf(), |path, segment| path.join(segment))
    }
}
