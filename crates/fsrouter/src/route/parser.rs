//! Route parsing: relative view path → router-ready pattern
//!
//! Pure functions. The path is tokenized once; parameters are collected from
//! that token stream and the same stream is rewritten through the preset, so
//! every token is rewritten exactly once and catch-all names are never lost.

use crate::preset::Preset;
use crate::{Route, RouteParam};

use super::pattern::{tokenize, ParamToken, Token};

/// Extension recognized when no other is configured.
pub const DEFAULT_EXTENSION: &str = "html";

/// Options that tune suffix normalization
///
/// # Examples
///
/// ```
/// use fsrouter::route::parser::ParseOptions;
///
/// let options = ParseOptions::with_extensions([".tmpl", "html"]);
/// assert_eq!(options.extensions(), ["tmpl", "html"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    extensions: Vec<String>,
}

impl ParseOptions {
    /// Recognizes the given view extensions, checked in order.
    ///
    /// A leading `.` is optional; empty entries are ignored.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::with_extensions([DEFAULT_EXTENSION])
    }
}

/// Parses a relative view path with the default options
///
/// # Examples
///
/// ```
/// use fsrouter::preset::TemplatePreset;
/// use fsrouter::route::parser::parse_route;
///
/// let route = parse_route("blog/[slug].html", &TemplatePreset::fiber());
/// assert_eq!(route.pattern, "/blog/:slug");
/// assert_eq!(route.params[0].name, "slug");
/// ```
pub fn parse_route(path: &str, preset: &dyn Preset) -> Route {
    parse_route_with(path, preset, &ParseOptions::default())
}

/// Parses a relative view path into a [`Route`] (pure function)
///
/// 1. Tokenize the path into literals and `[name]` / `[...name]` tokens.
/// 2. Collect the parameters in source order.
/// 3. Emit `/` + each token, parameters rendered by `preset`.
/// 4. Strip `index.<ext>` or `.<ext>` from the result.
///
/// Never fails: text outside the bracket grammar is kept as-is.
pub fn parse_route_with(path: &str, preset: &dyn Preset, options: &ParseOptions) -> Route {
    let tokens = tokenize(path);

    let params: Vec<RouteParam> = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Param(param) => Some(RouteParam::from(*param)),
            Token::Literal(_) => None,
        })
        .collect();

    let pattern = tokens
        .iter()
        .fold(String::from("/"), |mut pattern, token| {
            match token {
                Token::Literal(text) => pattern.push_str(text),
                Token::Param(ParamToken::Single(name)) => {
                    pattern.push_str(&preset.render_named_param(name))
                }
                Token::Param(ParamToken::CatchAll(name)) => {
                    pattern.push_str(&preset.render_wildcard(name))
                }
            }
            pattern
        });

    let url_template = format!("/{path}");

    Route {
        pattern: strip_view_suffix(&pattern, options.extensions()).to_string(),
        params,
        source_path: path.to_string(),
        url_template: strip_view_suffix(&url_template, options.extensions()).to_string(),
    }
}

/// Removes the view extension from a rewritten pattern (pure function)
///
/// For the first extension `ext` the pattern ends with:
/// - a final segment of exactly `index.<ext>` is dropped, keeping the `/`
/// - otherwise only `.<ext>` is dropped
///
/// # Examples
///
/// ```
/// use fsrouter::route::parser::strip_view_suffix;
///
/// let exts = ["html".to_string()];
/// assert_eq!(strip_view_suffix("/index.html", &exts), "/");
/// assert_eq!(strip_view_suffix("/blog/index.html", &exts), "/blog/");
/// assert_eq!(strip_view_suffix("/blog/post.html", &exts), "/blog/post");
/// assert_eq!(strip_view_suffix("/blog/feed.xml", &exts), "/blog/feed.xml");
/// ```
pub fn strip_view_suffix<'a>(pattern: &'a str, extensions: &[String]) -> &'a str {
    extensions
        .iter()
        .find_map(|ext| {
            let stem = pattern.strip_suffix(ext.as_str())?.strip_suffix('.')?;
            match stem.strip_suffix("index") {
                Some(dir) if dir.ends_with('/') => Some(dir),
                _ => Some(stem),
            }
        })
        .unwrap_or(pattern)
}
