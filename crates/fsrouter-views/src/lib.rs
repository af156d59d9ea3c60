//! View templates for fsrouter routes
//!
//! A small `{{ key.path }}` template language plus a thread-safe cache that
//! loads templates by view identifier and keeps them for the life of the
//! process. Reload mode skips the cache so edits show up on the next render.
//!
//! ```no_run
//! use fsrouter::{FsRouter, TemplatePreset};
//! use fsrouter_views::{TemplateCache, TemplateEngine};
//! use serde_json::json;
//!
//! let router = FsRouter::new("views", TemplatePreset::fiber());
//! let routes = router.load_routes()?;
//! let cache = TemplateCache::new(false);
//!
//! let mut out = Vec::new();
//! let view = routes[0].view_path(router.root());
//! cache.render(&view.to_string_lossy(), &mut out, &json!({"title": "Home"}))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
mod error;
pub mod storage;
pub mod template;

pub use cache::{TemplateCache, TemplateEngine};
pub use error::{LoadError, ParseError, RenderError, ViewError, ViewResult};
pub use storage::{FsStorage, ViewStorage};
pub use template::Template;

/// Renders `view` into a new string
pub fn render_to_string(
    engine: &dyn TemplateEngine,
    view: &str,
    data: &serde_json::Value,
) -> ViewResult<String> {
    let mut out = Vec::new();
    engine.render(view, &mut out, data)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
