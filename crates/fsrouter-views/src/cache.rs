//! Thread-safe template cache
//!
//! Maps view identifiers to parsed [`Template`]s. In normal mode the first
//! successful load is kept for the life of the cache. In reload mode every
//! lookup reads and parses the source again and nothing is stored.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, PoisonError, RwLock};

use fsrouter::ViewsConfig;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{LoadError, ViewError};
use crate::storage::{FsStorage, ViewStorage};
use crate::template::Template;

/// Renders a view by identifier
pub trait TemplateEngine: Send + Sync {
    fn render(&self, view: &str, out: &mut dyn Write, data: &Value) -> Result<(), ViewError>;
}

/// Template cache backed by a [`ViewStorage`]
pub struct TemplateCache<S = FsStorage> {
    storage: S,
    reload: bool,
    templates: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateCache<FsStorage> {
    /// Cache reading views from disk, identifiers used as given
    pub fn new(reload: bool) -> Self {
        Self::with_storage(FsStorage::new(), reload)
    }

    pub fn from_config(config: &ViewsConfig) -> Self {
        let storage = match &config.base_dir {
            Some(base) => FsStorage::with_base_dir(base),
            None => FsStorage::new(),
        };
        Self::with_storage(storage, config.reload)
    }
}

impl<S: ViewStorage> TemplateCache<S> {
    pub fn with_storage(storage: S, reload: bool) -> Self {
        Self {
            storage,
            reload,
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the parsed template for `view`, loading it on a miss
    ///
    /// A failed load stores nothing, so the next call tries again.
    pub fn template(&self, view: &str) -> Result<Arc<Template>, LoadError> {
        if self.reload {
            trace!("Reload mode, loading view {}", view);
            return self.load(view).map(Arc::new);
        }

        if let Some(template) = self.read_map().get(view) {
            trace!("Template cache hit: {}", view);
            return Ok(Arc::clone(template));
        }

        debug!("Template cache miss: {}", view);
        let loaded = Arc::new(self.load(view)?);

        // Another caller may have loaded the same view meanwhile; keep whichever landed first.
        let mut templates = self
            .templates
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let template = templates.entry(view.to_string()).or_insert(loaded);
        Ok(Arc::clone(template))
    }

    /// Loads every view up front
    ///
    /// Stops at the first failure. Views loaded before it stay cached.
    pub fn preload<I>(&self, views: I) -> Result<usize, LoadError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut count = 0;
        for view in views {
            self.template(view.as_ref())?;
            count += 1;
        }
        debug!("Preloaded {} views", count);
        Ok(count)
    }

    /// Drops one entry; returns whether it was cached
    pub fn invalidate(&self, view: &str) -> bool {
        let removed = self
            .templates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(view)
            .is_some();
        if removed {
            debug!("Invalidated view {}", view);
        }
        removed
    }

    pub fn clear(&self) {
        self.templates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_map().is_empty()
    }

    pub fn is_cached(&self, view: &str) -> bool {
        self.read_map().contains_key(view)
    }

    pub fn is_reload(&self) -> bool {
        self.reload
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn load(&self, view: &str) -> Result<Template, LoadError> {
        let source = self.storage.read(view).map_err(|source| LoadError::Read {
            view: view.to_string(),
            source,
        })?;

        Template::parse(&source).map_err(|source| LoadError::Parse {
            view: view.to_string(),
            source,
        })
    }

    fn read_map(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Template>>> {
        self.templates.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: ViewStorage> TemplateEngine for TemplateCache<S> {
    fn render(&self, view: &str, out: &mut dyn Write, data: &Value) -> Result<(), ViewError> {
        let template = self.template(view)?;
        template.render(out, data)?;
        Ok(())
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for TemplateCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .templates
            .read()
            .map(|map| map.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len());
        f.debug_struct("TemplateCache")
            .field("storage", &self.storage)
            .field("reload", &self.reload)
            .field("cached", &cached)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory storage that counts reads
    #[derive(Default)]
    struct CountingStorage {
        sources: Mutex<HashMap<String, String>>,
        reads: AtomicUsize,
    }

    impl CountingStorage {
        fn with(views: &[(&str, &str)]) -> Self {
            let storage = Self::default();
            for (view, source) in views {
                storage.set(view, source);
            }
            storage
        }

        fn set(&self, view: &str, source: &str) {
            self.sources
                .lock()
                .unwrap()
                .insert(view.to_string(), source.to_string());
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl ViewStorage for CountingStorage {
        fn read(&self, view: &str) -> io::Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.sources
                .lock()
                .unwrap()
                .get(view)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, view.to_string()))
        }
    }

    fn render(cache: &impl TemplateEngine, view: &str, data: Value) -> Result<String, ViewError> {
        let mut out = Vec::new();
        cache.render(view, &mut out, &data)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_second_render_uses_cache() {
        let cache = TemplateCache::with_storage(
            CountingStorage::with(&[("hello.html", "Hello {{ name }}")]),
            false,
        );

        assert_eq!(render(&cache, "hello.html", json!({"name": "a"})).unwrap(), "Hello a");
        assert_eq!(render(&cache, "hello.html", json!({"name": "b"})).unwrap(), "Hello b");
        assert_eq!(cache.storage().reads(), 1);
        assert!(cache.is_cached("hello.html"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_reload_reads_every_time() {
        let cache =
            TemplateCache::with_storage(CountingStorage::with(&[("page.html", "v1")]), true);

        assert_eq!(render(&cache, "page.html", json!({})).unwrap(), "v1");
        cache.storage().set("page.html", "v2");
        assert_eq!(render(&cache, "page.html", json!({})).unwrap(), "v2");

        assert_eq!(cache.storage().reads(), 2);
        assert!(cache.is_empty());
        assert!(cache.is_reload());
    }

    #[test]
    fn test_cached_template_ignores_source_changes() {
        let cache = TemplateCache::with_storage(CountingStorage::with(&[("p.html", "v1")]), false);

        render(&cache, "p.html", json!({})).unwrap();
        cache.storage().set("p.html", "v2");
        assert_eq!(render(&cache, "p.html", json!({})).unwrap(), "v1");

        assert!(cache.invalidate("p.html"));
        assert!(!cache.invalidate("p.html"));
        assert_eq!(render(&cache, "p.html", json!({})).unwrap(), "v2");
    }

    #[test]
    fn test_failed_read_is_not_cached() {
        let cache = TemplateCache::with_storage(CountingStorage::default(), false);

        let err = render(&cache, "late.html", json!({})).unwrap_err();
        assert!(matches!(err, ViewError::Load(LoadError::Read { ref view, .. }) if view == "late.html"));
        assert!(!cache.is_cached("late.html"));

        cache.storage().set("late.html", "here");
        assert_eq!(render(&cache, "late.html", json!({})).unwrap(), "here");
        assert_eq!(cache.storage().reads(), 2);
    }

    #[test]
    fn test_failed_parse_is_not_cached() {
        let cache =
            TemplateCache::with_storage(CountingStorage::with(&[("bad.html", "{{ oops")]), false);

        let err = cache.template("bad.html").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert_eq!(err.view(), "bad.html");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_render_error_keeps_template_cached() {
        let cache = TemplateCache::with_storage(
            CountingStorage::with(&[("user.html", "{{ user.name }}")]),
            false,
        );

        let err = render(&cache, "user.html", json!({})).unwrap_err();
        assert!(matches!(err, ViewError::Render(RenderError::MissingValue(_))));
        assert!(cache.is_cached("user.html"));

        let out = render(&cache, "user.html", json!({"user": {"name": "Ann"}})).unwrap();
        assert_eq!(out, "Ann");
        assert_eq!(cache.storage().reads(), 1);
    }

    #[test]
    fn test_one_failure_does_not_affect_other_views() {
        let cache = TemplateCache::with_storage(
            CountingStorage::with(&[("ok.html", "ok"), ("bad.html", "{{")]),
            false,
        );

        assert_eq!(render(&cache, "ok.html", json!({})).unwrap(), "ok");
        assert!(render(&cache, "bad.html", json!({})).is_err());
        assert_eq!(render(&cache, "ok.html", json!({})).unwrap(), "ok");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_preload_and_clear() {
        let cache = TemplateCache::with_storage(
            CountingStorage::with(&[("a.html", "a"), ("b.html", "b")]),
            false,
        );

        assert_eq!(cache.preload(["a.html", "b.html"]).unwrap(), 2);
        assert_eq!(cache.len(), 2);

        let err = cache.preload(vec!["a.html".to_string(), "c.html".to_string()]);
        assert!(err.is_err());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_renders() {
        let cache = TemplateCache::with_storage(
            CountingStorage::with(&[("n.html", "#{{ n }}")]),
            false,
        );

        std::thread::scope(|scope| {
            for i in 0..8 {
                let cache = &cache;
                scope.spawn(move || {
                    for _ in 0..50 {
                        let out = render(cache, "n.html", json!({ "n": i })).unwrap();
                        assert_eq!(out, format!("#{i}"));
                    }
                });
            }
        });

        assert_eq!(cache.len(), 1);
        assert!(cache.storage().reads() >= 1);
        assert!(cache.storage().reads() <= 8);
    }

    #[test]
    fn test_shared_template_handle() {
        let cache = TemplateCache::with_storage(CountingStorage::with(&[("s.html", "s")]), false);

        let first = cache.template("s.html").unwrap();
        let second = cache.template("s.html").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>{{ title }}</h1>").unwrap();

        let config = ViewsConfig {
            reload: true,
            base_dir: Some(dir.path().to_path_buf()),
        };
        let cache = TemplateCache::from_config(&config);

        assert!(cache.is_reload());
        assert_eq!(cache.storage().base_dir(), Some(dir.path()));
        let out = render(&cache, "index.html", json!({"title": "Home"})).unwrap();
        assert_eq!(out, "<h1>Home</h1>");
    }
}
