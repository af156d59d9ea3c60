// File: src/config.rs
// Purpose: Configuration parsing from fsrouter.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::loader::DEFAULT_INCLUDE_PATTERN;
use crate::preset::PresetKind;
use crate::route::parser::DEFAULT_EXTENSION;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "fsrouter.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub views: ViewsConfig,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Directory containing view files (default: "views")
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob relative to `root` selecting view files (default: "**/*.html")
    #[serde(default = "default_include_pattern")]
    pub include_pattern: String,

    /// Placeholder syntax of the target router (default: fiber)
    #[serde(default)]
    pub preset: PresetKind,

    /// Extensions stripped from patterns, checked in order (default: ["html"])
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Template cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ViewsConfig {
    /// Re-read and re-parse templates on every render (development mode)
    #[serde(default)]
    pub reload: bool,

    /// Directory view identifiers are resolved against (default: none, used as given)
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}

// Default values
fn default_root() -> PathBuf {
    PathBuf::from("views")
}

fn default_include_pattern() -> String {
    DEFAULT_INCLUDE_PATTERN.to_string()
}

fn default_extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            include_pattern: default_include_pattern(),
            preset: PresetKind::default(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./fsrouter.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.routing.root, PathBuf::from("views"));
        assert_eq!(config.routing.include_pattern, "**/*.html");
        assert_eq!(config.routing.preset, PresetKind::Fiber);
        assert_eq!(config.routing.extensions, vec!["html".to_string()]);
        assert!(!config.views.reload);
        assert_eq!(config.views.base_dir, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_custom_routing() {
        let toml = r#"
            [routing]
            root = "app/views"
            preset = "chi"
            extensions = ["tmpl", "html"]

            [views]
            reload = true
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.routing.root, PathBuf::from("app/views"));
        assert_eq!(config.routing.preset, PresetKind::Chi);
        assert_eq!(config.routing.include_pattern, "**/*.html");
        assert_eq!(config.routing.extensions, vec!["tmpl", "html"]);
        assert!(config.views.reload);
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let err = Config::from_toml("[routing]\npreset = \"gin\"\n").unwrap_err();
        assert!(err.to_string().contains("gin"), "{err}");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fsrouter.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[routing]\npreset = \"axum\"\n[views]\nbase_dir = \"views\"").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.routing.preset, PresetKind::Axum);
        assert_eq!(config.views.base_dir, Some(PathBuf::from("views")));
    }

    #[test]
    fn test_load_invalid_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fsrouter.toml");
        fs::write(&path, "[routing\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
