//! Output syntax presets for downstream routers
//!
//! A preset decides how a parsed parameter token is written into the final
//! URL pattern. Different router libraries disagree on placeholder syntax:
//!
//! | preset  | `[id]`  | `[...rest]` |
//! |---------|---------|-------------|
//! | `fiber` | `:id`   | `*`         |
//! | `chi`   | `{id}`  | `*`         |
//! | `axum`  | `{id}`  | `{*rest}`   |
//!
//! Presets are immutable values. Build one at startup and hand it to
//! [`FsRouter`](crate::FsRouter); nothing here is global.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PresetError;

/// Placeholder replaced by the parameter name in [`TemplatePreset`] templates.
pub const NAME_PLACEHOLDER: &str = "$name";

/// Strategy for rendering parameter tokens in a target router's syntax.
pub trait Preset: fmt::Debug + Send + Sync {
    /// Renders a single-segment parameter declared as `[name]`.
    fn render_named_param(&self, name: &str) -> String;

    /// Renders a catch-all parameter declared as `[...name]`.
    ///
    /// Most routers use an unnamed marker and ignore `name`.
    fn render_wildcard(&self, name: &str) -> String;
}

/// A preset described by two replacement templates.
///
/// `$name` in a template is replaced by the captured parameter name.
///
/// # Examples
///
/// ```
/// use fsrouter::preset::{Preset, TemplatePreset};
///
/// let preset = TemplatePreset::new("<$name>", "<*$name>").unwrap();
/// assert_eq!(preset.render_named_param("id"), "<id>");
/// assert_eq!(preset.render_wildcard("rest"), "<*rest>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePreset {
    named_param: String,
    wildcard: String,
}

impl TemplatePreset {
    /// Builds a preset from custom templates.
    ///
    /// `named_param` must contain exactly one `$name` placeholder, `wildcard`
    /// at most one.
    pub fn new(
        named_param: impl Into<String>,
        wildcard: impl Into<String>,
    ) -> Result<Self, PresetError> {
        let named_param = named_param.into();
        let wildcard = wildcard.into();

        match named_param.matches(NAME_PLACEHOLDER).count() {
            1 => {}
            found => {
                return Err(PresetError::PlaceholderCount {
                    template: named_param,
                    expected: "exactly one",
                    found,
                })
            }
        }

        match wildcard.matches(NAME_PLACEHOLDER).count() {
            0 | 1 => {}
            found => {
                return Err(PresetError::PlaceholderCount {
                    template: wildcard,
                    expected: "at most one",
                    found,
                })
            }
        }

        Ok(Self {
            named_param,
            wildcard,
        })
    }

    /// Colon-prefixed params, bare `*` wildcard (Fiber, Express, httprouter).
    pub fn fiber() -> Self {
        Self::from_static(":$name", "*")
    }

    /// Brace-wrapped params, bare `*` wildcard (chi).
    pub fn chi() -> Self {
        Self::from_static("{$name}", "*")
    }

    /// Brace-wrapped params and named `{*name}` wildcard (axum 0.8, matchit).
    pub fn axum() -> Self {
        Self::from_static("{$name}", "{*$name}")
    }

    fn from_static(named_param: &'static str, wildcard: &'static str) -> Self {
        Self {
            named_param: named_param.to_string(),
            wildcard: wildcard.to_string(),
        }
    }

    /// Template used for `[name]` tokens.
    pub fn named_param_template(&self) -> &str {
        &self.named_param
    }

    /// Template used for `[...name]` tokens.
    pub fn wildcard_template(&self) -> &str {
        &self.wildcard
    }
}

impl Default for TemplatePreset {
    fn default() -> Self {
        Self::fiber()
    }
}

impl Preset for TemplatePreset {
    fn render_named_param(&self, name: &str) -> String {
        self.named_param.replacen(NAME_PLACEHOLDER, name, 1)
    }

    fn render_wildcard(&self, name: &str) -> String {
        self.wildcard.replacen(NAME_PLACEHOLDER, name, 1)
    }
}

/// Names of the built-in presets, as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    #[default]
    Fiber,
    Chi,
    Axum,
}

impl PresetKind {
    /// All built-in presets, in declaration order.
    pub const ALL: [PresetKind; 3] = [PresetKind::Fiber, PresetKind::Chi, PresetKind::Axum];

    /// Builds the preset this name refers to.
    pub fn build(self) -> TemplatePreset {
        match self {
            PresetKind::Fiber => TemplatePreset::fiber(),
            PresetKind::Chi => TemplatePreset::chi(),
            PresetKind::Axum => TemplatePreset::axum(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PresetKind::Fiber => "fiber",
            PresetKind::Chi => "chi",
            PresetKind::Axum => "axum",
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetKind {
    type Err = PresetError;

    /// Case-insensitive lookup by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PresetError::UnknownPreset(s.to_string()))
    }
}
