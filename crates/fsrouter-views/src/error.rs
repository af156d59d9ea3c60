//! Error types for loading and rendering views
//!
//! A load error is scoped to one view, a render error to one render call.
//! Neither touches other cache entries.

use std::io;

/// Convenience result type for the render entry points.
pub type ViewResult<T> = Result<T, ViewError>;

/// Syntax error in a template source.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `{{` or `{{{` tag is never closed.
    #[error("unclosed tag starting at byte {offset}")]
    Unclosed { offset: usize },

    /// A tag has nothing between its delimiters.
    #[error("empty expression in tag at byte {offset}")]
    EmptyExpression { offset: usize },

    /// A tag expression is not a valid key path.
    #[error("invalid key path {path:?} in tag at byte {offset}")]
    InvalidPath { offset: usize, path: String },
}

/// The view could not be read or parsed. Nothing is cached.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read view {view:?}: {source}")]
    Read {
        view: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse view {view:?}: {source}")]
    Parse {
        view: String,
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    /// The view identifier the failure belongs to.
    pub fn view(&self) -> &str {
        match self {
            LoadError::Read { view, .. } | LoadError::Parse { view, .. } => view,
        }
    }
}

/// Failure while writing data into an already-parsed template.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The data has no value at this key path.
    #[error("no value for `{0}`")]
    MissingValue(String),

    /// The value at this key path is an array or object.
    #[error("value for `{0}` is not a string, number, bool or null")]
    NotScalar(String),

    /// The output writer failed.
    #[error("failed to write rendered output: {0}")]
    Io(#[from] io::Error),
}

/// Anything that can go wrong in [`TemplateEngine::render`](crate::TemplateEngine::render).
#[derive(thiserror::Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
