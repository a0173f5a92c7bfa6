//! Error types for the classic IR codec
//!
//! Every failure is terminal for the call that produced it. Nested decode and
//! encode failures are wrapped with the node kind and field they came from, so
//! the rendered message reads outermost first:
//! `decode Lambda body: decode Apply argument: Unit expects 2 elements, got 3`.

use thiserror::Error;

use crate::codec::FormatVersion;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for classic IR operations
#[derive(Error, Debug)]
pub enum Error {
    /// The JSON was not the expected container (array or object) or had too few elements.
    #[error("{0}")]
    Shape(String),

    /// A tagged node had the wrong number of elements for its variant.
    #[error("{kind} expects {expected} elements, got {actual}")]
    Arity {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The tag is unknown, or belongs to a different format version.
    #[error("unknown {tree} tag {tag:?} for format version {version}")]
    UnknownTag {
        tree: &'static str,
        tag: String,
        version: FormatVersion,
    },

    /// The caller supplied attribute coder failed.
    #[error("{direction} attributes: {source}")]
    Attribute {
        direction: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("encode attributes returned empty JSON")]
    EmptyAttributes,

    /// The document nests deeper than [`Options::max_depth`](crate::Options::max_depth).
    #[error("{what} nests deeper than {limit} levels")]
    Depth { what: &'static str, limit: usize },

    #[error("expected {0}, got null")]
    Null(&'static str),

    #[error("invalid {what}: {reason}")]
    Invalid { what: &'static str, reason: String },

    #[error("{what}: expected '{expected}', got {input:?}")]
    Parse {
        what: &'static str,
        expected: &'static str,
        input: String,
    },

    /// A nested element failed; `context` names the node kind and field.
    #[error("{context}: {source}")]
    Child {
        context: String,
        #[source]
        source: Box<Error>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Wrap this error with the name of the element that was being processed.
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Child {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error of a chain of [`Error::Child`] wrappers.
    pub fn root_cause(&self) -> &Error {
        let mut err = self;
        while let Error::Child { source, .. } = err {
            err = source;
        }
        err
    }
}

/// Adds context to a failing [`Result`].
pub(crate) trait ResultExt<T> {
    fn context(self, context: &'static str) -> Result<T>;

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.context(f()))
    }
}
