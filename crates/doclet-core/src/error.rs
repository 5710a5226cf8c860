//! Error types for Doclet.
//!
//! Configuration errors are fatal and surface immediately. Errors coming
//! from a record source or from a transform hook are carried unchanged as
//! the `source` of the wrapping variant.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Doclet operations.
pub type Result<T> = std::result::Result<T, DocletError>;

/// Boxed error used at the seams where foreign code reports failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Misconfiguration detected while attaching nodes or inspecting records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The resolved attachment slot was missing or empty.
    #[error("the link property name must be a non-empty string (while attaching {0})")]
    EmptySlot(String),

    /// A property lookup was attempted on a null value.
    #[error("{0} can't have any property")]
    NullObject(String),

    /// A property lookup was attempted with an empty name.
    #[error("the property name must be a non-empty string")]
    EmptyPropertyName,
}

/// Errors that can abort a Doclet run.
#[derive(Error, Debug)]
pub enum DocletError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The host record collection failed.
    #[error("record source error: {0}")]
    Source(#[source] BoxError),

    /// A transform hook reported a failure.
    #[error("{hook} hook failed: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: BoxError,
    },

    /// The `memberof` chain of a record loops back on itself.
    #[error("memberof cycle detected at {0}")]
    Cycle(String),

    #[error("failed to emit output: {0}")]
    Emit(#[source] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DocletError {
    /// Wraps an I/O error together with the path being accessed.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wraps an error reported by a host record collection.
    pub fn source(err: impl Into<BoxError>) -> Self {
        Self::Source(err.into())
    }

    /// Returns true for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
