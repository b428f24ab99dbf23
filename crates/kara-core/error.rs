//! Error types for kara-rs core operations
//!
//! One public [`Error`] enum covers the whole core: file lookup, script
//! format violations, dangling style references, numeric-domain violations
//! and invalid argument combinations. Reader and writer fail fast; no
//! operation retries or recovers partially.

use thiserror::Error;

/// Main error type for kara-rs core operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Read/write path missing or unreadable
    #[error("`{path}` does not exist, try again with another file")]
    FileNotFound {
        /// Path that was attempted
        path: String,
    },

    /// A script line cannot be split into the expected field shape
    #[error("malformed {kind} line: `{content}`")]
    Format {
        /// Kind of line that failed (`dialogue`, `style`, `time`, ...)
        kind: &'static str,
        /// Offending line content, for diagnosis without re-parsing
        content: String,
    },

    /// An event references a style name that was never defined
    #[error("style `{0}` is referenced but never defined")]
    UndefinedStyle(String),

    /// A numeric value outside its valid domain
    #[error("{what} {value} out of range [{min}, {max}]")]
    Range {
        /// What the value is (channel, hue, alignment, ...)
        what: &'static str,
        /// Offending value
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// Invalid argument combination
    #[error("{0}")]
    Value(String),
}

impl Error {
    /// Range error helper with the offending value and its valid domain
    pub(crate) fn range(what: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::Range {
            what,
            value,
            min,
            max,
        }
    }

    /// Format error helper carrying the offending line
    pub(crate) fn format(kind: &'static str, content: impl Into<String>) -> Self {
        Self::Format {
            kind,
            content: content.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, Error>;
