//! Error types for profile and station processing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building an annotated profile drawing.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A required column or field cannot be identified in the input.
    #[error("no matching column: {0}")]
    Schema(String),

    /// No usable profile rows survived cleaning.
    #[error("profile has no usable rows after cleaning")]
    EmptyProfile,

    /// A single cell failed numeric coercion.
    #[error("row {row}: value {value:?} in column {column:?} is not a number")]
    MalformedValue {
        row: usize,
        column: String,
        value: String,
    },

    /// An input file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output destination could not be written.
    #[error("cannot write {}: {source}", path.display())]
    SinkIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be parsed or holds invalid values.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The drawing backend rejected the document.
    #[error("drawing backend failed: {0}")]
    Drawing(String),
}

impl ProfileError {
    pub(crate) fn sink_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SinkIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
