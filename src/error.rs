use alloc::{boxed::Box, string::String};
use thiserror::Error;

/// Errors produced while loading, splitting, classifying or scoring.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A required input is missing, empty, or outside of its valid range.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Two feature vectors of unequal length were compared.
    #[error("dimension mismatch: {left} != {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Classifying the query at `index` of a batch failed.
    #[error("query {index} failed: {source}")]
    Query {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// A token of a delimited dataset is not a number. `row` and `column` are 1-based,
    /// and `row` counts records rather than physical lines.
    #[error("failed to parse {token:?} at row {row}, column {column}")]
    Parse {
        row: usize,
        column: usize,
        token: String,
    },

    #[error("io error: {0}")]
    Io(String),

    #[error("csv error: {0}")]
    Csv(String),

    #[error("json error: {0}")]
    Json(String),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Strips any [`Error::Query`] wrapping and returns the underlying cause.
    pub fn root(&self) -> &Error {
        match self {
            Error::Query { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        use alloc::string::ToString;
        Error::Io(e.to_string())
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
