//! Error types for seqmetal

use crate::formats::genbank::{GenbankError, LocationError, ResolveError};
use thiserror::Error;

/// Result type alias for seqmetal operations
pub type Result<T> = std::result::Result<T, SeqmetalError>;

/// Error types that can occur in seqmetal
#[derive(Debug, Error)]
pub enum SeqmetalError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed GenBank input
    #[error(transparent)]
    Genbank(#[from] GenbankError),

    /// Location string that does not follow the location grammar
    #[error("Invalid location: {0}")]
    Location(#[from] LocationError),

    /// Feature sequence could not be extracted from its record
    #[error("Cannot resolve feature sequence: {0}")]
    Resolve(#[from] ResolveError),

    /// Input held no record where at least one was required
    #[error("No GenBank record found in {source_name}")]
    EmptyInput {
        /// Name of the input (file path or `<stdin>`)
        source_name: String,
    },
}

impl SeqmetalError {
    /// Taxonomy bucket of this error (see [`crate::formats::genbank::ErrorKind`])
    pub fn kind(&self) -> crate::formats::genbank::ErrorKind {
        use crate::formats::genbank::ErrorKind;
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Genbank(err) => err.kind(),
            Self::Location(err) => err.kind(),
            Self::Resolve(_) => ErrorKind::Consistency,
            Self::EmptyInput { .. } => ErrorKind::Truncation,
        }
    }
}
