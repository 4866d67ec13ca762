//! Errors raised while reading GenBank text or resolving feature sequences.
//!
//! Parse errors carry a [`LineContext`] (file name, 1-based line number and
//! the offending text) and chain the lower-level cause through
//! [`std::error::Error::source`]. Failures of the line source itself arrive
//! wrapped as [`GenbankError::Line`]. [`ErrorKind`] buckets every error into the
//! structural / numeric / truncation / consistency taxonomy so callers can
//! decide whether to skip a record or abort.

pub use crate::io::{LineContext, LineError};
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

/// Record section the parser was in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Top-level tags between LOCUS and FEATURES
    Metadata,
    /// Feature table
    Features,
    /// ORIGIN block
    Sequence,
    /// CONTIG block of an assembly record
    Contig,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Metadata => "metadata",
            Section::Features => "feature table",
            Section::Sequence => "sequence",
            Section::Contig => "contig",
        };
        f.write_str(name)
    }
}

/// Coarse classification of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Text does not have the expected shape
    Structural,
    /// A number could not be parsed
    Numeric,
    /// Input ended early, or a line is too short to hold data
    Truncation,
    /// Data is well formed but does not agree with itself
    Consistency,
    /// Underlying reader failed
    Io,
}

/// Errors produced by the GenBank record parser.
#[derive(Debug, Error)]
pub enum GenbankError {
    /// Input could not be opened
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line source failed: read error, bad UTF-8 or an over-long line
    #[error(transparent)]
    Line(#[from] LineError),

    /// Blank line between LOCUS and FEATURES
    #[error("{at}: empty line in metadata")]
    EmptyMetadataLine {
        /// Where the line was read
        at: LineContext,
    },

    /// Feature header without both a type and a location
    #[error("{at}: feature line needs a type and a location")]
    MalformedFeature {
        /// Where the line was read
        at: LineContext,
    },

    /// Line that has no meaning in the current section
    #[error("{at}: unexpected line in {section}")]
    UnexpectedLine {
        /// Where the line was read
        at: LineContext,
        /// Section being parsed
        section: Section,
    },

    /// REFERENCE sub-tag outside AUTHORS/CONSRTM/TITLE/JOURNAL/PUBMED/REMARK
    #[error("{at}: unknown reference sub-tag {tag:?}")]
    UnknownReferenceTag {
        /// Line that opened the sub-tag
        at: LineContext,
        /// The sub-tag as written
        tag: String,
    },

    /// Feature location that does not follow the location grammar
    #[error("{at}: invalid location {location:?}")]
    InvalidLocation {
        /// Feature header line
        at: LineContext,
        /// Full accumulated location text
        location: String,
        /// Grammar failure
        #[source]
        source: LocationError,
    },

    /// BASE COUNT entry that is not an integer
    #[error("{at}: malformed base count {token:?}")]
    InvalidBaseCount {
        /// Where the line was read
        at: LineContext,
        /// Token that failed to parse
        token: String,
        /// Integer parse failure
        #[source]
        source: ParseIntError,
    },

    /// Sequence line shorter than the minimum valid length
    #[error("{at}: sequence line is too short")]
    ShortSequenceLine {
        /// Where the line was read
        at: LineContext,
    },

    /// Input ended before the record terminator
    #[error("{at}: input ended inside the {section} section")]
    Truncated {
        /// Last line read
        at: LineContext,
        /// Section being parsed
        section: Section,
    },
}

impl GenbankError {
    /// Taxonomy bucket of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::Line(LineError::Io(_)) => ErrorKind::Io,
            Self::Line(_)
            | Self::EmptyMetadataLine { .. }
            | Self::MalformedFeature { .. }
            | Self::UnexpectedLine { .. }
            | Self::UnknownReferenceTag { .. } => ErrorKind::Structural,
            Self::InvalidLocation { source, .. } => source.kind(),
            Self::InvalidBaseCount { .. } => ErrorKind::Numeric,
            Self::ShortSequenceLine { .. } | Self::Truncated { .. } => ErrorKind::Truncation,
        }
    }

    /// Line the error was raised on, if it is tied to one
    pub fn line(&self) -> Option<&LineContext> {
        match self {
            Self::Io(_) => None,
            Self::Line(err) => err.line(),
            Self::EmptyMetadataLine { at }
            | Self::MalformedFeature { at }
            | Self::UnexpectedLine { at, .. }
            | Self::UnknownReferenceTag { at, .. }
            | Self::InvalidLocation { at, .. }
            | Self::InvalidBaseCount { at, .. }
            | Self::ShortSequenceLine { at }
            | Self::Truncated { at, .. } => Some(at),
        }
    }
}

/// Errors produced by the location grammar parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// Nothing to parse
    #[error("empty location")]
    Empty,

    /// Parenthesis depth never returns to zero, or closes early
    #[error("unbalanced parentheses in {0:?}")]
    Unbalanced(String),

    /// `join()` or `complement()` with nothing inside
    #[error("operator without arguments in {0:?}")]
    EmptyArguments(String),

    /// Operator other than `join` or `complement`
    #[error("unsupported location operator {operator:?} in {location:?}")]
    UnknownOperator {
        /// Operator name as written
        operator: String,
        /// Expression it heads
        location: String,
    },

    /// `complement(...)` with more than one top-level argument
    #[error("complement takes a single argument in {0:?}")]
    ComplementArity(String),

    /// Coordinate that is not an integer once partial markers are removed
    #[error("non-numeric coordinate {token:?}")]
    InvalidCoordinate {
        /// Token that failed to parse
        token: String,
        /// Integer parse failure
        #[source]
        source: ParseIntError,
    },

    /// Coordinate 0 (positions are 1-based)
    #[error("coordinate 0 in {0:?}")]
    ZeroCoordinate(String),
}

impl LocationError {
    /// Taxonomy bucket of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCoordinate { .. } | Self::ZeroCoordinate(_) => ErrorKind::Numeric,
            _ => ErrorKind::Structural,
        }
    }
}

/// Errors produced when extracting a feature's sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Feature handle does not belong to the record
    #[error("no feature at index {index} (record has {count})")]
    NoSuchFeature {
        /// Requested index
        index: usize,
        /// Number of features in the record
        count: usize,
    },

    /// Location range outside the record sequence
    #[error("range {start}..{end} is outside a sequence of length {length}")]
    OutOfBounds {
        /// 0-based start
        start: usize,
        /// Exclusive end
        end: usize,
        /// Length of the record sequence
        length: usize,
    },
}
