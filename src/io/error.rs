//! Errors raised while splitting input into lines.
//!
//! These are format-agnostic: codecs wrap [`LineError`] in their own error
//! type and reuse [`LineContext`] to point at the offending line.

use std::fmt;
use std::io;
use std::str::Utf8Error;
use thiserror::Error;

/// Position of an error in the input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineContext {
    /// File name, when the input came from a named source
    pub file: Option<String>,
    /// 1-based line number
    pub number: usize,
    /// Offending line, without its line terminator
    pub text: String,
}

impl fmt::Display for LineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}", file, self.number)?,
            None => write!(f, "line {}", self.number)?,
        }
        if !self.text.is_empty() {
            write!(f, " ({:?})", self.text)?;
        }
        Ok(())
    }
}

/// Errors produced by [`LineReader`](super::LineReader).
#[derive(Debug, Error)]
pub enum LineError {
    /// Underlying reader failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Line bytes are not UTF-8
    #[error("{at}: line is not valid UTF-8")]
    InvalidUtf8 {
        /// Where the line was read
        at: LineContext,
        /// Decoding failure
        #[source]
        source: Utf8Error,
    },

    /// Line longer than the configured maximum
    #[error("{at}: line is longer than the maximum of {max} bytes")]
    TooLong {
        /// Where the line was read (text is a short preview)
        at: LineContext,
        /// Configured maximum line length
        max: usize,
    },
}

impl LineError {
    /// Line the error was raised on, if it is tied to one
    pub fn line(&self) -> Option<&LineContext> {
        match self {
            Self::Io(_) => None,
            Self::InvalidUtf8 { at, .. } | Self::TooLong { at, .. } => Some(at),
        }
    }

    /// True when reading cannot sensibly continue after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_) | Self::TooLong { .. })
    }
}
