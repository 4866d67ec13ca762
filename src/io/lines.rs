//! Line source for line-oriented flat-file formats
//!
//! [`LineReader`] hands out one line at a time, numbered from 1, with the
//! `\n` / `\r\n` terminator stripped. Lines longer than the configured maximum
//! are a fatal error rather than being silently split, so callers can size the
//! limit for what they expect (80-column GenBank text vs. single-line sequence
//! dumps). The rest of an over-long line is skipped before the error is
//! returned. End of input is `Ok(None)`.
//!
//! # Example
//!
//! ```
//! use seqmetal::io::LineReader;
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), seqmetal::io::LineError> {
//! let mut lines = LineReader::new(Cursor::new("LOCUS       demo\r\n//\n"));
//!
//! let first = lines.next_line()?.map(|line| (line.number, line.text.to_string()));
//! assert_eq!(first, Some((1, "LOCUS       demo".to_string())));
//!
//! assert_eq!(lines.next_line()?.map(|line| line.text), Some("//"));
//! assert!(lines.next_line()?.is_none());
//! # Ok(())
//! # }
//! ```

use super::error::{LineContext, LineError};
use std::io::{self, BufRead, Read};

/// Default maximum line length (1 MiB)
///
/// Well above the 80 columns of NCBI-formatted text, but small enough that a
/// binary file fed in by mistake fails fast instead of being buffered whole.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1 << 20;

/// Bytes of an over-long line kept in its error context
const PREVIEW_LENGTH: usize = 64;

/// One line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Line text without its terminator
    pub text: &'a str,
    /// Name of the input, if known
    pub file: Option<&'a str>,
}

impl<'a> Line<'a> {
    /// Line without a file name (mostly for driving the parser by hand)
    pub fn new(number: usize, text: &'a str) -> Self {
        Self {
            number,
            text,
            file: None,
        }
    }

    /// Number of leading whitespace characters
    pub fn indent(&self) -> usize {
        self.text.len() - self.text.trim_start().len()
    }

    /// True when the line holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Owned position for error reporting
    pub fn context(&self) -> LineContext {
        LineContext {
            file: self.file.map(str::to_string),
            number: self.number,
            text: self.text.to_string(),
        }
    }
}

/// Buffered line-at-a-time reader with a maximum line length.
pub struct LineReader<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
    max_line_length: usize,
    file_name: Option<String>,
}

impl<R: BufRead> LineReader<R> {
    /// Create a reader with [`DEFAULT_MAX_LINE_LENGTH`]
    pub fn new(reader: R) -> Self {
        Self::with_max_line_length(reader, DEFAULT_MAX_LINE_LENGTH)
    }

    /// Create a reader that rejects lines longer than `max_line_length` bytes
    pub fn with_max_line_length(reader: R, max_line_length: usize) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(128),
            line_number: 0,
            max_line_length,
            file_name: None,
        }
    }

    /// Attach a file name used in error contexts
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Number of lines read so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Name attached with [`LineReader::with_file_name`]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Configured maximum line length
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Read the next line, or `None` at end of input
    ///
    /// # Errors
    ///
    /// - [`LineError::TooLong`] if the line exceeds the maximum
    /// - [`LineError::InvalidUtf8`] if the line is not UTF-8
    /// - [`LineError::Io`] if the underlying reader fails
    pub fn next_line(&mut self) -> Result<Option<Line<'_>>, LineError> {
        self.buffer.clear();

        // Room for the longest allowed line plus "\r\n"; anything that fills
        // the window without a terminator is over the limit.
        let limit = self.max_line_length.saturating_add(2) as u64;
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buffer)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let terminated = self.buffer.last() == Some(&b'\n');
        if terminated {
            self.buffer.pop();
            if self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }

        if self.buffer.len() > self.max_line_length {
            if !terminated {
                self.skip_rest_of_line()?;
            }
            let preview = &self.buffer[..PREVIEW_LENGTH.min(self.buffer.len())];
            return Err(LineError::TooLong {
                at: LineContext {
                    file: self.file_name.clone(),
                    number: self.line_number,
                    text: String::from_utf8_lossy(preview).into_owned(),
                },
                max: self.max_line_length,
            });
        }

        let text = match std::str::from_utf8(&self.buffer) {
            Ok(text) => text,
            Err(source) => {
                return Err(LineError::InvalidUtf8 {
                    at: LineContext {
                        file: self.file_name.clone(),
                        number: self.line_number,
                        text: String::from_utf8_lossy(&self.buffer).into_owned(),
                    },
                    source,
                })
            }
        };

        Ok(Some(Line {
            number: self.line_number,
            text,
            file: self.file_name.as_deref(),
        }))
    }

    // Consume up to and including the next '\n' without buffering it
    fn skip_rest_of_line(&mut self) -> io::Result<()> {
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&byte| byte == b'\n') {
                Some(end) => {
                    self.reader.consume(end + 1);
                    return Ok(());
                }
                None => {
                    let skipped = available.len();
                    self.reader.consume(skipped);
                }
            }
        }
    }
}
