//! Output destinations for streaming writes
//!
//! `DataSink` is the write counterpart to [`DataSource`](crate::io::DataSource).
//! Writers take a sink and stay agnostic to where the text ends up.
//!
//! # Example
//!
//! ```no_run
//! use seqmetal::io::DataSink;
//!
//! // Write to local file
//! let sink = DataSink::from_path("output.gb");
//!
//! // Write to stdout
//! let sink = DataSink::stdout();
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output destination for streaming writes
#[derive(Debug, Clone)]
pub enum DataSink {
    /// Write to a local file path (created or truncated)
    Local(PathBuf),

    /// Write to standard output, for streaming pipelines
    Stdout,
}

impl DataSink {
    /// Create a sink from a file path
    ///
    /// # Example
    ///
    /// ```
    /// use seqmetal::io::DataSink;
    ///
    /// let sink = DataSink::from_path("output.gb");
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Local(path.as_ref().to_path_buf())
    }

    /// Create a sink for standard output
    pub fn stdout() -> Self {
        Self::Stdout
    }

    /// Name used in log messages
    pub fn name(&self) -> String {
        match self {
            Self::Local(path) => path.display().to_string(),
            Self::Stdout => "<stdout>".to_string(),
        }
    }

    /// Open the sink behind a buffered writer
    pub fn open(&self) -> io::Result<BufWriter<Box<dyn Write + Send>>> {
        let inner: Box<dyn Write + Send> = match self {
            Self::Local(path) => Box::new(File::create(path)?),
            Self::Stdout => Box::new(io::stdout()),
        };
        Ok(BufWriter::new(inner))
    }
}
