//! Input sources for streaming reads
//!
//! `DataSource` is the read counterpart to [`DataSink`](crate::io::DataSink):
//! parsers are written against `BufRead` and a source decides where the bytes
//! come from.
//!
//! # Example
//!
//! ```
//! use seqmetal::io::DataSource;
//! use std::io::BufRead;
//!
//! # fn main() -> std::io::Result<()> {
//! let source = DataSource::from_bytes(b"LOCUS       demo\n".to_vec());
//! let mut reader = source.open()?;
//!
//! let mut first = String::new();
//! reader.read_line(&mut first)?;
//! assert!(first.starts_with("LOCUS"));
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Input source for streaming reads
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Local file path
    Local(PathBuf),

    /// Standard input
    Stdin,

    /// In-memory buffer
    Memory(Vec<u8>),
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        DataSource::Local(path.as_ref().to_path_buf())
    }

    /// Create a source reading standard input
    pub fn stdin() -> Self {
        DataSource::Stdin
    }

    /// Create a source over bytes already in memory
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        DataSource::Memory(bytes)
    }

    /// Name used in error messages
    pub fn name(&self) -> String {
        match self {
            DataSource::Local(path) => path.display().to_string(),
            DataSource::Stdin => "<stdin>".to_string(),
            DataSource::Memory(_) => "<memory>".to_string(),
        }
    }

    /// Open the data source and return a buffered reader
    pub fn open(&self) -> io::Result<Box<dyn BufRead + Send>> {
        match self {
            DataSource::Local(path) => {
                let file = File::open(path)?;
                Ok(Box::new(BufReader::new(file)))
            }
            DataSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            DataSource::Memory(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
        }
    }
}
