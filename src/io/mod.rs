//! I/O module: data sources, sinks and line reading
//!
//! Parsers read through [`LineReader`], which tracks line numbers for error
//! contexts and caps line length so binary input fails fast.

pub mod error;
pub mod lines;
pub mod sink;
pub mod source;

pub use error::{LineContext, LineError};
pub use lines::{Line, LineReader, DEFAULT_MAX_LINE_LENGTH};
pub use sink::DataSink;
pub use source::DataSource;
