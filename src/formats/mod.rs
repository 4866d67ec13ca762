//! Bioinformatics flat-file formats.
//!
//! - [`primitives`]: traits shared by record codecs
//! - [`genbank`]: GenBank flat files (parser, location grammar, writer)
//!
//! Parsers stream: records are pulled one at a time, so memory use follows
//! the largest record rather than the file.
//!
//! ```rust,ignore
//! // Loads every record at once
//! let records = genbank::read_multi("genome.gb")?;
//!
//! // One record at a time
//! for record in GenbankParser::from_path("genome.gb")? {
//!     let record = record?;
//! }
//! ```

pub mod genbank;
pub mod primitives;

pub use genbank::{GenbankParser, GenbankRecord, GenbankWriter};
pub use primitives::{FlatFileRecord, RecordSource};
