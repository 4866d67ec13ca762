//! GenBank flat-file format
//!
//! # Components
//!
//! - [`parser`]: line-driven state machine producing [`GenbankRecord`]s
//! - [`location`]: the `join`/`complement` location grammar
//! - [`resolve`]: feature sequence extraction
//! - [`writer`]: byte-exact rendering and [`GenbankWriter`]
//!
//! # Example
//!
//! ```no_run
//! use seqmetal::formats::genbank;
//!
//! # fn main() -> seqmetal::Result<()> {
//! let record = genbank::read("puc19.gb")?;
//! for (i, feature) in record.features.iter().enumerate() {
//!     if feature.feature_type == "CDS" {
//!         println!(
//!             "{} {}",
//!             feature.attributes.first("gene").unwrap_or("?"),
//!             record.feature_sequence(i)?
//!         );
//!     }
//! }
//! genbank::write(&record, "puc19.copy.gb")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod header;
pub mod location;
pub mod parser;
pub mod record;
pub mod resolve;
pub mod writer;

pub use error::{
    ErrorKind, GenbankError, LineContext, LineError, LocationError, ResolveError, Section,
};
pub use location::Location;
pub use parser::{step, GenbankParser, ParseState, ParserConfig};
pub use record::{Attributes, BaseCount, Feature, GenbankRecord, Locus, Meta, Reference};
pub use resolve::resolve_location;
pub use writer::{render, render_multi, GenbankWriter};

use crate::error::{Result, SeqmetalError};
use crate::io::DataSource;
use std::io::BufRead;
use std::path::Path;

/// First record of `reader`
///
/// # Errors
///
/// [`SeqmetalError::EmptyInput`] when the input holds no record.
pub fn parse<R: BufRead>(reader: R) -> Result<GenbankRecord> {
    GenbankParser::new(reader)
        .next_record()?
        .ok_or_else(|| SeqmetalError::EmptyInput {
            source_name: "<reader>".to_string(),
        })
}

/// Every record of `reader`
pub fn parse_multi<R: BufRead>(reader: R) -> Result<Vec<GenbankRecord>> {
    Ok(GenbankParser::new(reader).collect::<std::result::Result<_, _>>()?)
}

/// First record of the file at `path`
///
/// # Errors
///
/// [`SeqmetalError::EmptyInput`] when the file holds no record.
pub fn read<P: AsRef<Path>>(path: P) -> Result<GenbankRecord> {
    let source = DataSource::from_path(path);
    let name = source.name();
    GenbankParser::from_source(source)?
        .next_record()?
        .ok_or(SeqmetalError::EmptyInput { source_name: name })
}

/// Every record of the file at `path`
pub fn read_multi<P: AsRef<Path>>(path: P) -> Result<Vec<GenbankRecord>> {
    let parser = GenbankParser::from_path(path)?;
    Ok(parser.collect::<std::result::Result<_, _>>()?)
}

/// Write one record to `path`
pub fn write<P: AsRef<Path>>(record: &GenbankRecord, path: P) -> Result<()> {
    write_multi(std::slice::from_ref(record), path)
}

/// Write records to `path`, back to back
pub fn write_multi<P: AsRef<Path>>(records: &[GenbankRecord], path: P) -> Result<()> {
    let mut writer = GenbankWriter::create(path)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.finish()
}
