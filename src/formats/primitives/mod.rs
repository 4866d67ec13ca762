//! Shared primitives for flat-file record formats.
//!
//! Every codec exposes the same two operations: pull the next record from a
//! source, and render a record back to its text layout. These traits capture
//! that shape so generic code (collection, batch rendering, format
//! conversion) does not depend on one format.
//!
//! # Example
//!
//! ```
//! use seqmetal::formats::genbank::GenbankParser;
//! use seqmetal::formats::primitives::{collect_records, render_all};
//! use std::io::Cursor;
//!
//! let text = "\
//! LOCUS       demo                       4 bp    DNA     linear   SYN 01-JAN-2024
//! ORIGIN
//!         1 acgt
//! //
//! ";
//! let records = collect_records(GenbankParser::new(Cursor::new(text)))?;
//! assert_eq!(render_all(&records), text);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// A record that renders back to its on-disk text.
pub trait FlatFileRecord {
    /// Header type carried by the record
    type Header;

    /// Header fields
    fn header(&self) -> &Self::Header;

    /// Record text, including its terminator line
    fn render(&self) -> String;
}

/// Pull-based record producer.
///
/// `Ok(None)` is the normal end of input.
pub trait RecordSource {
    /// Record type produced
    type Record;
    /// Error raised for malformed input
    type Error;

    /// Next record, or `None` once the input is exhausted
    fn next_record(&mut self) -> Result<Option<Self::Record>, Self::Error>;
}

/// Drain a source into a vector, stopping at the first error
pub fn collect_records<S: RecordSource>(mut source: S) -> Result<Vec<S::Record>, S::Error> {
    let mut records = Vec::new();
    while let Some(record) = source.next_record()? {
        records.push(record);
    }
    Ok(records)
}

/// Render records back to back
pub fn render_all<R: FlatFileRecord>(records: &[R]) -> String {
    records.iter().map(FlatFileRecord::render).collect()
}
