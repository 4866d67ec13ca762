//! GenBank flat-file writer
//!
//! Rendering is a pure function of the record ([`render`], or `Display` on
//! [`GenbankRecord`]); [`GenbankWriter`] streams rendered records to a
//! [`DataSink`].
//!
//! # Layout
//!
//! - Metadata: tag left-justified in a 12-column field, value word-wrapped
//!   with continuation lines indented to column 12
//! - Features: key at column 5 in a 16-column field, location at column 21,
//!   qualifiers at column 21 as `/key="value"`
//! - Sequence: 60 bases per line in blocks of 10, after a right-justified
//!   9-column 1-based position
//! - Terminator: `//`
//!
//! Values are wrapped where the parser can rejoin them unchanged: metadata at
//! spaces, locations after commas, and qualifier values only when they hold
//! no whitespace (continuation fragments are concatenated as-is).
//!
//! # Example
//!
//! ```no_run
//! use seqmetal::formats::genbank::{GenbankParser, GenbankWriter};
//!
//! # fn main() -> seqmetal::Result<()> {
//! let parser = GenbankParser::from_path("input.gb")?;
//! let mut writer = GenbankWriter::create("copy.gb")?;
//! writer.write_all(parser)?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```

use super::record::{Feature, GenbankRecord, Meta, Reference};
use crate::error::{Result, SeqmetalError};
use crate::formats::primitives::FlatFileRecord;
use crate::io::DataSink;
use log::debug;
use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Width of the metadata tag field
pub const FIELD_COLUMN: usize = 12;
/// Indent of a feature key
pub const FEATURE_INDENT: usize = 5;
/// Width of the feature key field
pub const FEATURE_TYPE_WIDTH: usize = 16;
/// Column of feature locations and qualifiers
pub const QUALIFIER_COLUMN: usize = FEATURE_INDENT + FEATURE_TYPE_WIDTH;
/// Longest line the writer produces when values can be wrapped
pub const LINE_WIDTH: usize = 79;
/// Bases per sequence line
pub const BASES_PER_LINE: usize = 60;
/// Bases per space-separated block
pub const BASES_PER_BLOCK: usize = 10;
/// Width of the position counter on sequence lines
pub const COUNTER_WIDTH: usize = 9;

/// Greedy word wrap; a word longer than `width` gets a line of its own
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Break after commas so each line fits `width` where possible
fn wrap_at_commas(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for piece in text.split_inclusive(',') {
        if !current.is_empty() && current.len() + piece.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        current.push_str(piece);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split into runs of at most `width` characters
fn chunk_chars(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Tag padded to the field column, always followed by at least one space
fn field_name(name: &str) -> String {
    if name.len() < FIELD_COLUMN {
        format!("{:<width$}", name, width = FIELD_COLUMN)
    } else {
        format!("{} ", name)
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, name: &str, value: &str) -> fmt::Result {
    let lines = wrap(value, LINE_WIDTH - FIELD_COLUMN);
    let mut lines = lines.iter();
    match lines.next() {
        Some(first) => writeln!(f, "{}{}", field_name(name), first)?,
        None => writeln!(f, "{}", name)?,
    }
    for line in lines {
        writeln!(f, "{:indent$}{}", "", line, indent = FIELD_COLUMN)?;
    }
    Ok(())
}

/// Name written for a record whose locus name is empty
pub const PLACEHOLDER_NAME: &str = "unnamed";

fn write_locus(f: &mut fmt::Formatter<'_>, meta: &Meta) -> fmt::Result {
    let locus = &meta.locus;
    // An empty name would let the length token be read back as the name
    let name = if locus.name.is_empty() {
        PLACEHOLDER_NAME
    } else {
        locus.name.as_str()
    };
    let coding = if locus.sequence_coding.is_empty() {
        "bp"
    } else {
        locus.sequence_coding.as_str()
    };
    let topology = if locus.circular { "circular" } else { "linear" };
    let line = format!(
        "LOCUS       {:<16} {:>11} {}    {:<7} {:<8} {} {}",
        name,
        locus.sequence_length,
        coding,
        locus.molecule_type,
        topology,
        locus.genbank_division,
        locus.modification_date
    );
    writeln!(f, "{}", line.trim_end())
}

fn write_source(f: &mut fmt::Formatter<'_>, meta: &Meta) -> fmt::Result {
    if meta.source.is_empty() && meta.organism.is_empty() && meta.taxonomy.is_empty() {
        return Ok(());
    }
    write_field(f, "SOURCE", &meta.source)?;
    if meta.organism.is_empty() && meta.taxonomy.is_empty() {
        return Ok(());
    }
    // Organism stays on one line; only the lineage wraps
    writeln!(f, "{}{}", field_name("  ORGANISM"), meta.organism)?;
    if !meta.taxonomy.is_empty() {
        let lineage = format!("{}.", meta.taxonomy.join("; "));
        for line in wrap(&lineage, LINE_WIDTH - FIELD_COLUMN) {
            writeln!(f, "{:indent$}{}", "", line, indent = FIELD_COLUMN)?;
        }
    }
    Ok(())
}

fn write_reference(f: &mut fmt::Formatter<'_>, number: usize, reference: &Reference) -> fmt::Result {
    if reference.range.is_empty() {
        writeln!(f, "{}{}", field_name("REFERENCE"), number)?;
    } else {
        writeln!(f, "{}{}  {}", field_name("REFERENCE"), number, reference.range)?;
    }
    let sub_tags = [
        ("  AUTHORS", &reference.authors),
        ("  CONSRTM", &reference.consortium),
        ("  TITLE", &reference.title),
        ("  JOURNAL", &reference.journal),
        ("   PUBMED", &reference.pubmed),
        ("  REMARK", &reference.remark),
    ];
    for (tag, value) in sub_tags {
        if !value.is_empty() {
            write_field(f, tag, value)?;
        }
    }
    Ok(())
}

fn write_feature(f: &mut fmt::Formatter<'_>, feature: &Feature) -> fmt::Result {
    let location = feature
        .location()
        .source_text()
        .map_or_else(|| feature.location().render(), str::to_string);
    let key = if feature.feature_type.len() < FEATURE_TYPE_WIDTH {
        format!("{:<width$}", feature.feature_type, width = FEATURE_TYPE_WIDTH)
    } else {
        format!("{} ", feature.feature_type)
    };

    let width = LINE_WIDTH - QUALIFIER_COLUMN;
    let mut lines = wrap_at_commas(&location, width).into_iter();
    if let Some(first) = lines.next() {
        writeln!(f, "{:indent$}{}{}", "", key, first, indent = FEATURE_INDENT)?;
    }
    for line in lines {
        writeln!(f, "{:indent$}{}", "", line, indent = QUALIFIER_COLUMN)?;
    }

    for (name, value) in feature.attributes.pairs() {
        let qualifier = format!("/{}=\"{}\"", name, value);
        let wrappable = qualifier.len() > width
            && name.len() + 3 < width
            && !value.chars().any(char::is_whitespace);
        let lines = if wrappable {
            chunk_chars(&qualifier, width)
        } else {
            vec![qualifier]
        };
        for line in lines {
            writeln!(f, "{:indent$}{}", "", line, indent = QUALIFIER_COLUMN)?;
        }
    }
    Ok(())
}

fn write_sequence(f: &mut fmt::Formatter<'_>, sequence: &str) -> fmt::Result {
    for (i, line) in sequence.as_bytes().chunks(BASES_PER_LINE).enumerate() {
        write!(f, "{:>width$}", i * BASES_PER_LINE + 1, width = COUNTER_WIDTH)?;
        for block in line.chunks(BASES_PER_BLOCK) {
            write!(f, " {}", String::from_utf8_lossy(block))?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for GenbankRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.meta;
        write_locus(f, meta)?;

        let simple_fields = [
            ("DEFINITION", &meta.definition),
            ("ACCESSION", &meta.accession),
            ("VERSION", &meta.version),
            ("KEYWORDS", &meta.keywords),
        ];
        for (name, value) in simple_fields {
            if !value.is_empty() {
                write_field(f, name, value)?;
            }
        }

        write_source(f, meta)?;
        for (i, reference) in meta.references.iter().enumerate() {
            write_reference(f, i + 1, reference)?;
        }
        for (name, value) in &meta.other {
            write_field(f, name, value)?;
        }

        if !self.features.is_empty() {
            writeln!(f, "{:<21}Location/Qualifiers", "FEATURES")?;
            for feature in &self.features {
                write_feature(f, feature)?;
            }
        }

        if !meta.base_count.is_empty() {
            write!(f, "BASE COUNT ")?;
            for count in &meta.base_count {
                write!(f, " {:>7} {}", count.count, count.base)?;
            }
            writeln!(f)?;
        }

        match &meta.contig {
            Some(contig) if self.sequence.is_empty() => {
                let lines = wrap_at_commas(contig, LINE_WIDTH - FIELD_COLUMN);
                for (i, line) in lines.iter().enumerate() {
                    if i == 0 {
                        writeln!(f, "{}{}", field_name("CONTIG"), line)?;
                    } else {
                        writeln!(f, "{:indent$}{}", "", line, indent = FIELD_COLUMN)?;
                    }
                }
            }
            _ => {
                if meta.origin.is_empty() {
                    writeln!(f, "ORIGIN")?;
                } else {
                    writeln!(f, "{}{}", field_name("ORIGIN"), meta.origin)?;
                }
                write_sequence(f, &self.sequence)?;
            }
        }

        writeln!(f, "//")
    }
}

/// Render one record as GenBank text
pub fn render(record: &GenbankRecord) -> String {
    record.to_string()
}

/// Render records back to back, as in a multi-record file
pub fn render_multi<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a GenbankRecord>,
{
    records.into_iter().map(render).collect()
}

impl FlatFileRecord for GenbankRecord {
    type Header = Meta;

    fn header(&self) -> &Meta {
        &self.meta
    }

    fn render(&self) -> String {
        render(self)
    }
}

/// Streaming GenBank writer.
///
/// # Example
///
/// ```no_run
/// use seqmetal::formats::genbank::{GenbankRecord, GenbankWriter, Meta};
///
/// # fn main() -> seqmetal::Result<()> {
/// let mut record = GenbankRecord::new(Meta::default());
/// record.meta.locus.name = "demo".to_string();
/// record.set_sequence("acgt");
///
/// let mut writer = GenbankWriter::create("demo.gb")?;
/// writer.write_record(&record)?;
/// writer.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct GenbankWriter {
    writer: BufWriter<Box<dyn Write + Send>>,
    sink_name: String,
    records_written: usize,
}

impl GenbankWriter {
    /// Create a writer over a data sink
    pub fn new(sink: DataSink) -> Result<Self> {
        let writer = sink.open()?;
        Ok(Self {
            writer,
            sink_name: sink.name(),
            records_written: 0,
        })
    }

    /// Create a writer to a file, truncating it
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSink::from_path(path))
    }

    /// Create a writer to standard output
    pub fn stdout() -> Result<Self> {
        Self::new(DataSink::stdout())
    }

    /// Write a single record
    pub fn write_record(&mut self, record: &GenbankRecord) -> Result<()> {
        write!(self.writer, "{}", record)?;
        self.records_written += 1;
        Ok(())
    }

    /// Write every record from an iterator, stopping at the first error
    ///
    /// Accepts a [`GenbankParser`](super::GenbankParser) directly.
    pub fn write_all<I, E>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = std::result::Result<GenbankRecord, E>>,
        E: Into<SeqmetalError>,
    {
        for record in records {
            self.write_record(&record.map_err(Into::into)?)?;
        }
        Ok(())
    }

    /// Records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and close the writer
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        debug!(
            "wrote {} GenBank records to {}",
            self.records_written, self.sink_name
        );
        Ok(())
    }
}
