//! GenBank record parser
//!
//! # Format
//!
//! A record runs from a `LOCUS` line to a `//` line and has three sections:
//!
//! ```text
//! LOCUS       pUC19_lacZ               336 bp    DNA     linear   UNA 12-SEP-2023
//! DEFINITION  ...                       <- metadata: tag in columns 0-11,
//!             ...                          continuation lines indented
//! FEATURES             Location/Qualifiers
//!      CDS             13..336          <- feature key at column 5
//!                      /gene="lacZ"     <- qualifiers at column 21
//! ORIGIN
//!         1 gctgcaaggc gattaagttg ...   <- 60 bases per line
//! //
//! ```
//!
//! # Architecture
//!
//! Parsing is an explicit state machine. [`step`] is a pure function from the
//! current [`ParseState`] and one [`Line`] to the next state, plus a record
//! when the line completed one; [`GenbankParser`] only feeds it lines from a
//! [`LineReader`] and turns end of input into either normal termination
//! (between records) or [`GenbankError::Truncated`] (inside one).
//!
//! The first error aborts the record and resets the parser to
//! [`ParseState::SeekStart`]; pulling again skips ahead to the next `LOCUS`.
//!
//! # Example
//!
//! ```
//! use seqmetal::formats::genbank::GenbankParser;
//! use std::io::Cursor;
//!
//! # fn main() -> seqmetal::Result<()> {
//! let text = "\
//! LOCUS       demo                      12 bp    DNA     linear   SYN 01-JAN-2024
//! FEATURES             Location/Qualifiers
//!      gene            complement(1..6)
//!                      /gene=\"demo\"
//! ORIGIN
//!         1 atggctagca aa
//! //
//! ";
//!
//! let mut parser = GenbankParser::new(Cursor::new(text));
//! let record = parser.next_record()?.expect("one record");
//! assert_eq!(record.meta.locus.name, "demo");
//! assert_eq!(record.sequence(), "atggctagcaaa");
//! assert_eq!(record.feature_sequence(0)?, "agccat");
//! assert!(parser.next_record()?.is_none());
//! # Ok(())
//! # }
//! ```

use super::error::{GenbankError, LineContext, Section};
use super::header::{parse_base_count, parse_locus, split_tag, PendingTag};
use super::location::Location;
use super::record::{Attributes, Feature, GenbankRecord};
use crate::formats::primitives::RecordSource;
use crate::io::{DataSource, Line, LineReader, DEFAULT_MAX_LINE_LENGTH};
use log::{debug, trace};
use std::io::BufRead;
use std::path::Path;

/// Parser options.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Longest accepted line in bytes
    pub max_line_length: usize,
    /// Name reported in error contexts
    pub file_name: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            file_name: None,
        }
    }
}

impl ParserConfig {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the longest accepted line
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Set the name reported in error contexts
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }
}

/// Where the parser is between two lines.
#[derive(Debug, Default)]
pub enum ParseState {
    /// Between records, waiting for a `LOCUS` line
    #[default]
    SeekStart,
    /// Reading top-level tags
    Metadata(Box<RecordBuilder>),
    /// Reading the feature table
    Features(Box<RecordBuilder>),
    /// Reading ORIGIN sequence lines
    Sequence(Box<RecordBuilder>),
    /// Reading a CONTIG expression
    Contig(Box<RecordBuilder>),
}

impl ParseState {
    /// Section being read, or `None` between records
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::SeekStart => None,
            Self::Metadata(_) => Some(Section::Metadata),
            Self::Features(_) => Some(Section::Features),
            Self::Sequence(_) => Some(Section::Sequence),
            Self::Contig(_) => Some(Section::Contig),
        }
    }
}

/// Result of one [`step`]: the next state and a record if one was completed
pub type Step = (ParseState, Option<GenbankRecord>);

/// Advance the state machine by one line
///
/// # Errors
///
/// Any malformed line; see [`GenbankError`]. The in-progress record is
/// dropped with the consumed state.
pub fn step(state: ParseState, line: &Line<'_>) -> Result<Step, GenbankError> {
    match state {
        ParseState::SeekStart => Ok((seek_start(line), None)),
        ParseState::Metadata(builder) => metadata(builder, line),
        ParseState::Features(builder) => features(builder, line),
        ParseState::Sequence(builder) => sequence(builder, line),
        ParseState::Contig(builder) => contig(builder, line),
    }
}

fn seek_start(line: &Line<'_>) -> ParseState {
    if !line.text.contains("LOCUS") {
        return ParseState::SeekStart;
    }
    let mut builder = RecordBuilder::default();
    builder.record.meta.locus = parse_locus(line.text);
    trace!(
        "line {}: record {} started",
        line.number,
        builder.record.meta.locus.name
    );
    ParseState::Metadata(Box::new(builder))
}

fn metadata(mut builder: Box<RecordBuilder>, line: &Line<'_>) -> Result<Step, GenbankError> {
    if line.text.is_empty() {
        return Err(GenbankError::EmptyMetadataLine { at: line.context() });
    }

    if line.indent() > 0 {
        match builder.pending_tag.as_mut() {
            Some(pending) => pending.push(line),
            None => {
                return Err(GenbankError::UnexpectedLine {
                    at: line.context(),
                    section: Section::Metadata,
                })
            }
        }
        return Ok((ParseState::Metadata(builder), None));
    }

    builder.flush_tag()?;

    if line.text.starts_with("//") {
        return Ok((ParseState::SeekStart, Some(builder.finish())));
    }
    if line.text.starts_with("BASE COUNT") {
        let counts = parse_base_count(line)?;
        builder.record.meta.base_count.extend(counts);
        return Ok((ParseState::Metadata(builder), None));
    }

    let (tag, rest) = split_tag(line.text);
    match tag {
        "FEATURES" => {
            trace!("line {}: metadata -> features", line.number);
            builder.after_header = true;
            Ok((ParseState::Features(builder), None))
        }
        "ORIGIN" => Ok((builder.start_sequence(rest, line), None)),
        "CONTIG" => Ok((builder.start_contig(rest, line), None)),
        _ => {
            builder.pending_tag = Some(PendingTag::open(line));
            Ok((ParseState::Metadata(builder), None))
        }
    }
}

fn features(mut builder: Box<RecordBuilder>, line: &Line<'_>) -> Result<Step, GenbankError> {
    if line.is_blank() {
        return Ok((ParseState::Features(builder), None));
    }
    if line.indent() > 0 {
        builder.feature_line(line)?;
        return Ok((ParseState::Features(builder), None));
    }

    builder.flush_feature()?;

    if line.text.starts_with("//") {
        return Ok((ParseState::SeekStart, Some(builder.finish())));
    }
    if line.text.starts_with("BASE COUNT") {
        let counts = parse_base_count(line)?;
        builder.record.meta.base_count.extend(counts);
        return Ok((ParseState::Features(builder), None));
    }

    let (tag, rest) = split_tag(line.text);
    match tag {
        "ORIGIN" => Ok((builder.start_sequence(rest, line), None)),
        "CONTIG" => Ok((builder.start_contig(rest, line), None)),
        _ => Err(GenbankError::UnexpectedLine {
            at: line.context(),
            section: Section::Features,
        }),
    }
}

fn sequence(mut builder: Box<RecordBuilder>, line: &Line<'_>) -> Result<Step, GenbankError> {
    if line.text.starts_with("//") {
        return Ok((ParseState::SeekStart, Some(builder.finish())));
    }
    if line.text.len() < 2 {
        return Err(GenbankError::ShortSequenceLine { at: line.context() });
    }
    // Drop the running position and block spacing
    builder
        .record
        .sequence
        .extend(line.text.chars().filter(char::is_ascii_alphabetic));
    Ok((ParseState::Sequence(builder), None))
}

fn contig(mut builder: Box<RecordBuilder>, line: &Line<'_>) -> Result<Step, GenbankError> {
    if line.text.starts_with("//") {
        return Ok((ParseState::SeekStart, Some(builder.finish())));
    }
    if line.indent() == 0 {
        return Err(GenbankError::UnexpectedLine {
            at: line.context(),
            section: Section::Contig,
        });
    }
    builder
        .record
        .meta
        .contig
        .get_or_insert_with(String::new)
        .push_str(line.text.trim());
    Ok((ParseState::Contig(builder), None))
}

/// A record under construction, carried by the non-idle [`ParseState`]s.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    record: GenbankRecord,
    pending_tag: Option<PendingTag>,
    feature: Option<PendingFeature>,
    feature_column: usize,
    after_header: bool,
}

#[derive(Debug)]
struct PendingFeature {
    feature_type: String,
    location: String,
    at: LineContext,
    attributes: Attributes,
    qualifier: Option<PendingQualifier>,
}

#[derive(Debug)]
struct PendingQualifier {
    key: String,
    value: String,
    open_quote: bool,
}

impl RecordBuilder {
    /// Record as built so far
    pub fn record(&self) -> &GenbankRecord {
        &self.record
    }

    fn flush_tag(&mut self) -> Result<(), GenbankError> {
        match self.pending_tag.take() {
            Some(pending) => pending.apply(&mut self.record.meta),
            None => Ok(()),
        }
    }

    fn start_sequence(mut self: Box<Self>, origin: &str, line: &Line<'_>) -> ParseState {
        trace!("line {}: -> sequence", line.number);
        self.record.meta.origin = origin.to_string();
        ParseState::Sequence(self)
    }

    fn start_contig(mut self: Box<Self>, expression: &str, line: &Line<'_>) -> ParseState {
        trace!("line {}: -> contig", line.number);
        self.record.meta.contig = Some(expression.to_string());
        ParseState::Contig(self)
    }

    fn feature_line(&mut self, line: &Line<'_>) -> Result<(), GenbankError> {
        let indent = line.indent();
        if self.after_header {
            self.feature_column = indent;
            self.after_header = false;
        }

        if indent <= self.feature_column || self.feature.is_none() {
            self.flush_feature()?;
            self.feature = Some(PendingFeature::open(line)?);
            return Ok(());
        }

        let trimmed = line.text.trim();
        let Some(feature) = self.feature.as_mut() else {
            return Err(GenbankError::MalformedFeature { at: line.context() });
        };
        let in_quotes = feature
            .qualifier
            .as_ref()
            .map_or(false, |qualifier| qualifier.open_quote);

        if trimmed.starts_with('/') && !in_quotes {
            feature.open_qualifier(trimmed);
        } else if feature.qualifier.is_none() {
            feature.location.push_str(trimmed);
        } else {
            feature.continue_qualifier(trimmed);
        }
        Ok(())
    }

    fn flush_feature(&mut self) -> Result<(), GenbankError> {
        let Some(mut pending) = self.feature.take() else {
            return Ok(());
        };
        pending.flush_qualifier();

        let PendingFeature {
            feature_type,
            location,
            at,
            attributes,
            ..
        } = pending;
        let parsed = Location::parse(&location).map_err(|source| GenbankError::InvalidLocation {
            at,
            location,
            source,
        })?;

        let mut feature = Feature::new(feature_type, parsed);
        feature.attributes = attributes;
        self.record.add_feature(feature);
        Ok(())
    }

    fn finish(self: Box<Self>) -> GenbankRecord {
        let record = self.record;
        debug!(
            "parsed GenBank record {} ({} features, {} bases)",
            record.meta.locus.name,
            record.features.len(),
            record.sequence.len()
        );
        record
    }
}

impl PendingFeature {
    fn open(line: &Line<'_>) -> Result<Self, GenbankError> {
        let mut tokens = line.text.split_whitespace();
        let (Some(feature_type), Some(location)) = (tokens.next(), tokens.next()) else {
            return Err(GenbankError::MalformedFeature { at: line.context() });
        };
        let mut location = location.to_string();
        location.extend(tokens);

        Ok(Self {
            feature_type: feature_type.to_string(),
            location,
            at: line.context(),
            attributes: Attributes::new(),
            qualifier: None,
        })
    }

    fn open_qualifier(&mut self, trimmed: &str) {
        self.flush_qualifier();
        let body = &trimmed[1..];
        let qualifier = match body.split_once('=') {
            // Bare `/pseudo`
            None => PendingQualifier {
                key: body.trim().to_string(),
                value: String::new(),
                open_quote: false,
            },
            Some((key, raw)) => {
                let raw = raw.trim();
                let (value, open_quote) = match raw.strip_prefix('"') {
                    Some(quoted) => match quoted.strip_suffix('"') {
                        Some(inner) => (inner, false),
                        None => (quoted, true),
                    },
                    None => (raw, false),
                };
                PendingQualifier {
                    key: key.trim().to_string(),
                    value: value.to_string(),
                    open_quote,
                }
            }
        };
        self.qualifier = Some(qualifier);
    }

    fn continue_qualifier(&mut self, trimmed: &str) {
        let Some(qualifier) = self.qualifier.as_mut() else {
            return;
        };
        let mut fragment = trimmed;
        if qualifier.open_quote {
            if let Some(inner) = fragment.strip_suffix('"') {
                fragment = inner;
                qualifier.open_quote = false;
            }
        }
        qualifier.value.push_str(fragment);
    }

    fn flush_qualifier(&mut self) {
        if let Some(qualifier) = self.qualifier.take() {
            self.attributes.insert(qualifier.key, qualifier.value);
        }
    }
}

/// Streaming GenBank parser.
///
/// Yields one [`GenbankRecord`] per `LOCUS` ... `//` block.
///
/// # Example
///
/// ```no_run
/// use seqmetal::formats::genbank::GenbankParser;
///
/// # fn main() -> seqmetal::Result<()> {
/// let parser = GenbankParser::from_path("plasmids.gb")?;
///
/// for record in parser {
///     let record = record?;
///     println!("{}\t{} features", record.meta.locus.name, record.features.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct GenbankParser<R> {
    lines: LineReader<R>,
    state: ParseState,
    finished: bool,
}

impl<R: BufRead> GenbankParser<R> {
    /// Create a parser with default options
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ParserConfig::default())
    }

    /// Create a parser with explicit options
    pub fn with_config(reader: R, config: ParserConfig) -> Self {
        let mut lines = LineReader::with_max_line_length(reader, config.max_line_length);
        if let Some(name) = config.file_name {
            lines = lines.with_file_name(name);
        }
        Self {
            lines,
            state: ParseState::SeekStart,
            finished: false,
        }
    }

    /// Lines consumed so far
    pub fn line_number(&self) -> usize {
        self.lines.line_number()
    }

    /// Parse the next record, or `None` once the input is exhausted
    ///
    /// # Errors
    ///
    /// The first malformed line of a record, or [`GenbankError::Truncated`]
    /// when the input ends before `//`.
    pub fn next_record(&mut self) -> Result<Option<GenbankRecord>, GenbankError> {
        self.advance()
    }

    fn advance(&mut self) -> Result<Option<GenbankRecord>, GenbankError> {
        if self.finished {
            return Ok(None);
        }
        loop {
            let line = match self.lines.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    self.state = ParseState::SeekStart;
                    if err.is_fatal() {
                        self.finished = true;
                    }
                    return Err(err.into());
                }
            };

            let state = std::mem::take(&mut self.state);
            let (next, record) = step(state, &line)?;
            self.state = next;
            if record.is_some() {
                return Ok(record);
            }
        }

        self.finished = true;
        match std::mem::take(&mut self.state).section() {
            None => Ok(None),
            Some(section) => Err(GenbankError::Truncated {
                at: LineContext {
                    file: self.lines.file_name().map(str::to_string),
                    number: self.lines.line_number(),
                    text: String::new(),
                },
                section,
            }),
        }
    }
}

impl GenbankParser<Box<dyn BufRead + Send>> {
    /// Create a parser over a data source, named after it in errors
    pub fn from_source(source: DataSource) -> Result<Self, GenbankError> {
        Self::from_source_with_config(source, ParserConfig::default())
    }

    /// Create a parser over a data source with explicit options
    pub fn from_source_with_config(
        source: DataSource,
        config: ParserConfig,
    ) -> Result<Self, GenbankError> {
        let reader = source.open()?;
        let config = match config.file_name {
            Some(_) => config,
            None => config.with_file_name(source.name()),
        };
        Ok(Self::with_config(reader, config))
    }

    /// Create a parser from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GenbankError> {
        Self::from_source(DataSource::from_path(path))
    }
}

impl<R: BufRead> Iterator for GenbankParser<R> {
    type Item = Result<GenbankRecord, GenbankError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}

impl<R: BufRead> RecordSource for GenbankParser<R> {
    type Record = GenbankRecord;
    type Error = GenbankError;

    fn next_record(&mut self) -> Result<Option<GenbankRecord>, GenbankError> {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::LineError;
    use std::io::Cursor;

    const SMALL_RECORD: &str = "\
LOCUS       tiny                      20 bp    DNA     circular SYN 01-JAN-2024
DEFINITION  A tiny test
            record.
ACCESSION   TINY01
KEYWORDS    .
SOURCE      synthetic DNA construct
  ORGANISM  synthetic DNA construct
            other sequences; artificial sequences.
COMMENT     first comment line
            second comment line
FEATURES             Location/Qualifiers
     source          1..20
                     /organism=\"synthetic DNA construct\"
                     /mol_type=\"other DNA\"
     gene            join(1..3,
                     10..12)
                     /gene=\"tny\"
                     /pseudo
     CDS             complement(4..9)
                     /note=\"first\"
                     /note=\"second\"
                     /translation=\"MAS
                     KL\"
BASE COUNT        5 a    5 c    5 g    5 t
ORIGIN
        1 atggctagca aatttccggg
//
";

    fn parse_one(text: &str) -> Result<GenbankRecord, GenbankError> {
        GenbankParser::new(Cursor::new(text))
            .next_record()
            .map(|record| record.expect("a record"))
    }

    /// Drive `step` over `lines` numbered from 1, collecting emitted records
    fn drive(lines: &[&str]) -> Result<(ParseState, Vec<GenbankRecord>), GenbankError> {
        let mut state = ParseState::SeekStart;
        let mut records = Vec::new();
        for (i, text) in lines.iter().enumerate() {
            let (next, record) = step(state, &Line::new(i + 1, text))?;
            state = next;
            records.extend(record);
        }
        Ok((state, records))
    }

    #[test]
    fn test_parse_small_record() {
        let record = parse_one(SMALL_RECORD).unwrap();

        assert_eq!(record.meta.locus.name, "tiny");
        assert!(record.meta.locus.circular);
        assert_eq!(record.meta.definition, "A tiny test record.");
        assert_eq!(record.meta.accession, "TINY01");
        assert_eq!(record.meta.keywords, ".");
        assert_eq!(record.meta.organism, "synthetic DNA construct");
        assert_eq!(record.meta.taxonomy, ["other sequences", "artificial sequences"]);
        assert_eq!(
            record.meta.other.get("COMMENT").map(String::as_str),
            Some("first comment line second comment line")
        );
        assert_eq!(record.meta.base_count.len(), 4);
        assert_eq!(record.sequence(), "atggctagcaaatttccggg");
        assert_eq!(record.features.len(), 3);
    }

    #[test]
    fn test_feature_table_shapes() {
        let record = parse_one(SMALL_RECORD).unwrap();

        let gene = &record.features[1];
        assert_eq!(gene.feature_type, "gene");
        assert_eq!(gene.location().render(), "join(1..3,10..12)");
        assert_eq!(gene.attributes.first("gene"), Some("tny"));
        assert_eq!(gene.attributes["pseudo"], [String::new()]);

        let cds = &record.features[2];
        assert!(cds.location().complement);
        assert_eq!(cds.attributes["note"], ["first".to_string(), "second".to_string()]);
        assert_eq!(cds.attributes.first("translation"), Some("MASKL"));
    }

    #[test]
    fn test_step_is_driveable_without_reader() {
        let (state, records) = drive(&[
            "junk before the first record",
            "LOCUS       stepper  3 bp    DNA     linear   SYN 01-JAN-2024",
            "FEATURES             Location/Qualifiers",
            "     misc_feature    1..3",
            "ORIGIN",
        ])
        .unwrap();
        assert_eq!(state.section(), Some(Section::Sequence));
        assert!(records.is_empty());

        let (next, record) = step(state, &Line::new(6, "        1 acg")).unwrap();
        assert!(record.is_none());
        let (next, record) = step(next, &Line::new(7, "//")).unwrap();
        assert!(next.section().is_none());
        assert_eq!(record.map(|r| r.sequence), Some("acg".to_string()));
    }

    #[test]
    fn test_record_without_features() {
        let record = parse_one(
            "LOCUS       bare  4 bp    DNA     linear   SYN 01-JAN-2024\nDEFINITION  bare.\nORIGIN\n        1 acgt\n//\n",
        )
        .unwrap();
        assert!(record.features.is_empty());
        assert_eq!(record.meta.definition, "bare.");
        assert_eq!(record.sequence(), "acgt");
    }

    #[test]
    fn test_contig_record() {
        let record = parse_one(
            "LOCUS       asm  2000 bp    DNA     linear   CON 01-JAN-2024\n\
             FEATURES             Location/Qualifiers\n     source          1..2000\n\
             CONTIG      join(AB000001.1:1..1000,\n            gap(100),AB000002.1:1..900)\n//\n",
        )
        .unwrap();
        assert_eq!(
            record.meta.contig.as_deref(),
            Some("join(AB000001.1:1..1000,gap(100),AB000002.1:1..900)")
        );
        assert!(record.sequence().is_empty());
    }

    #[test]
    fn test_multiple_records() {
        let text = format!("{}{}", SMALL_RECORD, SMALL_RECORD.replace("tiny ", "tiny2"));
        let records: Vec<_> = GenbankParser::new(Cursor::new(text))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].meta.locus.name, "tiny2");
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let mut parser = GenbankParser::new(Cursor::new("\n\n"));
        assert!(parser.next_record().unwrap().is_none());
    }

    #[test]
    fn test_truncated_record() {
        let text = SMALL_RECORD.replace("//\n", "");
        let err = GenbankParser::new(Cursor::new(text)).next_record().unwrap_err();
        assert!(matches!(
            err,
            GenbankError::Truncated {
                section: Section::Sequence,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_metadata_line() {
        let err = parse_one("LOCUS       x  1 bp    DNA\n\nDEFINITION  y\n").unwrap_err();
        match err {
            GenbankError::EmptyMetadataLine { at } => assert_eq!(at.number, 2),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_short_sequence_line() {
        let err = parse_one("LOCUS       x  1 bp    DNA\nORIGIN\n \n//\n").unwrap_err();
        assert!(matches!(err, GenbankError::ShortSequenceLine { .. }));
    }

    #[test]
    fn test_feature_line_without_location() {
        let err = parse_one(
            "LOCUS       x  1 bp    DNA\nFEATURES             Location/Qualifiers\n     gene\n",
        )
        .unwrap_err();
        assert!(matches!(err, GenbankError::MalformedFeature { .. }));
    }

    #[test]
    fn test_invalid_location_reports_feature_line() {
        let err = parse_one(
            "LOCUS       x  9 bp    DNA\nFEATURES             Location/Qualifiers\n     gene            join(1..3,\nORIGIN\n//\n",
        )
        .unwrap_err();
        match err {
            GenbankError::InvalidLocation { at, location, .. } => {
                assert_eq!(at.number, 3);
                assert_eq!(location, "join(1..3,");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_error_names_file() {
        let config = ParserConfig::new().with_file_name("broken.gb");
        let mut parser = GenbankParser::with_config(
            Cursor::new("LOCUS       x  1 bp    DNA\nBASE COUNT    1 a q c\n"),
            config,
        );
        let err = parser.next_record().unwrap_err();
        assert_eq!(
            err.line().and_then(|at| at.file.as_deref()),
            Some("broken.gb")
        );
    }

    #[test]
    fn test_parser_resynchronises_after_error() {
        let text = format!(
            "LOCUS       bad  1 bp    DNA\n\n{}",
            SMALL_RECORD
        );
        let mut parser = GenbankParser::new(Cursor::new(text));
        assert!(parser.next_record().is_err());
        let record = parser.next_record().unwrap().unwrap();
        assert_eq!(record.meta.locus.name, "tiny");
    }

    #[test]
    fn test_line_length_limit() {
        let config = ParserConfig::new().with_max_line_length(40);
        let mut parser = GenbankParser::with_config(Cursor::new(SMALL_RECORD), config);
        assert!(matches!(
            parser.next_record(),
            Err(GenbankError::Line(LineError::TooLong { max: 40, .. }))
        ));
        // Over-long lines end the stream instead of resuming mid-record
        assert!(parser.next_record().unwrap().is_none());
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_slash_inside_open_quote_is_continuation() {
        let record = parse_one(
            "LOCUS       x  3 bp    DNA\nFEATURES             Location/Qualifiers\n\
             \x20    misc_feature    1..3\n                     /note=\"a/b\n\
             \x20                    /c\"\nORIGIN\n        1 acg\n//\n",
        )
        .unwrap();
        assert_eq!(record.features[0].attributes.first("note"), Some("a/b/c"));
    }
}
