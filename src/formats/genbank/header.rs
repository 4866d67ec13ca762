//! Metadata section helpers
//!
//! The LOCUS line scanner, the top-level tag dispatch table, and the nested
//! SOURCE/ORGANISM and REFERENCE sub-parsers. Tags collect their lines in a
//! [`PendingTag`] until the next top-level line, then [`PendingTag::apply`]
//! writes them into [`Meta`].

use super::error::{GenbankError, LineContext};
use super::record::{BaseCount, Locus, Meta, Reference};
use super::writer::FIELD_COLUMN;
use crate::io::Line;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static LENGTH_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+) +(bp|aa|rc)\b").expect("length pattern is valid"));

static DATE_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{2}-[A-Z]{3}-\d{4}\b").expect("date pattern is valid"));

// Longer names first so "genomic DNA" wins over "DNA".
static MOLECULE_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:ss-|ds-|ms-)?(?:genomic DNA|genomic RNA|other DNA|other RNA|unassigned DNA|unassigned RNA|transcribed RNA|viral cRNA|mRNA|tRNA|rRNA|cRNA|DNA|RNA)\b",
    )
    .expect("molecule pattern is valid")
});

/// Three-letter GenBank divisions
pub const DIVISIONS: [&str; 20] = [
    "PRI", "ROD", "MAM", "VRT", "INV", "PLN", "BCT", "VRL", "PHG", "SYN", "UNA", "EST", "PAT",
    "STS", "GSS", "HTG", "HTC", "ENV", "CON", "TSA",
];

/// Scan a LOCUS line
///
/// Each field is found by its own pattern and left at its default when the
/// pattern does not match, so old column layouts and space-separated ones
/// both work.
pub fn parse_locus(line: &str) -> Locus {
    let rest = line
        .find("LOCUS")
        .map_or(line, |start| &line[start + "LOCUS".len()..])
        .trim_start();
    let (name, tail) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));

    let mut locus = Locus {
        name: name.to_string(),
        ..Locus::default()
    };

    // Molecule type and topology follow the length field when there is one
    let mut remainder = tail;
    if let Some(captures) = LENGTH_FIELD.captures(tail) {
        locus.sequence_length = captures[1].parse().unwrap_or_default();
        locus.sequence_coding = captures[2].to_string();
        if let Some(whole) = captures.get(0) {
            remainder = &tail[whole.end()..];
        }
    }

    if let Some(molecule) = MOLECULE_TYPE.find(remainder) {
        locus.molecule_type = molecule.as_str().to_string();
    }
    locus.circular = remainder.contains("circular");
    if let Some(division) = tail
        .split_whitespace()
        .find(|token| DIVISIONS.contains(token))
    {
        locus.genbank_division = division.to_string();
    }
    if let Some(date) = DATE_FIELD.find(tail) {
        locus.modification_date = date.as_str().to_string();
    }

    locus
}

/// Split `TAG value` into the tag and its trimmed value
pub(crate) fn split_tag(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((tag, value)) => (tag, value.trim()),
        None => (text, ""),
    }
}

/// Top-level tags, dispatched on when their block is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaTag {
    /// DEFINITION
    Definition,
    /// ACCESSION
    Accession,
    /// VERSION
    Version,
    /// KEYWORDS
    Keywords,
    /// SOURCE, with nested ORGANISM
    Source,
    /// REFERENCE, with nested sub-tags
    Reference,
    /// Anything else, stored in [`Meta::other`]
    Other(String),
}

impl MetaTag {
    /// Tag for a top-level name
    pub fn from_name(name: &str) -> Self {
        match name {
            "DEFINITION" => Self::Definition,
            "ACCESSION" => Self::Accession,
            "VERSION" => Self::Version,
            "KEYWORDS" => Self::Keywords,
            "SOURCE" => Self::Source,
            "REFERENCE" => Self::Reference,
            other => Self::Other(other.to_string()),
        }
    }

    /// Name as written in the file
    pub fn name(&self) -> &str {
        match self {
            Self::Definition => "DEFINITION",
            Self::Accession => "ACCESSION",
            Self::Version => "VERSION",
            Self::Keywords => "KEYWORDS",
            Self::Source => "SOURCE",
            Self::Reference => "REFERENCE",
            Self::Other(name) => name,
        }
    }
}

/// A top-level tag with the lines gathered for it so far.
#[derive(Debug, Clone)]
pub struct PendingTag {
    /// Which tag
    pub tag: MetaTag,
    /// Text after the tag on its opening line
    pub first: String,
    /// Indented lines that followed
    pub continuation: Vec<LineContext>,
    /// Opening line
    pub at: LineContext,
}

impl PendingTag {
    /// Open a tag from its first line
    pub fn open(line: &Line<'_>) -> Self {
        let (tag, value) = split_tag(line.text);
        Self {
            tag: MetaTag::from_name(tag),
            first: value.to_string(),
            continuation: Vec::new(),
            at: line.context(),
        }
    }

    /// Add an indented continuation line
    pub fn push(&mut self, line: &Line<'_>) {
        self.continuation.push(line.context());
    }

    /// Store the finished block in `meta`
    pub fn apply(self, meta: &mut Meta) -> Result<(), GenbankError> {
        match self.tag {
            MetaTag::Definition => meta.definition = join_lines(&self.first, &self.continuation),
            MetaTag::Accession => meta.accession = join_lines(&self.first, &self.continuation),
            MetaTag::Version => meta.version = join_lines(&self.first, &self.continuation),
            MetaTag::Keywords => meta.keywords = join_lines(&self.first, &self.continuation),
            MetaTag::Source => {
                let (source, organism, taxonomy) = parse_source(&self.first, &self.continuation);
                meta.source = source;
                meta.organism = organism;
                meta.taxonomy = taxonomy;
            }
            MetaTag::Reference => meta
                .references
                .push(parse_reference(&self.first, &self.continuation)?),
            MetaTag::Other(name) => {
                let value = join_lines(&self.first, &self.continuation);
                match meta.other.get_mut(&name) {
                    Some(existing) => {
                        warn!("{}: repeated {} tag merged into the first one", self.at, name);
                        existing.push(' ');
                        existing.push_str(&value);
                    }
                    None => {
                        meta.other.insert(name, value);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Trimmed lines joined with single spaces
fn join_lines(first: &str, continuation: &[LineContext]) -> String {
    std::iter::once(first)
        .chain(continuation.iter().map(|line| line.text.as_str()))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a SOURCE block into source text, organism, and taxonomy
fn parse_source(first: &str, continuation: &[LineContext]) -> (String, String, Vec<String>) {
    let mut source = first.trim().to_string();
    let mut organism = String::new();
    let mut lineage: Vec<&str> = Vec::new();
    let mut seen_organism = false;

    for line in continuation {
        let trimmed = line.text.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (tag, value) = split_tag(trimmed);
        if tag == "ORGANISM" && !seen_organism {
            organism = value.to_string();
            seen_organism = true;
        } else if seen_organism {
            lineage.push(trimmed);
        } else {
            source.push(' ');
            source.push_str(trimmed);
        }
    }

    // Join first so a taxon wrapped across lines stays one taxon
    let taxonomy = lineage
        .join(" ")
        .split(';')
        .map(|taxon| {
            let taxon = taxon.trim();
            taxon.strip_suffix('.').unwrap_or(taxon).trim().to_string()
        })
        .filter(|taxon| !taxon.is_empty())
        .collect();

    (source, organism, taxonomy)
}

/// Sub-tags of a REFERENCE block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceField {
    Authors,
    Consortium,
    Title,
    Journal,
    PubMed,
    Remark,
}

impl ReferenceField {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "AUTHORS" => Some(Self::Authors),
            "CONSRTM" => Some(Self::Consortium),
            "TITLE" => Some(Self::Title),
            "JOURNAL" => Some(Self::Journal),
            "PUBMED" => Some(Self::PubMed),
            "REMARK" => Some(Self::Remark),
            _ => None,
        }
    }

    fn slot(self, reference: &mut Reference) -> &mut String {
        match self {
            Self::Authors => &mut reference.authors,
            Self::Consortium => &mut reference.consortium,
            Self::Title => &mut reference.title,
            Self::Journal => &mut reference.journal,
            Self::PubMed => &mut reference.pubmed,
            Self::Remark => &mut reference.remark,
        }
    }
}

fn append_words(target: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}

/// Parse a REFERENCE block
///
/// Lines indented less than the field column open a sub-tag; deeper lines
/// continue the open one and are space-joined onto it.
fn parse_reference(first: &str, continuation: &[LineContext]) -> Result<Reference, GenbankError> {
    let mut reference = Reference::default();
    if let Some(open) = first.find('(') {
        reference.range = first[open..].trim().to_string();
    }

    let mut current: Option<ReferenceField> = None;
    for line in continuation {
        let trimmed = line.text.trim();
        if trimmed.is_empty() {
            continue;
        }
        let indent = line.text.len() - line.text.trim_start().len();

        if indent < FIELD_COLUMN {
            let (tag, value) = split_tag(trimmed);
            let field = ReferenceField::from_tag(tag).ok_or_else(|| {
                GenbankError::UnknownReferenceTag {
                    at: line.clone(),
                    tag: tag.to_string(),
                }
            })?;
            append_words(field.slot(&mut reference), value);
            current = Some(field);
        } else {
            match current {
                Some(field) => append_words(field.slot(&mut reference), trimmed),
                // Wrapped REFERENCE line
                None => append_words(&mut reference.range, trimmed),
            }
        }
    }

    Ok(reference)
}

/// Parse the `count base` pairs of a BASE COUNT line
pub fn parse_base_count(line: &Line<'_>) -> Result<Vec<BaseCount>, GenbankError> {
    let text = line.text.trim_start();
    let body = text.strip_prefix("BASE COUNT").unwrap_or(text);
    let tokens: Vec<&str> = body.split_whitespace().collect();

    let mut counts = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks(2) {
        match pair {
            [count, base] => {
                let count = count
                    .parse::<u64>()
                    .map_err(|source| GenbankError::InvalidBaseCount {
                        at: line.context(),
                        token: count.to_string(),
                        source,
                    })?;
                counts.push(BaseCount::new(*base, count));
            }
            [dangling] => warn!(
                "line {}: ignoring unpaired BASE COUNT token {:?}",
                line.number, dangling
            ),
            _ => {}
        }
    }
    Ok(counts)
}
