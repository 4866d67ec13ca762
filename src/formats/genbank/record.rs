//! GenBank record model
//!
//! A [`GenbankRecord`] owns its [`Meta`] header, its ordered [`Feature`] table
//! and the raw sequence text. Features do not point back at their record;
//! sequence extraction goes through the record
//! ([`GenbankRecord::feature_sequence`]) with the feature's index as handle.

use super::location::Location;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::ops::Index;

/// Fields of the LOCUS line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locus {
    /// Locus name (first token after `LOCUS`)
    pub name: String,
    /// Declared sequence length
    pub sequence_length: u64,
    /// Molecule type (`DNA`, `mRNA`, `ss-RNA`, ...)
    pub molecule_type: String,
    /// Three-letter GenBank division (`PRI`, `BCT`, `UNA`, ...)
    pub genbank_division: String,
    /// Modification date as written (`12-SEP-2023`)
    pub modification_date: String,
    /// Unit of the length field (`bp`, `aa`, `rc`)
    pub sequence_coding: String,
    /// Topology is circular
    pub circular: bool,
}

/// One REFERENCE block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    /// AUTHORS
    pub authors: String,
    /// TITLE
    pub title: String,
    /// JOURNAL
    pub journal: String,
    /// PUBMED identifier
    pub pubmed: String,
    /// REMARK
    pub remark: String,
    /// CONSRTM
    pub consortium: String,
    /// Parenthesised range from the REFERENCE line, e.g. `(bases 1 to 336)`
    pub range: String,
}

/// One `count base` pair of the BASE COUNT line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseCount {
    /// Base name as written (`a`, `c`, `others`, ...)
    pub base: String,
    /// Occurrences
    pub count: u64,
}

impl BaseCount {
    /// Create a base count entry
    pub fn new(base: impl Into<String>, count: u64) -> Self {
        Self {
            base: base.into(),
            count,
        }
    }
}

/// Record header: everything between LOCUS and the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    /// LOCUS line
    pub locus: Locus,
    /// DEFINITION
    pub definition: String,
    /// ACCESSION
    pub accession: String,
    /// VERSION
    pub version: String,
    /// KEYWORDS
    pub keywords: String,
    /// SOURCE (first line and anything before ORGANISM)
    pub source: String,
    /// ORGANISM sub-tag of SOURCE
    pub organism: String,
    /// Lineage lines under ORGANISM, split on `;`
    pub taxonomy: Vec<String>,
    /// REFERENCE blocks in file order
    pub references: Vec<Reference>,
    /// BASE COUNT pairs in file order
    pub base_count: Vec<BaseCount>,
    /// Top-level tags without a dedicated field (COMMENT, DBLINK, ...)
    pub other: IndexMap<String, String>,
    /// Text after ORIGIN on its own line
    pub origin: String,
    /// CONTIG expression of assembly records
    pub contig: Option<String>,
}

/// Qualifiers of a feature: an insertion-ordered multimap.
///
/// Keys keep their first-seen order and repeated keys collect their values in
/// order, so `/note` twice gives one `note` entry with two values. Equality
/// compares keys in order.
#[derive(Debug, Clone, Default)]
pub struct Attributes(IndexMap<String, Vec<String>>);

impl Attributes {
    /// Empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// All values for `key`
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// First value for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// True when `key` has at least one value
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove every value for `key`, keeping the order of the other keys
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.shift_remove(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no qualifiers
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys with their values, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Flattened `(key, value)` pairs, grouped by key
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value.as_str())))
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Attributes {}

impl Index<&str> for Attributes {
    type Output = [String];

    /// Values for `key`; empty when the key is absent
    fn index(&self, key: &str) -> &[String] {
        self.get(key).unwrap_or(&[])
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// An annotated region of the record sequence.
///
/// The location is reached through [`Feature::location`] and replaced with
/// [`Feature::set_location`], which keeps the cached sequence honest.
/// Equality ignores the cache.
#[derive(Debug, Clone, Default)]
pub struct Feature {
    /// Feature key (`source`, `gene`, `CDS`, ...)
    pub feature_type: String,
    /// Free-text description; not part of the flat-file layout
    pub description: String,
    /// Qualifiers
    pub attributes: Attributes,
    pub(crate) location: Location,
    pub(crate) sequence: OnceCell<String>,
}

impl Feature {
    /// Feature of type `feature_type` at `location`, without qualifiers
    pub fn new(feature_type: impl Into<String>, location: Location) -> Self {
        Self {
            feature_type: feature_type.into(),
            location,
            ..Self::default()
        }
    }

    /// Builder-style qualifier append
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Where the feature lies on the record sequence
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Replace the location and drop any cached sequence
    ///
    /// Parsed text carried over from a cloned location is discarded, so the
    /// writer renders the new tree.
    pub fn set_location(&mut self, mut location: Location) {
        location.clear_raw();
        self.location = location;
        self.sequence = OnceCell::new();
    }

    /// Sequence resolved by an earlier [`GenbankRecord::feature_sequence`] call
    pub fn cached_sequence(&self) -> Option<&str> {
        self.sequence.get().map(String::as_str)
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.feature_type == other.feature_type
            && self.description == other.description
            && self.attributes == other.attributes
            && self.location == other.location
    }
}

impl Eq for Feature {}

/// A complete GenBank entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenbankRecord {
    /// Header fields
    pub meta: Meta,
    /// Feature table in file order
    pub features: Vec<Feature>,
    pub(crate) sequence: String,
}

impl GenbankRecord {
    /// Empty record with the given header
    pub fn new(meta: Meta) -> Self {
        Self {
            meta,
            ..Self::default()
        }
    }

    /// Locus name
    pub fn name(&self) -> &str {
        &self.meta.locus.name
    }

    /// Append a feature and return its index, the handle for
    /// [`GenbankRecord::feature_sequence`]
    pub fn add_feature(&mut self, feature: Feature) -> usize {
        self.features.push(feature);
        self.features.len() - 1
    }

    /// Feature at `index`
    pub fn feature(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    /// Sequence letters as written (usually lowercase)
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Replace the sequence and drop every feature's cached sequence
    pub fn set_sequence(&mut self, sequence: impl Into<String>) {
        self.sequence = sequence.into();
        for feature in &mut self.features {
            feature.sequence = OnceCell::new();
        }
    }
}
