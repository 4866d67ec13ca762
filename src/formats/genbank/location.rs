//! Feature location grammar
//!
//! GenBank feature locations are small nested expressions:
//!
//! ```text
//! location := range | point | operator
//! point    := ["<" | ">"] INTEGER
//! range    := point ".." point
//! operator := ("join" | "complement") "(" location ("," location)* ")"
//! ```
//!
//! Text coordinates are 1-based and inclusive; [`Location`] stores them
//! 0-based and half-open, so `"13..336"` becomes `start = 12, end = 336`.
//!
//! `complement(...)` marks the parsed inner location as complemented instead of
//! adding a wrapper node: `complement(1..10)` is a single leaf with
//! `complement = true`, `complement(join(...))` is a join node with
//! `complement = true`. Only a complement of something already complemented
//! gets an explicit one-child complement node.
//!
//! # Example
//!
//! ```
//! use seqmetal::formats::genbank::Location;
//!
//! # fn main() -> Result<(), seqmetal::formats::genbank::LocationError> {
//! let location: Location = "join(complement(1..5),6..9)".parse()?;
//! assert!(location.join);
//! assert_eq!(location.sub_locations.len(), 2);
//! assert!(location.sub_locations[0].complement);
//! assert_eq!((location.sub_locations[1].start, location.sub_locations[1].end), (5, 9));
//!
//! assert_eq!(location.render(), "join(complement(1..5),6..9)");
//! # Ok(())
//! # }
//! ```

use super::error::LocationError;
use std::fmt;
use std::str::FromStr;

/// A feature location tree.
///
/// Equality ignores [`Location::raw`].
#[derive(Debug, Clone, Default)]
pub struct Location {
    /// 0-based start (inclusive)
    pub start: usize,
    /// 0-based end (exclusive)
    pub end: usize,
    /// Read on the reverse strand
    pub complement: bool,
    /// Concatenation of `sub_locations`
    pub join: bool,
    /// 5' end is partial (`<`)
    pub five_prime_partial: bool,
    /// 3' end is partial (`>`)
    pub three_prime_partial: bool,
    /// Children of a join, or the single child of an explicit complement node
    pub sub_locations: Vec<Location>,
    /// Text this location was parsed from, reused verbatim by the writer
    pub raw: Option<String>,
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.complement == other.complement
            && self.join == other.join
            && self.five_prime_partial == other.five_prime_partial
            && self.three_prime_partial == other.three_prime_partial
            && self.sub_locations == other.sub_locations
    }
}

impl Eq for Location {}

impl Location {
    /// Leaf over the 0-based half-open range `start..end`
    pub fn range(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    /// Join of `parts`, in order
    pub fn join(parts: Vec<Location>) -> Self {
        Self {
            join: true,
            sub_locations: parts,
            ..Self::default()
        }
    }

    /// Reverse-strand reading of `inner`
    pub fn complement(inner: Location) -> Self {
        mark_complement(inner)
    }

    /// Parse GenBank location text
    ///
    /// The trimmed input is kept in [`Location::raw`].
    ///
    /// # Errors
    ///
    /// Unbalanced parentheses, empty operator arguments, operators other than
    /// `join`/`complement`, and coordinates that are not positive integers.
    pub fn parse(text: &str) -> Result<Self, LocationError> {
        let text = text.trim();
        let mut location = parse_expression(text)?;
        location.raw = Some(text.to_string());
        Ok(location)
    }

    /// Parsed text, if it still describes this tree
    ///
    /// Returns `None` once the coordinates or flags have been edited after
    /// parsing, so stale text is never written back.
    pub fn source_text(&self) -> Option<&str> {
        let raw = self.raw.as_deref()?;
        match parse_expression(raw) {
            Ok(parsed) if parsed == *self => Some(raw),
            _ => None,
        }
    }

    /// Drop the parsed text from this node and every child
    pub fn clear_raw(&mut self) {
        self.raw = None;
        for sub in &mut self.sub_locations {
            sub.clear_raw();
        }
    }

    /// True for a plain range (no children)
    pub fn is_leaf(&self) -> bool {
        self.sub_locations.is_empty()
    }

    /// Build location text from the tree, ignoring [`Location::raw`]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        if self.complement {
            out.push_str("complement(");
        }

        if self.join {
            out.push_str("join(");
            self.render_children(out);
            out.push(')');
        } else if !self.sub_locations.is_empty() {
            self.render_children(out);
        } else {
            if self.five_prime_partial {
                out.push('<');
            }
            if self.end == self.start + 1 {
                out.push_str(&self.end.to_string());
            } else {
                out.push_str(&format!("{}..{}", self.start + 1, self.end));
            }
            if self.three_prime_partial {
                out.push('>');
            }
        }

        if self.complement {
            out.push(')');
        }
    }

    fn render_children(&self, out: &mut String) {
        for (i, sub) in self.sub_locations.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            sub.render_into(out);
        }
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn mark_complement(mut inner: Location) -> Location {
    if inner.complement {
        // complement(complement(x)) keeps both strands explicit
        return Location {
            complement: true,
            sub_locations: vec![inner],
            ..Location::default()
        };
    }
    inner.complement = true;
    inner.raw = None;
    inner
}

fn parse_expression(text: &str) -> Result<Location, LocationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LocationError::Empty);
    }

    let mut location = match text.find('(') {
        None => parse_range(text)?,
        Some(open) => {
            let operator = text[..open].trim();
            let inner = enclosed(text, open)?;
            if inner.trim().is_empty() {
                return Err(LocationError::EmptyArguments(text.to_string()));
            }
            let arguments = split_top_level(inner, text)?;

            match operator {
                "join" => Location::join(
                    arguments
                        .into_iter()
                        .map(parse_expression)
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                "complement" => match arguments.as_slice() {
                    [only] => mark_complement(parse_expression(only)?),
                    _ => return Err(LocationError::ComplementArity(text.to_string())),
                },
                other => {
                    return Err(LocationError::UnknownOperator {
                        operator: other.to_string(),
                        location: text.to_string(),
                    })
                }
            }
        }
    };

    // Markers attach to the nearest coordinate, but every enclosing node
    // records that its text carries one.
    if text.contains('<') {
        location.five_prime_partial = true;
    }
    if text.contains('>') {
        location.three_prime_partial = true;
    }

    Ok(location)
}

/// Text between the parenthesis at `open` and its partner, which must close the string
fn enclosed(text: &str, open: usize) -> Result<&str, LocationError> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices().skip_while(|&(i, _)| i < open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    if i + 1 != text.len() {
                        return Err(LocationError::Unbalanced(text.to_string()));
                    }
                    return Ok(&text[open + 1..i]);
                }
            }
            _ => {}
        }
    }
    Err(LocationError::Unbalanced(text.to_string()))
}

/// Split on commas at parenthesis depth zero
fn split_top_level<'a>(inner: &'a str, whole: &str) -> Result<Vec<&'a str>, LocationError> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut part_start = 0;

    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| LocationError::Unbalanced(whole.to_string()))?;
            }
            ',' if depth == 0 => {
                parts.push(&inner[part_start..i]);
                part_start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(LocationError::Unbalanced(whole.to_string()));
    }
    parts.push(&inner[part_start..]);
    Ok(parts)
}

fn parse_range(text: &str) -> Result<Location, LocationError> {
    match text.split_once("..") {
        Some((start, end)) => {
            let start = parse_position(start, text)?;
            let end = parse_position(end, text)?;
            Ok(Location::range(start - 1, end))
        }
        None => {
            let position = parse_position(text, text)?;
            Ok(Location::range(position - 1, position))
        }
    }
}

/// 1-based coordinate with partial markers removed; never 0
fn parse_position(token: &str, range: &str) -> Result<usize, LocationError> {
    let digits: String = token
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect();
    let position = digits
        .parse::<usize>()
        .map_err(|source| LocationError::InvalidCoordinate {
            token: token.trim().to_string(),
            source,
        })?;
    if position == 0 {
        return Err(LocationError::ZeroCoordinate(range.to_string()));
    }
    Ok(position)
}
