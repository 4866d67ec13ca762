//! Feature sequence extraction
//!
//! A leaf location selects `sequence[start..end]`; a join concatenates its
//! children in location order; a complemented node yields the reverse
//! complement of whatever its subtree produced.

use super::error::ResolveError;
use super::location::Location;
use super::record::GenbankRecord;
use crate::operations::reverse_complement;

/// Sequence covered by `location` on `sequence`
///
/// # Errors
///
/// [`ResolveError::OutOfBounds`] when a range runs past the sequence.
///
/// # Example
///
/// ```
/// use seqmetal::formats::genbank::{resolve_location, Location};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let location: Location = "complement(join(1..3,7..9))".parse()?;
/// assert_eq!(resolve_location(&location, "ATGGCTAGC")?, "GCTCAT");
/// # Ok(())
/// # }
/// ```
pub fn resolve_location(location: &Location, sequence: &str) -> Result<String, ResolveError> {
    let bytes = resolve_bytes(location, sequence.as_bytes())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn resolve_bytes(location: &Location, sequence: &[u8]) -> Result<Vec<u8>, ResolveError> {
    let bases = if location.is_leaf() {
        sequence
            .get(location.start..location.end)
            .ok_or(ResolveError::OutOfBounds {
                start: location.start,
                end: location.end,
                length: sequence.len(),
            })?
            .to_vec()
    } else {
        let mut bases = Vec::new();
        for sub in &location.sub_locations {
            bases.extend(resolve_bytes(sub, sequence)?);
        }
        bases
    };

    if location.complement {
        Ok(reverse_complement(&bases))
    } else {
        Ok(bases)
    }
}

impl GenbankRecord {
    /// Sequence of the feature at `index`, resolved once and cached
    ///
    /// The cache is dropped by [`GenbankRecord::set_sequence`] and
    /// [`Feature::set_location`](super::Feature::set_location).
    ///
    /// # Errors
    ///
    /// [`ResolveError::NoSuchFeature`] for an index past the feature table,
    /// [`ResolveError::OutOfBounds`] when the location does not fit the
    /// sequence.
    pub fn feature_sequence(&self, index: usize) -> Result<&str, ResolveError> {
        let feature = self.features.get(index).ok_or(ResolveError::NoSuchFeature {
            index,
            count: self.features.len(),
        })?;
        feature
            .sequence
            .get_or_try_init(|| resolve_location(&feature.location, &self.sequence))
            .map(String::as_str)
    }
}
