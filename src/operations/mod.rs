//! Sequence manipulation primitives
//!
//! - `sequence`: complement and reverse complement over the IUPAC alphabet

pub mod sequence;

pub use sequence::{complement, reverse_complement};
