//! seqmetal: streaming GenBank flat-file codec
//!
//! # Overview
//!
//! seqmetal reads GenBank records one at a time, resolves feature locations
//! (`join`, `complement`, partial ranges) against the record sequence, and
//! writes records back in the standard NCBI column layout so that
//! parse → render → parse is lossless on well-formed input.
//!
//! ## Quick Start
//!
//! ```no_run
//! use seqmetal::GenbankParser;
//!
//! # fn main() -> seqmetal::Result<()> {
//! let parser = GenbankParser::from_path("plasmids.gb")?;
//!
//! for record in parser {
//!     let record = record?;
//!     for (i, feature) in record.features.iter().enumerate() {
//!         println!("{}\t{}", feature.feature_type, record.feature_sequence(i)?);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`formats`]: record codecs ([`formats::genbank`]) and shared traits
//! - [`io`]: data sources, sinks and the line reader
//! - [`operations`]: sequence primitives (reverse complement)
//! - [`error`]: crate error type

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod formats;
pub mod io;
pub mod operations;

// Re-export commonly used types
pub use error::{Result, SeqmetalError};
pub use formats::genbank::{Feature, GenbankParser, GenbankRecord, GenbankWriter, Location};
pub use io::{DataSink, DataSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
