//! # Output utilities for rbpfinder.
//!
//! Writers for the two kinds of files the pipeline produces: BED-like region
//! sets ([`BedWrite`]) and frequency tables ([`TableWrite`]). Paths ending in
//! `.gz` are gzip compressed; with no path, output goes to stdout.
//!
pub mod bed;
pub mod error;
pub mod table;

pub use bed::*;
pub use error::*;
pub use table::*;
