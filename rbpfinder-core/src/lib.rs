//! Core models for rbpfinder.
//!
//! This crate holds the data types every other rbpfinder crate passes around:
//! BED-like [`Region`](models::Region) records, ordered
//! [`RegionSet`](models::RegionSet) collections, the
//! [`ChromSizes`](models::ChromSizes) table used to bound coordinates, and the
//! [`CancellationToken`](cancel::CancellationToken) that long running stages
//! poll. Parsing lives next to the types; algorithms live in
//! `rbpfinder-overlaprs` and `rbpfinder-ranges`.
//!
//! ```rust
//! use rbpfinder_core::models::{ChromSizes, RegionSet};
//!
//! let sizes = ChromSizes::try_from("chr1\t1000\n".as_bytes()).unwrap();
//! let targets = RegionSet::try_from("chr1\t100\t200\texon1\n".as_bytes()).unwrap();
//!
//! assert_eq!(sizes.length_of("chr1").unwrap(), 1000);
//! assert_eq!(targets.serialize(), "chr1\t100\t200\texon1\n");
//! ```
pub mod cancel;
pub mod errors;
pub mod models;
pub mod utils;

pub use cancel::CancellationToken;
pub use errors::RegionSetError;
