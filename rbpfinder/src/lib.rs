//! # rbpfinder
//!
//! Candidate RNA-binding protein sites from genomic target regions and
//! CLIP-seq peak catalogues. This crate re-exports the workspace crates behind
//! features; the default `pipeline` feature pulls in all of them.
//!
//! ```no_run
//! use rbpfinder::core::models::{ChromSizes, RegionSet};
//! use rbpfinder::overlaprs::{IntersectOptions, JoinMode, intersect};
//! use rbpfinder::ranges::{dedupe, slop, tabulate};
//!
//! let sizes = ChromSizes::try_from("hg38.chrom.sizes").unwrap();
//! let exons = RegionSet::try_from("target_exons.bed").unwrap();
//! let peaks = RegionSet::try_from("clip_peaks.bed").unwrap();
//!
//! let expanded = slop(&exons, &sizes, 100).unwrap();
//! let overlaps = intersect(&expanded, &peaks, &IntersectOptions::new(JoinMode::WriteBoth));
//! let table = tabulate(&dedupe(&overlaps), 7).unwrap();
//! print!("{}", table);
//! ```
#[cfg(feature = "core")]
#[doc(inline)]
pub use rbpfinder_core as core;

#[cfg(feature = "overlaprs")]
#[doc(inline)]
pub use rbpfinder_overlaprs as overlaprs;

#[cfg(feature = "ranges")]
#[doc(inline)]
pub use rbpfinder_ranges as ranges;

#[cfg(feature = "io")]
#[doc(inline)]
pub use rbpfinder_io as io;

#[cfg(feature = "pipeline")]
#[doc(inline)]
pub use rbpfinder_pipeline as pipeline;
