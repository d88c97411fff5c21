//! Genomic interval overlap for rbpfinder.
//!
//! This crate holds the overlap index and the intersection built on top of it.
//! Higher-level crates (the pipeline, the CLI) call [`intersect`] or
//! [`intersect_cancellable`] and should not reimplement overlap logic.
//!
//! ## Quick Start
//!
//! ```rust
//! use rbpfinder_overlaprs::{Bits, Overlapper, Interval};
//!
//! let exons = vec![
//!     Interval { start: 100u32, end: 200, val: "exon1" },
//!     Interval { start: 150, end: 300, val: "exon2" },
//!     Interval { start: 400, end: 500, val: "exon3" },
//! ];
//!
//! let index = Bits::build(exons);
//!
//! let overlaps = index.find(180, 250);
//! assert_eq!(overlaps.len(), 2);
//!
//! for interval in index.find_iter(180, 250) {
//!     println!("Found overlap: {:?}", interval);
//! }
//! ```

/// Binary Interval Search implementation.
///
/// See [`Bits`] for details.
pub mod bits;

/// Per-chromosome intersection of two region sets.
pub mod intersect;

/// Core traits for overlap operations.
///
/// See [`Overlapper`] for the main trait.
pub mod traits;

// re-exports
pub use self::bits::Bits;
pub use self::intersect::{
    ChromIndex, IntersectOptions, IntoChromIndex, JoinMode, Strandedness, intersect,
    intersect_cancellable, overlap_pairs,
};
pub use self::traits::{Interval, Overlapper};
