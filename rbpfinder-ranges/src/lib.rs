//! Region set transforms used between the rbpfinder pipeline stages.
//!
//! - [`slop`] widens target regions by a margin, bounded by chromosome length.
//! - [`dedupe`] collapses identical overlap records in `sort | uniq` order.
//! - [`tabulate`] counts the values of one column across overlap records.
//!
//! Every function reads its input by shared reference and returns a new value.
//! The `*_cancellable` variants poll a
//! [`CancellationToken`](rbpfinder_core::CancellationToken) between records.
pub mod dedup;
pub mod errors;
pub mod frequency;
pub mod slop;

pub use dedup::{dedupe, dedupe_cancellable};
pub use errors::RangesError;
pub use frequency::{FrequencyEntry, FrequencyTable, tabulate, tabulate_cancellable};
pub use slop::{slop, slop_cancellable};
