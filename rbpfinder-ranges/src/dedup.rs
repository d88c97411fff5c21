use log::debug;

use rbpfinder_core::CancellationToken;
use rbpfinder_core::models::{Region, RegionSet};

use crate::errors::Result;

///
/// Collapse identical records, the way `sort | uniq` does.
///
/// Records are compared by their tab-joined line. The output is ordered by
/// that line, byte-wise ascending, not by coordinate: `chr1 100` sorts before
/// `chr1 50`. Applying `dedupe` twice gives the same set as applying it once.
///
pub fn dedupe(overlaps: &RegionSet) -> RegionSet {
    // a fresh token with no deadline never fires
    dedupe_cancellable(overlaps, &CancellationToken::new()).unwrap_or_default()
}

pub fn dedupe_cancellable(overlaps: &RegionSet, cancel: &CancellationToken) -> Result<RegionSet> {
    let mut lines: Vec<(String, &Region)> = Vec::with_capacity(overlaps.len());
    for (idx, region) in overlaps.iter().enumerate() {
        cancel.check_every(idx)?;
        lines.push((region.as_string(), region));
    }

    lines.sort_by(|a, b| a.0.cmp(&b.0));
    lines.dedup_by(|a, b| a.0 == b.0);

    cancel.check()?;

    debug!(
        "Kept {} unique records out of {}",
        lines.len(),
        overlaps.len()
    );

    Ok(lines.into_iter().map(|(_, region)| region.clone()).collect())
}
