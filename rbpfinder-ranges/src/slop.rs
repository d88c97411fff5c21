//! Symmetric interval expansion bounded by chromosome length.

use log::debug;

use rbpfinder_core::CancellationToken;
use rbpfinder_core::models::{ChromSizes, Region, RegionSet};

use crate::errors::{RangesError, Result};

///
/// Widen every record by `margin` on both sides (`bedtools slop -b`).
///
/// Starts floor at 0 and ends cap at the chromosome length. Extra columns and
/// input order are kept. A record on a chromosome missing from `chrom_sizes`
/// fails the whole call and nothing is returned.
///
/// # Examples
///
/// ```
/// use rbpfinder_core::models::{ChromSizes, RegionSet};
/// use rbpfinder_ranges::slop;
///
/// let sizes = ChromSizes::try_from("chr1\t1000\n".as_bytes()).unwrap();
/// let exons = RegionSet::try_from("chr1\t100\t200\texon1\n".as_bytes()).unwrap();
///
/// let expanded = slop(&exons, &sizes, 50).unwrap();
/// assert_eq!(expanded.serialize(), "chr1\t50\t250\texon1\n");
/// ```
pub fn slop(set: &RegionSet, chrom_sizes: &ChromSizes, margin: u32) -> Result<RegionSet> {
    slop_cancellable(set, chrom_sizes, margin, &CancellationToken::new())
}

pub fn slop_cancellable(
    set: &RegionSet,
    chrom_sizes: &ChromSizes,
    margin: u32,
    cancel: &CancellationToken,
) -> Result<RegionSet> {
    let mut regions: Vec<Region> = Vec::with_capacity(set.len());

    for (idx, region) in set.iter().enumerate() {
        cancel.check_every(idx)?;

        let chrom_len = chrom_sizes
            .get(&region.chr)
            .ok_or_else(|| RangesError::UnknownChromosome {
                chrom: region.chr.clone(),
                record: idx + 1,
            })?;

        regions.push(expand(region, chrom_len, margin));
    }

    debug!(
        "Expanded {} regions by {} bp on each side",
        regions.len(),
        margin
    );

    Ok(RegionSet {
        regions,
        header: set.header.clone(),
        path: None,
    })
}

fn expand(region: &Region, chrom_len: u32, margin: u32) -> Region {
    let end = region.end.saturating_add(margin).min(chrom_len);
    // records already running past the chromosome end are pulled back inside
    let start = region.start.saturating_sub(margin).min(end);

    Region {
        chr: region.chr.clone(),
        start,
        end,
        rest: region.rest.clone(),
    }
}
