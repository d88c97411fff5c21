//! Intersection of a query region set against a reference region set.
//!
//! This is the engine behind `bedtools intersect -a query -b reference` and its
//! `-wb` variant. Every (query, reference) pair on the same chromosome whose
//! half-open ranges overlap produces one output record; nothing is collapsed
//! here.
//!
//! # Examples
//!
//! ```
//! use rbpfinder_core::models::{Region, RegionSet};
//! use rbpfinder_overlaprs::{IntersectOptions, JoinMode, intersect};
//!
//! let query = RegionSet::from(vec![Region::new("chr1", 100, 200)]);
//! let peaks = "chr1\t150\t160\tRBP1\nchr1\t500\t600\tRBP2\n";
//! let peaks = RegionSet::try_from(peaks.as_bytes()).unwrap();
//!
//! let hits = intersect(&query, &peaks, &IntersectOptions::default());
//! assert_eq!(hits.serialize(), "chr1\t100\t200\n");
//!
//! let joined = intersect(&query, &peaks, &IntersectOptions::new(JoinMode::WriteBoth));
//! assert_eq!(joined.serialize(), "chr1\t100\t200\tchr1\t150\t160\tRBP1\n");
//! ```

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use log::debug;
use rayon::prelude::*;

use rbpfinder_core::CancellationToken;
use rbpfinder_core::errors::{RegionSetError, Result};
use rbpfinder_core::models::{Interval, Region, RegionSet};

use crate::{Bits, Overlapper};

/// What an overlap record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum JoinMode {
    /// Only the query record's fields (`bedtools intersect`).
    #[default]
    QueryOnly,
    /// The query record's fields followed by the whole reference record (`-wb`).
    WriteBoth,
}

/// Strand requirement between a query and a reference record.
///
/// The strand is read from the sixth column. Records without a `+` or `-`
/// there never match under `Same` or `Opposite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Strandedness {
    #[default]
    Ignore,
    Same,
    Opposite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntersectOptions {
    pub join: JoinMode,
    pub strandedness: Strandedness,
}

impl IntersectOptions {
    pub fn new(join: JoinMode) -> Self {
        IntersectOptions {
            join,
            strandedness: Strandedness::Ignore,
        }
    }

    pub fn with_strandedness(mut self, strandedness: Strandedness) -> Self {
        self.strandedness = strandedness;
        self
    }
}

impl Strandedness {
    fn accepts(&self, query: &Region, reference: &Region) -> bool {
        match self {
            Strandedness::Ignore => true,
            Strandedness::Same => match (query.strand(), reference.strand()) {
                (Some(q), Some(r)) => q == r,
                _ => false,
            },
            Strandedness::Opposite => match (query.strand(), reference.strand()) {
                (Some(q), Some(r)) => q != r,
                _ => false,
            },
        }
    }
}

impl FromStr for JoinMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "query-only" | "query" => Ok(JoinMode::QueryOnly),
            "write-both" | "wb" | "both" => Ok(JoinMode::WriteBoth),
            _ => Err(format!(
                "Invalid join mode: {}. Valid options are 'query-only' or 'write-both'",
                s
            )),
        }
    }
}

impl FromStr for Strandedness {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(Strandedness::Ignore),
            "same" => Ok(Strandedness::Same),
            "opposite" => Ok(Strandedness::Opposite),
            _ => Err(format!(
                "Invalid strandedness: {}. Valid options are 'ignore', 'same' or 'opposite'",
                s
            )),
        }
    }
}

impl Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinMode::QueryOnly => write!(f, "query-only"),
            JoinMode::WriteBoth => write!(f, "write-both"),
        }
    }
}

///
/// Reference intervals split by chromosome, one [Bits] index each. Interval
/// payloads are positions in the reference set.
///
pub struct ChromIndex {
    index_maps: HashMap<String, Bits<u32, usize>>,
}

impl ChromIndex {
    pub fn build(reference: &RegionSet) -> Self {
        let mut intervals: HashMap<String, Vec<Interval<u32, usize>>> = HashMap::new();

        for (idx, region) in reference.regions.iter().enumerate() {
            intervals
                .entry(region.chr.clone())
                .or_default()
                .push(Interval {
                    start: region.start,
                    end: region.end,
                    val: idx,
                });
        }

        let index_maps = intervals
            .into_iter()
            .map(|(chr, chr_intervals)| (chr, Bits::build(chr_intervals)))
            .collect();

        ChromIndex { index_maps }
    }

    pub fn get(&self, chr: &str) -> Option<&Bits<u32, usize>> {
        self.index_maps.get(chr)
    }

    ///
    /// Sweep the query records of one chromosome against its index.
    ///
    /// `query_idxs` are positions into `query`, all on `chr`. Returns, per
    /// query position, the matching reference positions in index order.
    ///
    fn sweep_chrom(
        &self,
        chr: &str,
        query_idxs: &[usize],
        query: &RegionSet,
        reference: &RegionSet,
        strandedness: Strandedness,
        cancel: &CancellationToken,
    ) -> Result<Vec<(usize, Vec<usize>)>> {
        let Some(bits) = self.get(chr) else {
            return Ok(Vec::new());
        };

        let mut sorted = query_idxs.to_vec();
        sorted.sort_by(|&a, &b| {
            let (ra, rb) = (&query.regions[a], &query.regions[b]);
            ra.start
                .cmp(&rb.start)
                .then_with(|| ra.end.cmp(&rb.end))
                .then_with(|| a.cmp(&b))
        });

        let mut cursor = 0;
        let mut hits = Vec::with_capacity(sorted.len());
        for (n, qi) in sorted.into_iter().enumerate() {
            cancel.check_every(n)?;

            let q = &query.regions[qi];
            let matched: Vec<usize> = bits
                .seek(q.start, q.end, &mut cursor)
                .map(|iv| iv.val)
                .filter(|&ri| strandedness.accepts(q, &reference.regions[ri]))
                .collect();

            if !matched.is_empty() {
                hits.push((qi, matched));
            }
        }

        Ok(hits)
    }
}

pub trait IntoChromIndex {
    fn chrom_index(&self) -> ChromIndex;
}

impl IntoChromIndex for RegionSet {
    fn chrom_index(&self) -> ChromIndex {
        ChromIndex::build(self)
    }
}

///
/// All overlapping `(query position, reference position)` pairs.
///
/// Pairs come out grouped by query record in query input order. Within one
/// query record, references are ordered by start, then end, then reference
/// input order. Chromosomes are swept in parallel; the result does not depend
/// on scheduling.
///
pub fn overlap_pairs(
    query: &RegionSet,
    reference: &RegionSet,
    strandedness: Strandedness,
    cancel: &CancellationToken,
) -> Result<Vec<(usize, usize)>> {
    let index = reference.chrom_index();

    let mut by_chr: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, region) in query.regions.iter().enumerate() {
        by_chr.entry(region.chr.as_str()).or_default().push(idx);
    }
    let groups: Vec<(&str, Vec<usize>)> = by_chr.into_iter().collect();

    let per_chrom = groups
        .par_iter()
        .map(|(chr, idxs)| index.sweep_chrom(chr, idxs, query, reference, strandedness, cancel))
        .collect::<Result<Vec<_>>>()?;

    let mut per_query: Vec<Vec<usize>> = vec![Vec::new(); query.len()];
    for (qi, matched) in per_chrom.into_iter().flatten() {
        per_query[qi] = matched;
    }

    cancel.check()?;

    let pairs: Vec<(usize, usize)> = per_query
        .into_iter()
        .enumerate()
        .flat_map(|(qi, matched)| matched.into_iter().map(move |ri| (qi, ri)))
        .collect();

    debug!(
        "{} query regions x {} reference regions -> {} overlaps",
        query.len(),
        reference.len(),
        pairs.len()
    );

    Ok(pairs)
}

fn render(query: &Region, reference: &Region, join: JoinMode) -> Region {
    match join {
        JoinMode::QueryOnly => query.clone(),
        JoinMode::WriteBoth => {
            let mut joined = query.clone();
            joined.rest.reserve(3 + reference.rest.len());
            joined.rest.push(reference.chr.clone());
            joined.rest.push(reference.start.to_string());
            joined.rest.push(reference.end.to_string());
            joined.rest.extend(reference.rest.iter().cloned());
            joined
        }
    }
}

///
/// Intersect `query` with `reference`, polling `cancel` between records.
///
/// Returns one overlap record per overlapping pair (see [overlap_pairs] for
/// the order). A cancelled run returns [RegionSetError::Cancelled] and no
/// records.
///
pub fn intersect_cancellable(
    query: &RegionSet,
    reference: &RegionSet,
    options: &IntersectOptions,
    cancel: &CancellationToken,
) -> std::result::Result<RegionSet, RegionSetError> {
    let pairs = overlap_pairs(query, reference, options.strandedness, cancel)?;

    let regions: Vec<Region> = pairs
        .into_iter()
        .map(|(qi, ri)| render(&query.regions[qi], &reference.regions[ri], options.join))
        .collect();

    Ok(RegionSet::from(regions))
}

///
/// Intersect `query` with `reference`. Chromosomes missing from either side
/// simply produce no records.
///
pub fn intersect(
    query: &RegionSet,
    reference: &RegionSet,
    options: &IntersectOptions,
) -> RegionSet {
    // a fresh token with no deadline never fires
    intersect_cancellable(query, reference, options, &CancellationToken::new()).unwrap_or_default()
}
