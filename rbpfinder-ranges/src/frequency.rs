use std::fmt::{self, Display};

use fxhash::FxHashMap as HashMap;
use log::debug;
use serde::Serialize;

use rbpfinder_core::CancellationToken;
use rbpfinder_core::models::RegionSet;

use crate::errors::{RangesError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub key: String,
    pub count: usize,
}

///
/// Distinct values of one column with how often each occurs, most frequent
/// first. Ties are broken by the value, byte-wise ascending.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FrequencyTable {
    /// The 1-based column the table was computed over
    pub column: usize,
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Number of records the table was computed from.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.count)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }
}

impl Display for FrequencyTable {
    /// One `key\tcount` line per entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}\t{}", entry.key, entry.count)?;
        }
        Ok(())
    }
}

///
/// Count the values found in `column` (1-based: chr is 1, start 2, end 3).
///
/// Every record must have that column; the first one that does not fails the
/// call with [RangesError::ColumnOutOfRange]. Asking for column 0 fails the
/// same way.
///
/// # Examples
///
/// ```
/// use rbpfinder_core::models::RegionSet;
/// use rbpfinder_ranges::tabulate;
///
/// let overlaps = RegionSet::try_from(
///     "chr1\t1\t2\tRBP2\nchr1\t1\t2\tRBP1\nchr1\t5\t9\tRBP1\n".as_bytes(),
/// ).unwrap();
///
/// let table = tabulate(&overlaps, 4).unwrap();
/// assert_eq!(table.to_string(), "RBP1\t2\nRBP2\t1\n");
/// ```
pub fn tabulate(overlaps: &RegionSet, column: usize) -> Result<FrequencyTable> {
    tabulate_cancellable(overlaps, column, &CancellationToken::new())
}

pub fn tabulate_cancellable(
    overlaps: &RegionSet,
    column: usize,
    cancel: &CancellationToken,
) -> Result<FrequencyTable> {
    let mut counts: HashMap<String, usize> = HashMap::default();

    for (idx, region) in overlaps.iter().enumerate() {
        cancel.check_every(idx)?;

        let value = region
            .field(column)
            .ok_or_else(|| RangesError::ColumnOutOfRange {
                column,
                fields: region.num_fields(),
                record: idx + 1,
            })?;

        *counts.entry(value).or_insert(0) += 1;
    }

    let mut entries: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(key, count)| FrequencyEntry { key, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

    debug!(
        "Tabulated column {} over {} records into {} values",
        column,
        overlaps.len(),
        entries.len()
    );

    Ok(FrequencyTable { column, entries })
}
