use num_traits::{PrimInt, Unsigned, identities::zero};

use super::Overlapper;
use rbpfinder_core::models::Interval;

/// A Binary Interval Search index for one chromosome.
///
/// From the journal article: <https://academic.oup.com/bioinformatics/article/29/1/1/273289>
///
/// Intervals are sorted by start, then end. The sort is stable, so intervals
/// with identical coordinates keep the order they were given in. Any interval
/// overlapping a query `[start, stop)` must begin at or after
/// `start - max_len`, which bounds where a scan has to begin.
///
/// # Examples
///
/// ```
/// use rbpfinder_overlaprs::{Bits, Overlapper, Interval};
///
/// let peaks = vec![
///     Interval { start: 100u32, end: 150, val: "RBP1" },
///     Interval { start: 200, end: 250, val: "RBP2" },
///     Interval { start: 225, end: 275, val: "RBP3" },
/// ];
///
/// let bits = Bits::build(peaks);
///
/// let overlaps = bits.find(210, 240);
/// assert_eq!(overlaps.len(), 2);
/// ```
///
/// ## Sequential Queries with `seek`
///
/// For queries sorted by start, `seek` keeps a cursor between calls and only
/// ever moves it forward:
///
/// ```
/// use rbpfinder_overlaprs::{Bits, Overlapper, Interval};
///
/// let intervals = (0u32..100).step_by(5)
///     .map(|x| Interval { start: x, end: x + 2, val: x })
///     .collect::<Vec<_>>();
/// let bits = Bits::build(intervals);
///
/// let mut cursor = 0;
/// for i in (10u32..20).step_by(5) {
///     let hits: Vec<_> = bits.seek(i, i + 1, &mut cursor).collect();
///     assert_eq!(hits.len(), 1);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Bits<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// List of intervals, sorted by (start, end)
    pub intervals: Vec<Interval<I, T>>,
    /// The length of the longest interval
    max_len: I,
}

impl<I, T> Overlapper<I, T> for Bits<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Create a new instance of Bits by passing in a vector of Intervals. This vector will
    /// immediately be sorted by start order.
    fn build(mut intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized,
    {
        intervals.sort();
        let max_len = intervals
            .iter()
            .map(|iv| iv.len())
            .max()
            .unwrap_or_else(zero::<I>);
        Bits { intervals, max_len }
    }

    /// Find all intervals that overlap start .. stop
    #[inline]
    fn find(&self, start: I, stop: I) -> Vec<Interval<I, T>> {
        self.find_iter(start, stop).cloned().collect()
    }

    fn find_iter<'a>(
        &'a self,
        start: I,
        stop: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        let finder = IterFind {
            inner: self,
            off: Self::lower_bound(self.reach(start), &self.intervals),
            start,
            stop,
        };
        Box::new(finder)
    }
}

impl<I, T> Bits<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Get the number over intervals in Bits
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if BITS is empty (i.e. has no intervals)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Return an iterator over the intervals in Bits, in sorted order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<I, T>> {
        self.intervals.iter()
    }

    /// Smallest start an interval can have and still overlap a query beginning at `start`.
    #[inline]
    fn reach(&self, start: I) -> I {
        start.checked_sub(&self.max_len).unwrap_or_else(zero::<I>)
    }

    /// Determine the first index that we should start checking for overlaps for via a binary
    /// search.
    /// Assumes that the maximum interval length in `intervals` has been subtracted from
    /// `start`, otherwise the result is undefined
    #[inline]
    pub fn lower_bound(start: I, intervals: &[Interval<I, T>]) -> usize {
        let mut size = intervals.len();
        let mut low = 0;

        while size > 0 {
            let half = size / 2;
            let other_half = size - half;
            let probe = low + half;
            let other_low = low + other_half;
            let v = &intervals[probe];
            size = half;
            low = if v.start < start { other_low } else { low }
        }
        low
    }

    /// Find all intervals that overlap start .. stop when queries arrive in
    /// ascending start order. The cursor only moves forward, skipping
    /// intervals whose start is out of reach of the current query; pass the
    /// same cursor (starting at 0) to every call of one sweep. The cursor is
    /// external so a shared `Bits` needs no mutation.
    #[inline]
    pub fn seek<'a>(&'a self, start: I, stop: I, cursor: &mut usize) -> IterFind<'a, I, T> {
        let reach = self.reach(start);
        while *cursor < self.intervals.len() && self.intervals[*cursor].start < reach {
            *cursor += 1;
        }

        IterFind {
            inner: self,
            off: *cursor,
            start,
            stop,
        }
    }
}

/// An iterator over intervals in a [`Bits`] structure that overlap with a query range.
///
/// Created by [`find_iter`](Overlapper::find_iter) or [`seek`](Bits::seek). Yields
/// hits in the index's sort order.
#[derive(Debug)]
pub struct IterFind<'a, I, T>
where
    T: Eq + Clone + Send + Sync + 'a,
    I: PrimInt + Unsigned + Send + Sync,
{
    inner: &'a Bits<I, T>,
    off: usize,
    start: I,
    stop: I,
}

impl<'a, I, T> Iterator for IterFind<'a, I, T>
where
    T: Eq + Clone + Send + Sync + 'a,
    I: PrimInt + Unsigned + Send + Sync,
{
    type Item = &'a Interval<I, T>;

    #[inline]
    // interval.start < stop && interval.end > start
    fn next(&mut self) -> Option<Self::Item> {
        while self.off < self.inner.intervals.len() {
            let interval = &self.inner.intervals[self.off];
            self.off += 1;
            if interval.overlap(self.start, self.stop) {
                return Some(interval);
            } else if interval.start >= self.stop {
                break;
            }
        }
        None
    }
}

impl<I, T> IntoIterator for Bits<I, T>
where
    T: Eq + Clone + Send + Sync,
    I: PrimInt + Unsigned + Send + Sync,
{
    type Item = Interval<I, T>;
    type IntoIter = ::std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a, I, T> IntoIterator for &'a Bits<I, T>
where
    T: Eq + Clone + Send + Sync + 'a,
    I: PrimInt + Unsigned + Send + Sync,
{
    type Item = &'a Interval<I, T>;
    type IntoIter = std::slice::Iter<'a, Interval<I, T>>;

    fn into_iter(self) -> std::slice::Iter<'a, Interval<I, T>> {
        self.intervals.iter()
    }
}
