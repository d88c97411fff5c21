use num_traits::{PrimInt, Unsigned, identities::zero};
use std::cmp::Ordering::{self};

/// Represent a range from [start, end)
/// Inclusive start, exclusive of end
///
/// Ordering and equality only look at the coordinates; `val` is a payload
/// (for the intersection engine, the record's position in its source set).
#[derive(Eq, Debug, Clone)]
pub struct Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    pub start: I,
    pub end: I,
    pub val: T,
}

impl<I, T> Ord for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn cmp(&self, other: &Interval<I, T>) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl<I, T> Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Check if this interval overlaps `[start, end)`
    #[inline]
    pub fn overlap(&self, start: I, end: I) -> bool {
        self.start < end && self.end > start
    }

    /// Length of the interval, zero for empty ones
    #[inline]
    pub fn len(&self) -> I {
        self.end.checked_sub(&self.start).unwrap_or_else(zero::<I>)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl<I, T> PartialOrd for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I, T> PartialEq for Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    #[inline]
    fn eq(&self, other: &Interval<I, T>) -> bool {
        self.start == other.start && self.end == other.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_sort_is_start_then_end_and_stable() {
        let mut ivs = vec![
            Interval { start: 10u32, end: 30, val: 0usize },
            Interval { start: 10, end: 20, val: 1 },
            Interval { start: 5, end: 50, val: 2 },
            Interval { start: 10, end: 20, val: 3 },
        ];
        ivs.sort();
        let order: Vec<usize> = ivs.iter().map(|iv| iv.val).collect();
        assert_eq!(order, vec![2, 1, 3, 0]);
    }

    #[rstest]
    #[case(10, 20, 19, 25, true)]
    #[case(10, 20, 20, 25, false)]
    #[case(10, 20, 0, 10, false)]
    #[case(10, 20, 0, 11, true)]
    fn test_overlap(
        #[case] start: u32,
        #[case] end: u32,
        #[case] q_start: u32,
        #[case] q_end: u32,
        #[case] expected: bool,
    ) {
        let iv = Interval { start, end, val: () };
        assert_eq!(iv.overlap(q_start, q_end), expected);
    }

    #[rstest]
    fn test_len() {
        let iv = Interval { start: 3u32, end: 8, val: () };
        assert_eq!(iv.len(), 5);
        assert!(!iv.is_empty());
        let empty = Interval { start: 8u32, end: 8, val: () };
        assert!(empty.is_empty());
    }
}
