use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::RegionSetError;
use crate::utils::split_bed_fields;

///
/// Region struct, representation of one record of a BED-like file.
///
/// Coordinates are 0-based and half-open: `[start, end)`. Every column past
/// the third is kept verbatim in `rest`, in file order.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub rest: Vec<String>,
}

impl Region {
    pub fn new(chr: &str, start: u32, end: u32) -> Self {
        Region {
            chr: chr.to_string(),
            start,
            end,
            rest: Vec::new(),
        }
    }

    ///
    /// Get length of the region
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Half-open overlap test, `[start, end)` against `[other.start, other.end)`.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.chr == other.chr && self.start < other.end && other.start < self.end
    }

    /// Number of columns this record renders to: `chr`, `start`, `end` and `rest`.
    pub fn num_fields(&self) -> usize {
        3 + self.rest.len()
    }

    ///
    /// Get a single column by its 1-based index over the full line.
    ///
    pub fn field(&self, column: usize) -> Option<String> {
        match column {
            1 => Some(self.chr.clone()),
            2 => Some(self.start.to_string()),
            3 => Some(self.end.to_string()),
            n if n > 3 => self.rest.get(n - 4).cloned(),
            _ => None,
        }
    }

    /// Strand column of a BED6+ record, when it holds `+` or `-`.
    pub fn strand(&self) -> Option<char> {
        match self.rest.get(2).map(String::as_str) {
            Some("+") => Some('+'),
            Some("-") => Some('-'),
            _ => None,
        }
    }

    ///
    /// Get file string of Region
    ///
    pub fn as_string(&self) -> String {
        let mut line = format!("{}\t{}\t{}", self.chr, self.start, self.end);
        for field in &self.rest {
            line.push('\t');
            line.push_str(field);
        }
        line
    }

    ///
    /// Parse one BED-like line. `line_number` is only used for error reporting.
    ///
    /// Tab-delimited columns are tried first so annotation columns can hold
    /// spaces. When that split does not yield a valid interval the line is
    /// split on runs of whitespace instead.
    ///
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self, RegionSetError> {
        let malformed = |reason: &str| RegionSetError::MalformedInterval {
            line: line_number,
            content: line.to_string(),
            reason: reason.to_string(),
        };

        let parts = split_bed_fields(line);
        match Region::from_fields(&parts) {
            Ok(region) => Ok(region),
            Err(reason) if line.contains('\t') => {
                let parts: Vec<&str> = line.split_whitespace().collect();
                Region::from_fields(&parts).map_err(|_| malformed(reason))
            }
            Err(reason) => Err(malformed(reason)),
        }
    }

    fn from_fields(parts: &[&str]) -> Result<Self, &'static str> {
        if parts.len() < 3 {
            return Err("expected at least 3 fields");
        }

        let chr = parts[0].trim();
        if chr.is_empty() {
            return Err("empty chromosome name");
        }

        let start = parts[1]
            .trim()
            .parse::<u32>()
            .map_err(|_| "start is not a non-negative integer")?;
        let end = parts[2]
            .trim()
            .parse::<u32>()
            .map_err(|_| "end is not a non-negative integer")?;

        if start > end {
            return Err("start is greater than end");
        }

        Ok(Region {
            chr: chr.to_owned(),
            start,
            end,
            rest: parts[3..].iter().map(|s| s.to_string()).collect(),
        })
    }
}

impl FromStr for Region {
    type Err = RegionSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::parse_line(s, 1)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parse_bed3() {
        let region: Region = "chr1\t100\t200".parse().unwrap();
        assert_eq!(region, Region::new("chr1", 100, 200));
        assert_eq!(region.width(), 100);
    }

    #[rstest]
    fn test_parse_keeps_extra_columns() {
        let region: Region = "chr1\t100\t200\tRBP1\t0\t+".parse().unwrap();
        assert_eq!(region.rest, vec!["RBP1", "0", "+"]);
        assert_eq!(region.strand(), Some('+'));
        assert_eq!(region.as_string(), "chr1\t100\t200\tRBP1\t0\t+");
    }

    #[rstest]
    #[case("chr1\t100\t200 ", vec![])]
    #[case("chr1\t100\t200\r", vec![])]
    #[case(" chr1\t100\t200", vec![])]
    #[case("chr1\t100 200\tRBP1", vec!["RBP1"])]
    #[case("chr1 100\t200 RBP1", vec!["RBP1"])]
    #[case("chr1\t100\t200\tRBP1 ", vec!["RBP1"])]
    fn test_parse_stray_whitespace(#[case] line: &str, #[case] rest: Vec<&str>) {
        let region = Region::parse_line(line, 1).unwrap();
        assert_eq!((region.chr.as_str(), region.start, region.end), ("chr1", 100, 200));
        assert_eq!(region.rest, rest);
    }

    #[rstest]
    fn test_parse_keeps_spaces_inside_annotation() {
        let region: Region = "chr1\t100\t200\tname with space".parse().unwrap();
        assert_eq!(region.rest, vec!["name with space"]);
    }

    #[rstest]
    #[case("chr1\t100")]
    #[case("chr1\tabc\t200")]
    #[case("chr1\t100\txyz")]
    #[case("chr1\t-5\t200")]
    #[case("chr1\t300\t200")]
    #[case("\t1\t2")]
    fn test_parse_malformed(#[case] line: &str) {
        let result = Region::parse_line(line, 7);
        match result {
            Err(RegionSetError::MalformedInterval { line: n, content, .. }) => {
                assert_eq!(n, 7);
                assert_eq!(content, line);
            }
            other => panic!("expected MalformedInterval, got {:?}", other),
        }
    }

    #[rstest]
    fn test_field_lookup() {
        let region: Region = "chr2\t5\t9\tA\tB".parse().unwrap();
        assert_eq!(region.num_fields(), 5);
        assert_eq!(region.field(1).as_deref(), Some("chr2"));
        assert_eq!(region.field(2).as_deref(), Some("5"));
        assert_eq!(region.field(3).as_deref(), Some("9"));
        assert_eq!(region.field(5).as_deref(), Some("B"));
        assert_eq!(region.field(6), None);
        assert_eq!(region.field(0), None);
    }

    #[rstest]
    #[case(("chr1", 100, 200), ("chr1", 150, 160), true)]
    #[case(("chr1", 100, 200), ("chr1", 200, 300), false)]
    #[case(("chr1", 100, 200), ("chr1", 0, 100), false)]
    #[case(("chr1", 100, 200), ("chr2", 150, 160), false)]
    #[case(("chr1", 100, 100), ("chr1", 50, 150), true)]
    #[case(("chr1", 100, 100), ("chr1", 100, 150), false)]
    fn test_overlaps(
        #[case] a: (&str, u32, u32),
        #[case] b: (&str, u32, u32),
        #[case] expected: bool,
    ) {
        let a = Region::new(a.0, a.1, a.2);
        let b = Region::new(b.0, b.1, b.2);
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }
}
