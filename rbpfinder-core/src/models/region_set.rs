use std::collections::HashSet;
use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::{RegionSetError, Result};
use crate::models::Region;
use crate::utils::{get_dynamic_reader, is_header_line};

///
/// RegionSet struct, the representation of one BED-like interval file.
///
/// Regions are kept in the order they were read. Operations on a set never
/// touch it in place; they hand back a new `RegionSet`.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

pub struct RegionSetIterator<'a> {
    region_set: &'a RegionSet,
    index: usize,
}

impl RegionSet {
    ///
    /// Parse a region set from any buffered reader.
    ///
    /// Every non-empty line that is not a header line (`#`, `track`,
    /// `browser`) becomes one [Region]. Header lines are collected into
    /// `header`, joined by newlines.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut regions: Vec<Region> = Vec::new();
        let mut header: Vec<String> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            if is_header_line(&line) {
                header.push(line);
                continue;
            }

            regions.push(Region::parse_line(&line, idx + 1)?);
        }

        Ok(RegionSet {
            regions,
            header: match header.is_empty() {
                true => None,
                false => Some(header.join("\n")),
            },
            path: None,
        })
    }

    ///
    /// Render the set as BED text: one tab-joined line per region, each
    /// terminated by a newline. Header lines are not written.
    ///
    pub fn serialize(&self) -> String {
        let mut buffer = String::new();
        for region in &self.regions {
            buffer.push_str(&region.as_string());
            buffer.push('\n');
        }
        buffer
    }

    ///
    /// Iterate unique chromosomes located in RegionSet, in order of first appearance
    ///
    pub fn iter_chroms(&self) -> impl Iterator<Item = &String> {
        let mut seen: HashSet<&String> = HashSet::new();
        self.regions
            .iter()
            .map(|r| &r.chr)
            .filter(move |chr| seen.insert(*chr))
    }

    ///
    /// Iterate through regions located on specific Chromosome in RegionSet
    ///
    /// # Arguments
    /// - chr: chromosome name
    ///
    pub fn iter_chr_regions<'a>(&'a self, chr: &'a str) -> impl Iterator<Item = &'a Region> {
        self.regions.iter().filter(move |r| r.chr == chr)
    }

    ///
    /// Is regionSet empty?
    ///
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    ///
    /// Get number of regions in RegionSet
    ///
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn iter(&self) -> RegionSetIterator<'_> {
        self.into_iter()
    }
}

impl TryFrom<&Path> for RegionSet {
    type Error = RegionSetError;

    ///
    /// Create a new [RegionSet] from a bed file.
    ///
    /// # Arguments:
    /// - value: path to bed file on disk, optionally gzipped.
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;
        let mut rs = RegionSet::from_reader(reader)?;
        rs.path = Some(value.to_owned());

        debug!("Read {} regions from {}", rs.len(), value.display());

        Ok(rs)
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: &str) -> Result<Self> {
        RegionSet::try_from(Path::new(value))
    }
}

impl TryFrom<String> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: String) -> Result<Self> {
        RegionSet::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: PathBuf) -> Result<Self> {
        RegionSet::try_from(value.as_path())
    }
}

impl TryFrom<&[u8]> for RegionSet {
    type Error = RegionSetError;

    ///
    /// Parse BED text held in memory.
    ///
    fn try_from(value: &[u8]) -> Result<Self> {
        RegionSet::from_reader(value)
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            header: None,
            path: None,
        }
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<T: IntoIterator<Item = Region>>(iter: T) -> Self {
        RegionSet::from(iter.into_iter().collect::<Vec<Region>>())
    }
}

impl<'a> Iterator for RegionSetIterator<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        let region = self.region_set.regions.get(self.index)?;
        self.index += 1;
        Some(region)
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = RegionSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        RegionSetIterator {
            region_set: self,
            index: 0,
        }
    }
}

impl IntoIterator for RegionSet {
    type Item = Region;
    type IntoIter = std::vec::IntoIter<Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.into_iter()
    }
}

impl Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionSet with {} regions.", self.len())
    }
}
