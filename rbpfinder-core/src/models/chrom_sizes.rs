use std::collections::HashMap;
use std::fmt::{self, Display};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::{RegionSetError, Result};
use crate::utils::get_dynamic_reader;

///
/// Chromosome name to length table, as found in UCSC `*.chrom.sizes` files.
///
/// The table is immutable once loaded. Names keep their file order so the
/// table can be written back out unchanged.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChromSizes {
    sizes: HashMap<String, u32>,
    order: Vec<String>,
}

impl ChromSizes {
    ///
    /// Parse a chromosome size table from any buffered reader.
    ///
    /// Blank lines and lines starting with `#` are skipped. Every other line
    /// must hold exactly a name and a non-negative length separated by
    /// whitespace.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = ChromSizes::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = idx + 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let malformed = |reason: &str| RegionSetError::MalformedSizeTable {
                line: line_number,
                content: line.clone(),
                reason: reason.to_string(),
            };

            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(malformed("expected a name and a length"));
            }

            let length = parts[1]
                .parse::<u32>()
                .map_err(|_| malformed("length is not a non-negative integer"))?;

            table.insert(parts[0], length)?;
        }

        Ok(table)
    }

    fn insert(&mut self, chrom: &str, length: u32) -> Result<()> {
        match self.sizes.get(chrom) {
            Some(&existing) if existing != length => Err(RegionSetError::DuplicateChromosome {
                chrom: chrom.to_string(),
                first: existing,
                second: length,
            }),
            Some(_) => Ok(()),
            None => {
                self.sizes.insert(chrom.to_string(), length);
                self.order.push(chrom.to_string());
                Ok(())
            }
        }
    }

    ///
    /// Length of a chromosome, failing when the chromosome is not in the table.
    ///
    pub fn length_of(&self, chrom: &str) -> Result<u32> {
        self.get(chrom)
            .ok_or_else(|| RegionSetError::UnknownChromosome(chrom.to_string()))
    }

    pub fn get(&self, chrom: &str) -> Option<u32> {
        self.sizes.get(chrom).copied()
    }

    pub fn contains(&self, chrom: &str) -> bool {
        self.sizes.contains_key(chrom)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    ///
    /// Iterate `(name, length)` pairs in file order.
    ///
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order
            .iter()
            .map(move |name| (name.as_str(), self.sizes[name]))
    }
}

impl TryFrom<&Path> for ChromSizes {
    type Error = RegionSetError;

    ///
    /// Read a chromosome size table from disk. Gzipped files are supported.
    ///
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;
        ChromSizes::from_reader(reader)
    }
}

impl TryFrom<&str> for ChromSizes {
    type Error = RegionSetError;

    fn try_from(value: &str) -> Result<Self> {
        ChromSizes::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for ChromSizes {
    type Error = RegionSetError;

    fn try_from(value: PathBuf) -> Result<Self> {
        ChromSizes::try_from(value.as_path())
    }
}

impl TryFrom<&[u8]> for ChromSizes {
    type Error = RegionSetError;

    fn try_from(value: &[u8]) -> Result<Self> {
        ChromSizes::from_reader(value)
    }
}

impl Display for ChromSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (chrom, length) in self.iter() {
            writeln!(f, "{}\t{}", chrom, length)?;
        }
        Ok(())
    }
}
