use std::fmt::{self, Display};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use flate2::Compression;
use flate2::write::GzEncoder;

use rbpfinder_ranges::FrequencyTable;

use crate::bed::{create_with_parents, is_gzip_path};
use crate::error::{Result, WriteError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// `key\tcount` lines, most frequent first
    #[default]
    Tsv,
    Json,
}

impl FromStr for TableFormat {
    type Err = WriteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tsv" | "txt" => Ok(TableFormat::Tsv),
            "json" => Ok(TableFormat::Json),
            _ => Err(WriteError::UnknownFormat(s.to_string())),
        }
    }
}

impl Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Tsv => write!(f, "tsv"),
            TableFormat::Json => write!(f, "json"),
        }
    }
}

pub trait TableWrite {
    fn write_table_to<W: Write>(&self, writer: W, format: TableFormat) -> Result<()>;

    ///
    /// Write the table to `path` (gzip compressed when it ends in `.gz`), or
    /// to stdout when no path is given.
    ///
    fn write_table(&self, path: Option<&Path>, format: TableFormat) -> Result<()> {
        match path {
            Some(path) if is_gzip_path(path) => {
                let file = create_with_parents(path)?;
                let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());
                self.write_table_to(&mut encoder, format)?;
                encoder.finish()?.flush()?;
                Ok(())
            }
            Some(path) => self.write_table_to(create_with_parents(path)?, format),
            None => self.write_table_to(std::io::stdout().lock(), format),
        }
    }
}

impl TableWrite for FrequencyTable {
    fn write_table_to<W: Write>(&self, writer: W, format: TableFormat) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        match format {
            TableFormat::Tsv => write!(writer, "{}", self)?,
            TableFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, self)?;
                writeln!(writer)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rbpfinder_core::models::RegionSet;
    use rbpfinder_ranges::tabulate;
    use rstest::*;

    #[fixture]
    fn table() -> FrequencyTable {
        let overlaps =
            RegionSet::try_from("chr1\t1\t2\tRBP2\nchr1\t1\t2\tRBP1\nchr1\t3\t4\tRBP1\n".as_bytes())
                .unwrap();
        tabulate(&overlaps, 4).unwrap()
    }

    #[rstest]
    fn test_write_tsv(table: FrequencyTable) {
        let mut buffer: Vec<u8> = Vec::new();
        table.write_table_to(&mut buffer, TableFormat::Tsv).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "RBP1\t2\nRBP2\t1\n");
    }

    #[rstest]
    fn test_write_json(table: FrequencyTable) {
        let mut buffer: Vec<u8> = Vec::new();
        table.write_table_to(&mut buffer, TableFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["column"], 4);
        assert_eq!(value["entries"][0]["key"], "RBP1");
        assert_eq!(value["entries"][0]["count"], 2);
        assert_eq!(value["entries"][1]["key"], "RBP2");
    }

    #[rstest]
    fn test_write_table_file(table: FrequencyTable) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("rbp_table.txt");
        table.write_table(Some(path.as_path()), TableFormat::Tsv).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "RBP1\t2\nRBP2\t1\n");
    }

    #[rstest]
    #[case("tsv", TableFormat::Tsv)]
    #[case("JSON", TableFormat::Json)]
    fn test_format_from_str(#[case] text: &str, #[case] expected: TableFormat) {
        assert_eq!(text.parse::<TableFormat>().unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_format() {
        assert!(matches!(
            "xml".parse::<TableFormat>(),
            Err(WriteError::UnknownFormat(_))
        ));
    }
}
