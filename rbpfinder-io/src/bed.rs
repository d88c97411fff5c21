use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use log::debug;

use rbpfinder_core::models::RegionSet;

/// True when `path` should be written gzip compressed.
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

pub(crate) fn create_with_parents(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    File::create(path)
}

pub trait BedWrite {
    ///
    /// Write every record as one tab-joined line to any writer
    ///
    fn write_bed_to<W: Write>(&self, writer: W) -> std::io::Result<()>;

    ///
    /// Write data to disk as bed file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;

    ///
    /// Write data to disk as bed.gz file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;

    ///
    /// Write to `path`, compressed when it ends in `.gz`, or to stdout when
    /// no path is given.
    ///
    fn write_bed_or_stdout(&self, path: Option<&Path>) -> std::io::Result<()> {
        match path {
            Some(path) if is_gzip_path(path) => self.write_bed_gz(path),
            Some(path) => self.write_bed(path),
            None => self.write_bed_to(std::io::stdout().lock()),
        }
    }
}

impl BedWrite for RegionSet {
    fn write_bed_to<W: Write>(&self, writer: W) -> std::io::Result<()> {
        let mut writer = BufWriter::new(writer);
        for region in &self.regions {
            writeln!(writer, "{}", region.as_string())?;
        }
        writer.flush()
    }

    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();
        let file = create_with_parents(path)?;
        self.write_bed_to(file)?;

        debug!("Wrote {} regions to {}", self.len(), path.display());
        Ok(())
    }

    fn write_bed_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();
        let file = create_with_parents(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());

        for region in &self.regions {
            writeln!(encoder, "{}", region.as_string())?;
        }

        encoder.finish()?.flush()?;

        debug!("Wrote {} regions to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data")
            .join(file_name)
    }

    #[rstest]
    fn test_save_bed() {
        let region_set = RegionSet::try_from(get_test_path("peaks.bed").as_path()).unwrap();

        let tempdir = tempfile::tempdir().unwrap();
        let new_file_path = tempdir.path().join("nested/new_bedfile.bed");

        assert!(region_set.write_bed(new_file_path.as_path()).is_ok());

        let new_region = RegionSet::try_from(new_file_path.as_path()).unwrap();
        assert_eq!(new_region.regions, region_set.regions);
    }

    #[rstest]
    fn test_save_bed_gz() {
        let region_set = RegionSet::try_from(get_test_path("targets.bed").as_path()).unwrap();

        let tempdir = tempfile::tempdir().unwrap();
        let new_file_path = tempdir.path().join("new_file.bed.gz");

        assert!(
            region_set
                .write_bed_or_stdout(Some(new_file_path.as_path()))
                .is_ok()
        );

        // really compressed, not plain text with a .gz name
        let raw = std::fs::read(&new_file_path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);

        let new_region = RegionSet::try_from(new_file_path.as_path()).unwrap();
        assert_eq!(new_region.regions, region_set.regions);
    }

    #[rstest]
    fn test_write_to_buffer() {
        let region_set = RegionSet::try_from("chr1\t1\t2\tA\nchr2\t3\t4\n".as_bytes()).unwrap();
        let mut buffer: Vec<u8> = Vec::new();
        region_set.write_bed_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), region_set.serialize());
    }

    #[rstest]
    #[case("out.bed.gz", true)]
    #[case("out.bed", false)]
    #[case("gz", false)]
    fn test_is_gzip_path(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_gzip_path(Path::new(path)), expected);
    }
}
