use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use rbpfinder_core::models::{ChromSizes, RegionSet};
use rbpfinder_core::utils::get_dynamic_reader_w_stdin;
use rbpfinder_io::BedWrite;

pub const OUTPUT_ARG: &str = "output";

///
/// Read a region set from a path, or from stdin when the path is `-`.
///
pub fn load_regions(path: &str) -> Result<RegionSet> {
    let reader = get_dynamic_reader_w_stdin(path)
        .with_context(|| format!("Failed to open BED file {}", path))?;
    let mut rs = RegionSet::from_reader(reader)
        .with_context(|| format!("Failed to load BED file {}", path))?;
    if path != "-" {
        rs.path = Some(Path::new(path).to_path_buf());
    }
    info!("Loaded {} regions from {}", rs.len(), path);
    Ok(rs)
}

pub fn load_chrom_sizes(path: &str) -> Result<ChromSizes> {
    ChromSizes::try_from(path)
        .with_context(|| format!("Failed to load chromosome sizes from {}", path))
}

pub fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("--{} is required", id))
}

///
/// Write `rs` to the `--output` path (gzip when it ends in `.gz`), or to
/// stdout.
///
pub fn write_output(rs: &RegionSet, matches: &ArgMatches) -> Result<()> {
    let output = matches.get_one::<String>(OUTPUT_ARG).map(Path::new);
    rs.write_bed_or_stdout(output)
        .with_context(|| match output {
            Some(p) => format!("Failed to write output to {}", p.display()),
            None => "Failed to write output to stdout".to_string(),
        })?;
    if let Some(p) = output {
        info!("Output written to {}", p.display());
    }
    Ok(())
}
