use anyhow::{Context, Result};
use clap::ArgMatches;

use rbpfinder_ranges::slop;

use crate::common::{load_chrom_sizes, load_regions, required, write_output};

pub fn run_slop(matches: &ArgMatches) -> Result<()> {
    let rs = load_regions(required(matches, "input")?)?;
    let chrom_sizes = load_chrom_sizes(required(matches, "genome")?)?;
    let margin = *matches
        .get_one::<u32>("both")
        .context("-b is required")?;

    let result = slop(&rs, &chrom_sizes, margin).context("Failed to expand regions")?;
    write_output(&result, matches)
}
