use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use rbpfinder_io::{TableFormat, TableWrite};
use rbpfinder_ranges::tabulate;

use crate::common::{OUTPUT_ARG, load_regions, required};

pub fn run_tabulate(matches: &ArgMatches) -> Result<()> {
    let rs = load_regions(required(matches, "input")?)?;
    let column = *matches
        .get_one::<usize>("field")
        .context("-f is required")?;
    let format: TableFormat = required(matches, "format")?.parse()?;

    let table = tabulate(&rs, column).context("Failed to tabulate column")?;

    let output = matches.get_one::<String>(OUTPUT_ARG).map(Path::new);
    table
        .write_table(output, format)
        .context("Failed to write frequency table")?;

    Ok(())
}
