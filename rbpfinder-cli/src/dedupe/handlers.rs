use anyhow::Result;
use clap::ArgMatches;

use rbpfinder_ranges::dedupe;

use crate::common::{load_regions, required, write_output};

pub fn run_dedupe(matches: &ArgMatches) -> Result<()> {
    let rs = load_regions(required(matches, "input")?)?;
    let result = dedupe(&rs);
    write_output(&result, matches)
}
