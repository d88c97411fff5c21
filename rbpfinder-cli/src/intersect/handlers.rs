use anyhow::Result;
use clap::ArgMatches;
use log::info;

use rbpfinder_overlaprs::{IntersectOptions, JoinMode, Strandedness, intersect};

use crate::common::{load_regions, required, write_output};

pub fn intersect_options(matches: &ArgMatches) -> IntersectOptions {
    let join = match matches.get_flag("wb") {
        true => JoinMode::WriteBoth,
        false => JoinMode::QueryOnly,
    };

    let strandedness = if matches.get_flag("same-strand") {
        Strandedness::Same
    } else if matches.get_flag("opposite-strand") {
        Strandedness::Opposite
    } else {
        Strandedness::Ignore
    };

    IntersectOptions::new(join).with_strandedness(strandedness)
}

pub fn run_intersect(matches: &ArgMatches) -> Result<()> {
    let query = load_regions(required(matches, "query")?)?;
    let reference = load_regions(required(matches, "reference")?)?;

    let options = intersect_options(matches);
    let result = intersect(&query, &reference, &options);
    info!("Found {} overlapping pairs", result.len());

    write_output(&result, matches)
}
