use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use rbpfinder_overlaprs::JoinMode;
use rbpfinder_pipeline::{Pipeline, PipelineConfig, PipelineStatus, RunOptions};

use crate::common::required;

pub fn run_options(matches: &ArgMatches) -> Result<RunOptions> {
    Ok(RunOptions {
        targets: PathBuf::from(required(matches, "targets")?),
        organism: required(matches, "organism")?.to_string(),
        chrom_sizes: matches.get_one::<String>("chrom-sizes").map(PathBuf::from),
        peaks: matches.get_one::<String>("peaks").map(PathBuf::from),
        margin: matches.get_one::<u32>("margin").copied(),
        column: matches.get_one::<usize>("column").copied(),
        join: matches.get_flag("wb").then_some(JoinMode::WriteBoth),
        strandedness: None,
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        outdir: matches.get_one::<String>("outdir").map(PathBuf::from),
    })
}

fn load_config(matches: &ArgMatches) -> Result<PipelineConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => PipelineConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load configuration from {}", path)),
        None => Ok(PipelineConfig::default()),
    }
}

pub fn run_pipeline(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let settings = config.resolve(&run_options(matches)?)?;
    let pipeline = Pipeline::new(settings);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(120));

    let result = pipeline.run_with(|stage| pb.set_message(format!("{}", stage)));
    pb.finish_and_clear();

    let report = result?;

    for path in [
        &report.outputs.expanded,
        &report.outputs.overlaps,
        &report.outputs.table,
    ]
    .into_iter()
    .flatten()
    {
        info!("Wrote {}", path.display());
    }

    match report.status {
        PipelineStatus::Completed => {
            println!("Number of unique overlaps: {}", report.overlaps.len());
            print!("{}", report.table);
        }
        PipelineStatus::EmptyResult { stage } => {
            eprintln!("No overlaps found (stage {} produced no records)", stage);
        }
    }

    Ok(())
}
