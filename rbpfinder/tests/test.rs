use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;

use rbpfinder::core::models::{ChromSizes, RegionSet};
use rbpfinder::io::BedWrite;
use rbpfinder::overlaprs::{IntersectOptions, JoinMode, intersect};
use rbpfinder::pipeline::{
    Pipeline, PipelineConfig, PipelineError, PipelineStatus, RunOptions, Stage,
};
use rbpfinder::ranges::{dedupe, slop, tabulate};

#[fixture]
fn path_to_data() -> PathBuf {
    PathBuf::from("../tests/data")
}

#[fixture]
fn config(path_to_data: PathBuf) -> PipelineConfig {
    PipelineConfig::try_from(path_to_data.join("rbpfinder.toml").as_path()).unwrap()
}

fn run_options(organism: &str, outdir: &Path) -> RunOptions {
    RunOptions {
        targets: PathBuf::from("../tests/data/targets.bed"),
        organism: organism.to_string(),
        outdir: Some(outdir.to_path_buf()),
        ..Default::default()
    }
}

const MOUSE_OVERLAPS: &str = "\
chr1\t50\t250\texon1\tchr1\t150\t160\tRBP1\t0\t+
chr1\t50\t250\texon1\tchr1\t240\t260\tRBP2\t0\t+
chr1\t850\t1000\texon2\tchr1\t990\t1000\tRBP1\t0\t-
chr2\t0\t90\texon3\tchr2\t60\t80\tRBP3\t0\t+
chr2\t250\t370\texon4\tchr2\t365\t400\tRBP2\t0\t+
";

#[rstest]
fn test_mouse_run_writes_every_output(config: PipelineConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    let settings = config
        .resolve(&run_options("mouse", tempdir.path()))
        .unwrap();
    let report = Pipeline::new(settings).run().unwrap();

    assert_eq!(report.status, PipelineStatus::Completed);

    let overlaps = std::fs::read_to_string(tempdir.path().join("unique_overlaps.bed")).unwrap();
    assert_eq!(overlaps, MOUSE_OVERLAPS);

    let table = std::fs::read_to_string(tempdir.path().join("rbp_table.txt")).unwrap();
    assert_eq!(table, "RBP1\t2\nRBP2\t2\nRBP3\t1\n");

    assert!(tempdir.path().join("extended_exons.bed").exists());
}

#[rstest]
fn test_human_run_with_uploaded_peaks(config: PipelineConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    let settings = config
        .resolve(&RunOptions {
            peaks: Some(PathBuf::from("../tests/data/peaks.bed")),
            column: Some(4),
            ..run_options("Human", tempdir.path())
        })
        .unwrap();
    let report = Pipeline::new(settings).run().unwrap();

    // query-only output carries nothing but the expanded targets
    assert_eq!(
        report.overlaps.serialize(),
        "chr1\t50\t250\texon1\nchr1\t850\t1000\texon2\nchr2\t0\t90\texon3\nchr2\t250\t370\texon4\n"
    );
    assert_eq!(report.table.total(), 4);
    assert!(report.table.iter().all(|e| e.count == 1));
}

#[rstest]
fn test_pipeline_matches_stage_by_stage(config: PipelineConfig, path_to_data: PathBuf) {
    let sizes = ChromSizes::try_from(path_to_data.join("mini.chrom.sizes")).unwrap();
    let targets = RegionSet::try_from(path_to_data.join("targets.bed")).unwrap();
    let peaks = RegionSet::try_from(path_to_data.join("mapped_peaks.bed")).unwrap();

    let expanded = slop(&targets, &sizes, 50).unwrap();
    let raw = intersect(&expanded, &peaks, &IntersectOptions::new(JoinMode::WriteBoth));
    let unique = dedupe(&raw);
    let table = tabulate(&unique, 8).unwrap();

    let tempdir = tempfile::tempdir().unwrap();
    let report = Pipeline::new(config.resolve(&run_options("mouse", tempdir.path())).unwrap())
        .run()
        .unwrap();

    assert_eq!(report.expanded, expanded);
    assert_eq!(report.raw_overlaps, raw.len());
    assert_eq!(report.overlaps, unique);
    assert_eq!(report.table, table);
    assert_eq!(table.total(), unique.len());
}

#[rstest]
fn test_missing_reference_fails_before_writing() {
    let tempdir = tempfile::tempdir().unwrap();
    let outdir = tempdir.path().join("out");

    let err = PipelineConfig::default()
        .resolve(&run_options("mouse", &outdir))
        .unwrap_err();

    assert!(matches!(err, PipelineError::InvalidConfig(_)));
    assert!(!outdir.exists());
}

#[rstest]
fn test_unsupported_organism(config: PipelineConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    let err = config
        .resolve(&run_options("Select", tempdir.path()))
        .unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedOrganism { .. }));
}

#[rstest]
fn test_empty_targets_report_empty_result(config: PipelineConfig) {
    let tempdir = tempfile::tempdir().unwrap();
    let targets = tempdir.path().join("empty.bed");
    RegionSet::default().write_bed(&targets).unwrap();

    let settings = config
        .resolve(&RunOptions {
            targets,
            ..run_options("mouse", tempdir.path())
        })
        .unwrap();
    let report = Pipeline::new(settings).run().unwrap();

    assert_eq!(
        report.status,
        PipelineStatus::EmptyResult {
            stage: Stage::Expand
        }
    );
    assert!(report.overlaps.is_empty());
}

#[rstest]
fn test_gzipped_inputs(config: PipelineConfig, path_to_data: PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let targets = RegionSet::try_from(path_to_data.join("targets.bed")).unwrap();
    let gz_targets = tempdir.path().join("targets.bed.gz");
    targets.write_bed_gz(&gz_targets).unwrap();

    let settings = config
        .resolve(&RunOptions {
            targets: gz_targets,
            ..run_options("mouse", tempdir.path())
        })
        .unwrap();
    let report = Pipeline::new(settings).run().unwrap();
    assert_eq!(report.overlaps.serialize(), MOUSE_OVERLAPS);
}
