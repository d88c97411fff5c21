use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use rbpfinder_core::CancellationToken;
use rbpfinder_core::models::{ChromSizes, RegionSet};
use rbpfinder_io::{BedWrite, TableFormat, TableWrite};
use rbpfinder_overlaprs::{IntersectOptions, intersect_cancellable};
use rbpfinder_ranges::{FrequencyTable, dedupe_cancellable, slop_cancellable, tabulate_cancellable};

use crate::config::RunSettings;
use crate::errors::{PipelineError, Result, Stage, StageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Completed,
    /// A stage produced no records, so the stages after it were skipped.
    EmptyResult { stage: Stage },
}

/// Files written by a run, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutputs {
    pub expanded: Option<PathBuf>,
    pub overlaps: Option<PathBuf>,
    pub table: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub expanded: RegionSet,
    pub overlaps: RegionSet,
    pub table: FrequencyTable,
    /// Overlap records before deduplication
    pub raw_overlaps: usize,
    pub status: PipelineStatus,
    pub outputs: PipelineOutputs,
}

impl PipelineReport {
    fn new(expanded: RegionSet, column: usize) -> Self {
        PipelineReport {
            expanded,
            overlaps: RegionSet::default(),
            table: FrequencyTable {
                column,
                entries: Vec::new(),
            },
            raw_overlaps: 0,
            status: PipelineStatus::Completed,
            outputs: PipelineOutputs::default(),
        }
    }
}

///
/// Runs expand, intersect, dedupe and tabulate over one set of target regions,
/// writing `extended_exons.bed`, `unique_overlaps.bed` and `rbp_table.txt`
/// into the output directory as each result becomes available.
///
pub struct Pipeline {
    settings: RunSettings,
    cancel: CancellationToken,
}

impl Pipeline {
    pub fn new(settings: RunSettings) -> Self {
        Pipeline {
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Share `cancel` with the run. A configured timeout still applies on top.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// A handle that stops the run from another thread.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn run(&self) -> Result<PipelineReport> {
        self.run_with(|_| {})
    }

    ///
    /// Run every stage, calling `on_stage` just before each one starts.
    ///
    /// Outputs left in the output directory by an earlier run are removed
    /// first, so after a failed or short-circuited run only the files listed
    /// in the report exist. The configured timeout counts from this call.
    ///
    pub fn run_with<F: FnMut(Stage)>(&self, mut on_stage: F) -> Result<PipelineReport> {
        let settings = &self.settings;
        let cancel = match settings.timeout {
            Some(timeout) => self.cancel.with_deadline_from_now(timeout),
            None => self.cancel.clone(),
        };
        let cancel = &cancel;

        info!(
            "Running rbpfinder for {} targets from {}",
            settings.organism,
            settings.targets.display()
        );

        for path in [
            settings.expanded_path(),
            settings.overlaps_path(),
            settings.table_path(),
        ] {
            remove_stale_output(&path)?;
        }

        on_stage(Stage::Load);
        let chrom_sizes = ChromSizes::try_from(settings.chrom_sizes.as_path())
            .map_err(|e| PipelineError::at(Stage::Load, e))?;
        let targets = RegionSet::try_from(settings.targets.as_path())
            .map_err(|e| PipelineError::at(Stage::Load, e))?;
        let peaks = RegionSet::try_from(settings.peaks.as_path())
            .map_err(|e| PipelineError::at(Stage::Load, e))?;
        debug!(
            "Loaded {} chromosomes, {} targets, {} peaks",
            chrom_sizes.len(),
            targets.len(),
            peaks.len()
        );

        on_stage(Stage::Expand);
        let expanded = slop_cancellable(&targets, &chrom_sizes, settings.margin, cancel)
            .map_err(|e| PipelineError::at(Stage::Expand, e))?;

        std::fs::create_dir_all(&settings.outdir)
            .map_err(|e| output_error(&settings.outdir, e))?;

        let mut report = PipelineReport::new(expanded, settings.column);

        on_stage(Stage::Write);
        let expanded_path = settings.expanded_path();
        write_regions(&report.expanded, &expanded_path)?;
        report.outputs.expanded = Some(expanded_path);
        info!(
            "Target regions expanded by {} bases: {} regions",
            settings.margin,
            report.expanded.len()
        );

        if report.expanded.is_empty() {
            warn!("No target regions to intersect");
            report.status = PipelineStatus::EmptyResult {
                stage: Stage::Expand,
            };
            return Ok(report);
        }

        on_stage(Stage::Intersect);
        let options = IntersectOptions::new(settings.join).with_strandedness(settings.strandedness);
        let raw = intersect_cancellable(&report.expanded, &peaks, &options, cancel)
            .map_err(|e| PipelineError::at(Stage::Intersect, e))?;
        report.raw_overlaps = raw.len();

        on_stage(Stage::Dedupe);
        report.overlaps =
            dedupe_cancellable(&raw, cancel).map_err(|e| PipelineError::at(Stage::Dedupe, e))?;
        drop(raw);

        on_stage(Stage::Write);
        let overlaps_path = settings.overlaps_path();
        write_regions(&report.overlaps, &overlaps_path)?;
        report.outputs.overlaps = Some(overlaps_path);
        info!("Number of unique overlaps: {}", report.overlaps.len());

        if report.overlaps.is_empty() {
            warn!("The intersection produced no overlaps");
            report.status = PipelineStatus::EmptyResult {
                stage: Stage::Intersect,
            };
            return Ok(report);
        }

        on_stage(Stage::Tabulate);
        report.table = tabulate_cancellable(&report.overlaps, settings.column, cancel)
            .map_err(|e| PipelineError::at(Stage::Tabulate, e))?;

        on_stage(Stage::Write);
        let table_path = settings.table_path();
        report
            .table
            .write_table(Some(table_path.as_path()), TableFormat::Tsv)
            .map_err(|e| PipelineError::at(Stage::Write, e))?;
        report.outputs.table = Some(table_path);
        info!(
            "Extracted {} distinct values from column {}",
            report.table.len(),
            settings.column
        );

        Ok(report)
    }
}

fn output_error(path: &Path, source: std::io::Error) -> PipelineError {
    PipelineError::at(
        Stage::Write,
        StageError::Output {
            path: path.display().to_string(),
            source,
        },
    )
}

fn remove_stale_output(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed output of an earlier run: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(output_error(path, e)),
    }
}

fn write_regions(regions: &RegionSet, path: &Path) -> Result<()> {
    regions
        .write_bed(path)
        .map_err(|e| output_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rbpfinder_core::RegionSetError;
    use rbpfinder_overlaprs::{JoinMode, Strandedness};
    use rbpfinder_ranges::RangesError;
    use rstest::*;
    use std::time::Duration;

    fn data_path(file_name: &str) -> PathBuf {
        PathBuf::from("../tests/data").join(file_name)
    }

    fn settings(join: JoinMode, column: usize, outdir: &Path) -> RunSettings {
        RunSettings {
            organism: "mouse".to_string(),
            targets: data_path("targets.bed"),
            chrom_sizes: data_path("mini.chrom.sizes"),
            peaks: data_path("mapped_peaks.bed"),
            margin: 50,
            column,
            join,
            strandedness: Strandedness::Ignore,
            timeout: None,
            outdir: outdir.to_path_buf(),
        }
    }

    #[rstest]
    fn test_write_both_run() {
        let tempdir = tempfile::tempdir().unwrap();
        let run = Pipeline::new(settings(JoinMode::WriteBoth, 8, tempdir.path()));

        let mut stages = Vec::new();
        let report = run.run_with(|stage| stages.push(stage)).unwrap();

        assert_eq!(report.status, PipelineStatus::Completed);
        assert_eq!(report.expanded.len(), 4);
        assert_eq!(report.raw_overlaps, 6);
        assert_eq!(report.overlaps.len(), 5);
        assert_eq!(report.table.to_string(), "RBP1\t2\nRBP2\t2\nRBP3\t1\n");
        assert_eq!(
            stages,
            vec![
                Stage::Load,
                Stage::Expand,
                Stage::Write,
                Stage::Intersect,
                Stage::Dedupe,
                Stage::Write,
                Stage::Tabulate,
                Stage::Write
            ]
        );

        let table = std::fs::read_to_string(tempdir.path().join("rbp_table.txt")).unwrap();
        assert_eq!(table, "RBP1\t2\nRBP2\t2\nRBP3\t1\n");
        let expanded = std::fs::read_to_string(tempdir.path().join("extended_exons.bed")).unwrap();
        assert_eq!(
            expanded,
            "chr1\t50\t250\texon1\nchr1\t850\t1000\texon2\n\
             chr2\t0\t90\texon3\nchr2\t250\t370\texon4\n"
        );
        assert_eq!(
            report.outputs.overlaps,
            Some(tempdir.path().join("unique_overlaps.bed"))
        );
    }

    #[rstest]
    fn test_query_only_run() {
        let tempdir = tempfile::tempdir().unwrap();
        let report = Pipeline::new(settings(JoinMode::QueryOnly, 4, tempdir.path()))
            .run()
            .unwrap();

        assert_eq!(report.overlaps.len(), 4);
        assert_eq!(
            report.table.to_string(),
            "exon1\t1\nexon2\t1\nexon3\t1\nexon4\t1\n"
        );
    }

    #[rstest]
    fn test_no_overlaps_is_an_empty_result() {
        let tempdir = tempfile::tempdir().unwrap();
        let peaks = tempdir.path().join("far_peaks.bed");
        std::fs::write(&peaks, "chr3\t1\t100\tRBP4\t0\t+\n").unwrap();

        let mut settings = settings(JoinMode::WriteBoth, 8, tempdir.path());
        settings.peaks = peaks;
        let report = Pipeline::new(settings).run().unwrap();

        assert_eq!(
            report.status,
            PipelineStatus::EmptyResult {
                stage: Stage::Intersect
            }
        );
        assert!(report.table.is_empty());
        assert!(tempdir.path().join("unique_overlaps.bed").exists());
        assert!(!tempdir.path().join("rbp_table.txt").exists());
    }

    #[rstest]
    fn test_unknown_chromosome_fails_expand() {
        let tempdir = tempfile::tempdir().unwrap();
        let targets = tempdir.path().join("targets.bed");
        std::fs::write(&targets, "chr1\t1\t2\nchrUn\t5\t10\n").unwrap();

        let mut settings = settings(JoinMode::WriteBoth, 8, tempdir.path());
        settings.targets = targets;
        let err = Pipeline::new(settings).run().unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Expand));
        assert!(matches!(
            err,
            PipelineError::Stage {
                source: StageError::Ranges(RangesError::UnknownChromosome { .. }),
                ..
            }
        ));
        assert!(!tempdir.path().join("extended_exons.bed").exists());
    }

    #[rstest]
    fn test_column_out_of_range_fails_tabulate() {
        let tempdir = tempfile::tempdir().unwrap();
        let err = Pipeline::new(settings(JoinMode::QueryOnly, 8, tempdir.path()))
            .run()
            .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Tabulate));
    }

    #[rstest]
    fn test_missing_input_fails_load() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut settings = settings(JoinMode::QueryOnly, 4, tempdir.path());
        settings.targets = tempdir.path().join("missing.bed");

        let err = Pipeline::new(settings).run().unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Load));
        assert!(matches!(
            err,
            PipelineError::Stage {
                source: StageError::RegionSet(RegionSetError::FileNotFound(_)),
                ..
            }
        ));
    }

    #[rstest]
    fn test_cancelled_run() {
        let tempdir = tempfile::tempdir().unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let err = Pipeline::new(settings(JoinMode::WriteBoth, 8, tempdir.path()))
            .with_cancellation(token)
            .run()
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err.stage(), Some(Stage::Expand));
    }

    #[rstest]
    fn test_cancel_token_stops_the_run() {
        let tempdir = tempfile::tempdir().unwrap();
        let run = Pipeline::new(settings(JoinMode::WriteBoth, 8, tempdir.path()));
        run.cancel_token().cancel();

        let err = run.run().unwrap_err();
        assert!(err.is_cancelled());
    }

    #[rstest]
    fn test_rerun_removes_outputs_of_earlier_run() {
        let tempdir = tempfile::tempdir().unwrap();
        Pipeline::new(settings(JoinMode::WriteBoth, 8, tempdir.path()))
            .run()
            .unwrap();
        assert!(tempdir.path().join("rbp_table.txt").exists());

        let peaks = tempdir.path().join("far_peaks.bed");
        std::fs::write(&peaks, "chr3\t1\t100\tRBP4\t0\t+\n").unwrap();
        let mut settings = settings(JoinMode::WriteBoth, 8, tempdir.path());
        settings.peaks = peaks;
        let report = Pipeline::new(settings).run().unwrap();

        assert_eq!(
            report.status,
            PipelineStatus::EmptyResult {
                stage: Stage::Intersect
            }
        );
        assert_eq!(report.outputs.table, None);
        assert!(!tempdir.path().join("rbp_table.txt").exists());
        let overlaps = std::fs::read_to_string(tempdir.path().join("unique_overlaps.bed")).unwrap();
        assert_eq!(overlaps, "");
    }

    #[rstest]
    fn test_failed_rerun_leaves_no_outputs() {
        let tempdir = tempfile::tempdir().unwrap();
        Pipeline::new(settings(JoinMode::WriteBoth, 8, tempdir.path()))
            .run()
            .unwrap();

        let targets = tempdir.path().join("bad_targets.bed");
        std::fs::write(&targets, "chrUn\t5\t10\n").unwrap();
        let mut settings = settings(JoinMode::WriteBoth, 8, tempdir.path());
        settings.targets = targets;
        let err = Pipeline::new(settings).run().unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Expand));
        for name in ["extended_exons.bed", "unique_overlaps.bed", "rbp_table.txt"] {
            assert!(!tempdir.path().join(name).exists(), "{} was left behind", name);
        }
    }

    #[rstest]
    fn test_timeout_counts_from_run_start() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut settings = settings(JoinMode::WriteBoth, 8, tempdir.path());
        settings.timeout = Some(Duration::from_millis(300));

        let run = Pipeline::new(settings);
        std::thread::sleep(Duration::from_millis(400));

        let report = run.run().unwrap();
        assert_eq!(report.status, PipelineStatus::Completed);
    }

    #[rstest]
    fn test_elapsed_timeout_cancels_run() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut settings = settings(JoinMode::WriteBoth, 8, tempdir.path());
        settings.timeout = Some(Duration::ZERO);

        let err = Pipeline::new(settings).run().unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err.stage(), Some(Stage::Expand));
    }
}
