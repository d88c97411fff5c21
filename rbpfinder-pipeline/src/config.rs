use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use rbpfinder_overlaprs::{JoinMode, Strandedness};

use crate::errors::{PipelineError, Result};

pub const DEFAULT_MARGIN: u32 = 100;
pub const DEFAULT_COLUMN: usize = 4;

pub const EXPANDED_FILE_NAME: &str = "extended_exons.bed";
pub const OVERLAPS_FILE_NAME: &str = "unique_overlaps.bed";
pub const TABLE_FILE_NAME: &str = "rbp_table.txt";

fn default_margin() -> u32 {
    DEFAULT_MARGIN
}

fn default_column() -> usize {
    DEFAULT_COLUMN
}

fn builtin_organisms() -> BTreeMap<String, OrganismPreset> {
    BTreeMap::from([
        (
            "human".to_string(),
            OrganismPreset {
                chrom_sizes: None,
                peaks: None,
                join: JoinMode::QueryOnly,
            },
        ),
        (
            "mouse".to_string(),
            OrganismPreset {
                chrom_sizes: None,
                peaks: None,
                join: JoinMode::WriteBoth,
            },
        ),
    ])
}

///
/// Reference data and join behaviour for one organism.
///
/// Human runs bring their own peak file; the mouse preset points at a peak set
/// already mapped to human coordinates and keeps the peak columns in the
/// output.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OrganismPreset {
    pub chrom_sizes: Option<PathBuf>,
    pub peaks: Option<PathBuf>,
    #[serde(default)]
    pub join: JoinMode,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    #[serde(default = "default_margin")]
    pub margin: u32,
    #[serde(default = "default_column")]
    pub column: usize,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub strandedness: Strandedness,
    #[serde(default = "builtin_organisms")]
    pub organisms: BTreeMap<String, OrganismPreset>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            margin: DEFAULT_MARGIN,
            column: DEFAULT_COLUMN,
            timeout_secs: None,
            strandedness: Strandedness::Ignore,
            organisms: builtin_organisms(),
        }
    }
}

///
/// Values given for a single run, typically from the command line. Anything
/// set here wins over the configuration file.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub targets: PathBuf,
    pub organism: String,
    pub chrom_sizes: Option<PathBuf>,
    pub peaks: Option<PathBuf>,
    pub margin: Option<u32>,
    pub column: Option<usize>,
    pub join: Option<JoinMode>,
    pub strandedness: Option<Strandedness>,
    pub timeout_secs: Option<u64>,
    pub outdir: Option<PathBuf>,
}

///
/// A fully resolved and validated run. Every path is known to be set and
/// every numeric setting to be usable.
///
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub organism: String,
    pub targets: PathBuf,
    pub chrom_sizes: PathBuf,
    pub peaks: PathBuf,
    pub margin: u32,
    pub column: usize,
    pub join: JoinMode,
    pub strandedness: Strandedness,
    pub timeout: Option<Duration>,
    pub outdir: PathBuf,
}

impl RunSettings {
    pub fn expanded_path(&self) -> PathBuf {
        self.outdir.join(EXPANDED_FILE_NAME)
    }

    pub fn overlaps_path(&self) -> PathBuf {
        self.outdir.join(OVERLAPS_FILE_NAME)
    }

    pub fn table_path(&self) -> PathBuf {
        self.outdir.join(TABLE_FILE_NAME)
    }
}

impl TryFrom<&Path> for PipelineConfig {
    type Error = PipelineError;

    ///
    /// Read a TOML configuration file. Relative reference paths inside it are
    /// taken relative to the directory holding the file.
    ///
    fn try_from(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path)?;
        let mut config: PipelineConfig = toml::from_str(&toml_str)?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }

        Ok(config)
    }
}

impl PipelineConfig {
    fn resolve_paths(&mut self, base: &Path) {
        let anchor = |p: &mut Option<PathBuf>| {
            if let Some(inner) = p.as_mut() {
                if inner.is_relative() {
                    *inner = base.join(&*inner);
                }
            }
        };

        for preset in self.organisms.values_mut() {
            anchor(&mut preset.chrom_sizes);
            anchor(&mut preset.peaks);
        }
    }

    pub fn organism(&self, name: &str) -> Result<&OrganismPreset> {
        self.organisms
            .get(&name.to_lowercase())
            .ok_or_else(|| PipelineError::UnsupportedOrganism {
                organism: name.to_string(),
                available: self
                    .organisms
                    .keys()
                    .cloned()
                    .collect::<Vec<String>>()
                    .join(", "),
            })
    }

    ///
    /// Merge `options` over this configuration and check the result. Nothing
    /// is read or written here, so a bad setup fails before any stage runs.
    ///
    pub fn resolve(&self, options: &RunOptions) -> Result<RunSettings> {
        let preset = self.organism(&options.organism)?;

        let margin = options.margin.unwrap_or(self.margin);
        if margin == 0 {
            return Err(PipelineError::InvalidConfig(
                "margin must be greater than 0".to_string(),
            ));
        }

        let column = options.column.unwrap_or(self.column);
        if column == 0 {
            return Err(PipelineError::InvalidConfig(
                "column must be greater than 0 (columns are 1-based)".to_string(),
            ));
        }

        if options.targets.as_os_str().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "no target regions were given".to_string(),
            ));
        }

        let organism = options.organism.to_lowercase();

        let chrom_sizes = options
            .chrom_sizes
            .clone()
            .or_else(|| preset.chrom_sizes.clone())
            .ok_or_else(|| {
                PipelineError::InvalidConfig(format!(
                    "no chromosome size table configured for organism '{}'",
                    organism
                ))
            })?;

        let peaks = options
            .peaks
            .clone()
            .or_else(|| preset.peaks.clone())
            .ok_or_else(|| {
                PipelineError::InvalidConfig(format!(
                    "no CLIP-seq peak file configured for organism '{}'",
                    organism
                ))
            })?;

        let timeout = match options.timeout_secs.or(self.timeout_secs) {
            Some(0) => {
                return Err(PipelineError::InvalidConfig(
                    "timeout_secs must be greater than 0".to_string(),
                ));
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(RunSettings {
            organism,
            targets: options.targets.clone(),
            chrom_sizes,
            peaks,
            margin,
            column,
            join: options.join.unwrap_or(preset.join),
            strandedness: options.strandedness.unwrap_or(self.strandedness),
            timeout,
            outdir: options.outdir.clone().unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}
