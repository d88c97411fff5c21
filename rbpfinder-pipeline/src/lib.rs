//! The rbpfinder pipeline: expand target regions, intersect them with a
//! CLIP-seq peak catalogue, collapse duplicate overlaps and count one
//! annotation column.
//!
//! A run is described by a [`PipelineConfig`] (usually read from TOML) merged
//! with per-run [`RunOptions`]. [`PipelineConfig::resolve`] validates the
//! merged settings before anything touches the filesystem.
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use rbpfinder_pipeline::{Pipeline, PipelineConfig, RunOptions};
//!
//! let config = PipelineConfig::try_from(Path::new("rbpfinder.toml")).unwrap();
//! let settings = config
//!     .resolve(&RunOptions {
//!         targets: PathBuf::from("target_exons.bed"),
//!         organism: "mouse".to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! let report = Pipeline::new(settings).run().unwrap();
//! print!("{}", report.table);
//! ```
pub mod config;
pub mod errors;
pub mod pipeline;

pub use config::{OrganismPreset, PipelineConfig, RunOptions, RunSettings};
pub use errors::{PipelineError, Stage, StageError};
pub use pipeline::{Pipeline, PipelineOutputs, PipelineReport, PipelineStatus};
