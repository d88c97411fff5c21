use std::fmt::{self, Display};

use thiserror::Error;

use rbpfinder_core::RegionSetError;
use rbpfinder_io::WriteError;
use rbpfinder_ranges::RangesError;

/// The pipeline steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Expand,
    Intersect,
    Dedupe,
    Tabulate,
    Write,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Expand => "expand",
            Stage::Intersect => "intersect",
            Stage::Dedupe => "dedupe",
            Stage::Tabulate => "tabulate",
            Stage::Write => "write",
        };
        write!(f, "{}", name)
    }
}

/// Anything a single stage can fail with.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    RegionSet(#[from] RegionSetError),
    #[error(transparent)]
    Ranges(#[from] RangesError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("{path}: {source}")]
    Output {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported organism: {organism}. Available organisms are: {available}")]
    UnsupportedOrganism { organism: String, available: String },

    #[error("Stage {stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: StageError,
    },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub(crate) fn at(stage: Stage, source: impl Into<StageError>) -> Self {
        PipelineError::Stage {
            stage,
            source: source.into(),
        }
    }

    /// True when the run stopped because its cancellation token fired.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            PipelineError::Stage {
                source: StageError::RegionSet(RegionSetError::Cancelled)
                    | StageError::Ranges(RangesError::RegionSet(RegionSetError::Cancelled)),
                ..
            }
        )
    }

    /// The stage that failed, if the error happened while running.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
