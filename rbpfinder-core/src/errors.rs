use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionSetError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Malformed chromosome size table at line {line}: {content:?} ({reason})")]
    MalformedSizeTable {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Chromosome {chrom} listed twice with conflicting lengths {first} and {second}")]
    DuplicateChromosome {
        chrom: String,
        first: u32,
        second: u32,
    },

    #[error("Chromosome {0} is not present in the chromosome size table")]
    UnknownChromosome(String),

    #[error("Malformed interval at line {line}: {content:?} ({reason})")]
    MalformedInterval {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RegionSetError>;
