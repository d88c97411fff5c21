use thiserror::Error;

use rbpfinder_core::RegionSetError;

#[derive(Error, Debug)]
pub enum RangesError {
    #[error("Chromosome {chrom} of record {record} is not present in the chromosome size table")]
    UnknownChromosome { chrom: String, record: usize },

    #[error("Column {column} requested, but record {record} only has {fields} fields")]
    ColumnOutOfRange {
        column: usize,
        fields: usize,
        record: usize,
    },

    #[error(transparent)]
    RegionSet(#[from] RegionSetError),
}

pub type Result<T> = std::result::Result<T, RangesError>;
