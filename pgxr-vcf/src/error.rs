use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for pgxr-vcf operations.
///
/// Only input-access problems are errors. Malformed data lines are skipped
/// and counted in [crate::ParseSummary] instead.
#[derive(Error, Debug)]
pub enum VcfError {
    /// The input file does not exist.
    #[error("VCF file not found: {0:?}")]
    NotFound(PathBuf),

    /// The first line is not a `##fileformat=VCF` declaration.
    #[error("Invalid VCF file: missing ##fileformat=VCF header in {0:?}")]
    InvalidHeader(PathBuf),

    /// The input is larger than the caller allows.
    #[error("VCF input is {size} bytes, exceeding the {limit} byte limit")]
    InputTooLarge { size: u64, limit: u64 },

    /// The file could not be opened or read.
    #[error("Can't read VCF input: {0}")]
    Unreadable(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for pgxr-vcf operations.
pub type Result<T> = std::result::Result<T, VcfError>;
