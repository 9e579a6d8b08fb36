use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a figure run.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FigureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("duplicate hamming distance {0} in frequency table")]
    DuplicateDistance(u32),

    #[error("counts overflow a 64-bit total at hamming distance {0}")]
    CountOverflow(u32),

    #[error("frequency table is empty")]
    EmptyTable,

    #[error("failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, FigureError>;
