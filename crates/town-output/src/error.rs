use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("output CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
