use thiserror::Error;

/// Errors that can occur while rebuilding or writing a sheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
