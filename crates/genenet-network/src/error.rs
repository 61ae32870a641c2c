use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Table is empty: {0}")]
    EmptyTable(String),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Server is not ready. Required files are not loaded.")]
    NotReady,

    #[error("Could not find {file} in any expected location (searched {searched:?})")]
    DatasetNotFound { file: String, searched: Vec<PathBuf> },
}

impl NetworkError {
    /// Errors caused by the caller's input rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn(_) | Self::InvalidParameter(_) | Self::EmptyTable(_)
                | Self::Spreadsheet(_) | Self::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
