//! Error types for Ledgercast

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Caller bug: bad horizon, unknown scenario, empty account id, ...
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Not enough history to compute anything at all
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
