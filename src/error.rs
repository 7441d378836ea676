use crate::domain::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid step: {0} (expected 1 to 5)")]
    InvalidStep(u8),
    #[error("Configuration is incomplete: {0}")]
    Incomplete(ValidationErrors),
    #[error("Corrupt record under key '{key}': {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, WizardError>;
