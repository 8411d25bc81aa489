use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartbinError {
    #[error("Component not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Location {0} is already assigned to another component")]
    LocationConflict(String),

    #[error("Not enough stock for '{part}': {available} available")]
    OutOfStock { part: String, available: i64 },

    #[error("No free bin available")]
    NoFreeSlot,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, PartbinError>;
