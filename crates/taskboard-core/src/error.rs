use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskboardError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A list named '{0}' already exists. Please choose a different name.")]
    DuplicateTitle(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage write failed after {attempts} attempt(s): {message}")]
    Storage { attempts: u32, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
