//! Error types for quadrix

use thiserror::Error;

/// Main error type for quadrix operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type alias for quadrix operations
pub type Result<T> = std::result::Result<T, Error>;
