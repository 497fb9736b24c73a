//! Error types for the homebank-converter library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a bank export.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing CSV.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The input file has no header row.
    #[error("Input file has no headers.")]
    EmptySchema,

    /// Payment type code outside the HomeBank vocabulary.
    #[error("Invalid payment type: '{0}'")]
    InvalidPaymentType(String),

    /// A date value does not match the declared input format.
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// Delimiter or separator that is not a single ASCII character.
    #[error("Invalid delimiter '{0}': expected a single ASCII character")]
    InvalidDelimiter(String),

    /// Interactive prompt failed.
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}
