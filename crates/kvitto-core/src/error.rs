//! Error types for the kvitto-core library.

use thiserror::Error;

/// Main error type for the kvitto library.
#[derive(Error, Debug)]
pub enum KvittoError {
    /// Input normalization error.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Receipt extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to parsing the raw email export into records.
///
/// These are fatal for the whole batch: if the input cannot be turned into
/// any email record at all, there is nothing to extract from.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input looked like JSON but could not be parsed, and no
    /// recoverable fragments were found either.
    #[error("failed to parse email export: {0}")]
    Json(String),

    /// The input parsed but contained no email records.
    #[error("no email records found in input")]
    NoRecords,
}

/// Errors related to receipt field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A field could not be extracted from a record.
    #[error("missing field: {0}")]
    MissingField(String),

    /// The four output columns drifted out of alignment.
    #[error(
        "misaligned columns: dates={dates}, passengers={passengers}, costs={costs}, currencies={currencies}"
    )]
    MisalignedColumns {
        dates: usize,
        passengers: usize,
        costs: usize,
        currencies: usize,
    },
}

/// Result type for the kvitto library.
pub type Result<T> = std::result::Result<T, KvittoError>;
