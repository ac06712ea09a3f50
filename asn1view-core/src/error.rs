use thiserror::Error;

/// Main error type for asn1view decoding operations
///
/// Only `InvalidInput`, `InvalidEncoding` and `Exhausted` cross the crate
/// boundary to callers. `InvalidData` carries per-unit failures inside the
/// decoding strategies; the strategies swallow it and keep scanning.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("All decoding strategies failed: {0}")]
    Exhausted(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for asn1view operations
pub type Asn1Result<T> = Result<T, DecodeError>;
