// In: src/error.rs

//! This module defines the single, unified error type for the entire kdpoint library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KdPointError {
    // =========================================================================
    // === Record Format Errors (Raised by the encode/decode kernels)
    // =========================================================================
    /// The payload does not fit the dataset's fixed slot.
    #[error("data length ({data_len}) greater than max data length ({max_data_len})")]
    PayloadTooLarge { data_len: usize, max_data_len: usize },

    /// The leading byte of a record is not a known serialization version.
    #[error("invalid serialization version: {0}")]
    UnsupportedVersion(u8),

    /// The lengths declared by a record header imply more bytes than are available.
    #[error("truncated record: needed {needed} bytes, only {available} available")]
    TruncatedRecord { needed: usize, available: usize },

    /// The input was exhausted before the first byte of a new record.
    #[error("clean end of input: no further records")]
    CleanEndOfInput,

    /// A length is too large to be written into its 4-byte header field.
    #[error("{field} length ({value}) does not fit in a 32-bit header field")]
    LengthOverflow { field: &'static str, value: usize },

    // =========================================================================
    // === Contract Violations
    // =========================================================================
    /// Two points (or a point and a dataset format) disagree on dimensionality.
    #[error("dimension mismatch: {left} != {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Invalid point format configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the caller-supplied reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a `PointFormat`.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, KdPointError>;

impl KdPointError {
    /// True when a stream ended exactly on a record boundary.
    pub fn is_clean_eof(&self) -> bool {
        matches!(self, KdPointError::CleanEndOfInput)
    }

    /// True when a record was cut short, either in a buffer or mid-stream.
    pub fn is_truncation(&self) -> bool {
        matches!(self, KdPointError::TruncatedRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_its_source() {
        use std::error::Error as _;

        let inner = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: KdPointError = inner.into();
        assert!(matches!(err, KdPointError::Io(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_classification_helpers() {
        assert!(KdPointError::CleanEndOfInput.is_clean_eof());
        assert!(!KdPointError::CleanEndOfInput.is_truncation());

        let truncated = KdPointError::TruncatedRecord {
            needed: 13,
            available: 4,
        };
        assert!(truncated.is_truncation());
        assert!(!truncated.is_clean_eof());
    }

    #[test]
    fn test_payload_too_large_message() {
        let err = KdPointError::PayloadTooLarge {
            data_len: 9,
            max_data_len: 4,
        };
        assert_eq!(
            err.to_string(),
            "data length (9) greater than max data length (4)"
        );
    }
}
