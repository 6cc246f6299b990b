// In: src/format.rs

//! Defines the on-disk structures and constants for the fixed-stride point record.
//! This is the single source of truth for the record layout shared by the encoder,
//! the three decoders, and any index that addresses records by stride.
//!
//! Layout of one record (all integers little-endian):
//!
//! ```text
//! +---------+----------+-------------+------------+------------------+-----------+-----------+
//! | version | dims u32 | data_len u32| pad_len u32| dims x f64 (LE)  | payload   | zero pad  |
//! | 1 byte  | 4 bytes  | 4 bytes     | 4 bytes    | dims * 8 bytes   | data_len  | pad_len   |
//! +---------+----------+-------------+------------+------------------+-----------+-----------+
//! ```

use crate::error::{KdPointError, Result};

//==================================================================================
// I. Format Constants
//==================================================================================

/// The only serialization version this crate reads or writes.
pub const FORMAT_VERSION: u8 = 0;

pub const FLOAT64_SIZE: usize = std::mem::size_of::<f64>();
pub const UINT32_SIZE: usize = std::mem::size_of::<u32>();

/// Size of the fixed leading header: version byte plus three `u32` lengths.
pub const HEADER_SIZE: usize = 1 + 3 * UINT32_SIZE;

// These assumptions are baked into serialization version 0.
const _: () = assert!(FLOAT64_SIZE == 8 && UINT32_SIZE == 4 && HEADER_SIZE == 13);

//==================================================================================
// II. Stride Arithmetic
//==================================================================================

/// The constant byte length of every record for a `(dims, max_data_len)` pair.
///
/// # Panics
///
/// Panics on arithmetic overflow in debug builds and wraps in release builds.
/// Use [`try_stride`] when the inputs are not already known to fit.
pub const fn stride(dims: usize, max_data_len: usize) -> usize {
    HEADER_SIZE + dims * FLOAT64_SIZE + max_data_len
}

/// Checked variant of [`stride`]. Returns `None` if the result overflows `usize`.
pub fn try_stride(dims: usize, max_data_len: usize) -> Option<usize> {
    dims.checked_mul(FLOAT64_SIZE)?
        .checked_add(HEADER_SIZE)?
        .checked_add(max_data_len)
}

/// Converts a length into its 4-byte header representation.
pub(crate) fn header_field(field: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| KdPointError::LengthOverflow { field, value })
}

//==================================================================================
// III. Record Header
//==================================================================================

/// The parsed fixed-size header of one record.
///
/// Every record is self-describing: `pad_len` is written explicitly, so the
/// dataset's maximum payload length can be recovered from any single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub dims: u32,
    pub data_len: u32,
    pub pad_len: u32,
}

impl RecordHeader {
    /// Serializes the header, version byte first.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0] = FORMAT_VERSION;
        out[1..5].copy_from_slice(&self.dims.to_le_bytes());
        out[5..9].copy_from_slice(&self.data_len.to_le_bytes());
        out[9..13].copy_from_slice(&self.pad_len.to_le_bytes());
        out
    }

    /// Bytes that follow the header: coordinates, payload and padding.
    /// Returns `None` when the declared lengths overflow `usize`.
    pub fn body_len(&self) -> Option<usize> {
        (self.dims as usize)
            .checked_mul(FLOAT64_SIZE)?
            .checked_add(self.data_len as usize)?
            .checked_add(self.pad_len as usize)
    }

    /// Total record length including the header.
    pub fn record_len(&self) -> Option<usize> {
        self.body_len()?.checked_add(HEADER_SIZE)
    }

    /// The dataset-wide maximum payload length this record was padded to.
    /// Returns `None` when `data_len + pad_len` overflows `usize`.
    pub fn max_data_len(&self) -> Option<usize> {
        (self.data_len as usize).checked_add(self.pad_len as usize)
    }
}

//==================================================================================
// IV. Unit Tests
//==================================================================================
