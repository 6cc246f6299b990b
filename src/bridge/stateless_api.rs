// In: src/bridge/stateless_api.rs

use crate::error::{KdPointError, Result};
use crate::format::{FLOAT64_SIZE, HEADER_SIZE};
use crate::kernels::{self, decode_header};
use crate::types::Point;

/// Size breakdown of one serialized record, returned by [`analyze_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordStats {
    pub dims: usize,
    pub header_size: usize,
    pub coords_size: usize,
    pub data_size: usize,
    pub padding_size: usize,
    pub total_size: usize,
    /// The dataset maximum the record was padded to (`data_size + padding_size`).
    pub max_data_len: usize,
}

/// Encodes a single point into a freshly allocated, complete record.
///
/// Since the record is built in memory first, the caller can write it out in
/// one call and never leave a partial record behind.
pub fn encode_record(point: &Point<'_>, max_data_len: usize) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    kernels::encode_into(point, max_data_len, &mut out)?;
    Ok(out)
}

/// Decodes every record in a buffer of back-to-back records into owned points.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<Point<'static>>> {
    kernels::RecordIter::new(bytes)
        .map(|point| point.map(Point::into_owned))
        .collect()
}

/// Analyzes the record at the start of `bytes` without decoding its coordinates.
/// The whole record must be present.
pub fn analyze_record(bytes: &[u8]) -> Result<RecordStats> {
    let (header, _) = decode_header(bytes)?;
    let truncated = KdPointError::TruncatedRecord {
        needed: header.record_len().unwrap_or(usize::MAX),
        available: bytes.len(),
    };
    let (Some(total_size), Some(max_data_len)) = (
        header.record_len().filter(|&len| len <= bytes.len()),
        header.max_data_len(),
    ) else {
        return Err(truncated);
    };

    let dims = header.dims as usize;
    Ok(RecordStats {
        dims,
        header_size: HEADER_SIZE,
        coords_size: dims * FLOAT64_SIZE,
        data_size: header.data_len as usize,
        padding_size: header.pad_len as usize,
        total_size,
        max_data_len,
    })
}
