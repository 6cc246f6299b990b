// In: src/bridge/codec.rs

//! The stateful facade: a codec bound to one dataset's `PointFormat`.
//!
//! Where the stateless kernels take `max_data_len` on every call, a
//! `PointCodec` carries the dataset layout and enforces it in both directions.
//! It also provides the fixed-stride slot addressing a containing index uses
//! for random access into a buffer of records.

use std::io::{Read, Write};
use std::sync::Arc;

use crate::config::PointFormat;
use crate::error::{KdPointError, Result};
use crate::kernels::{self, decode_header};
use crate::types::Point;

#[derive(Debug, Clone)]
pub struct PointCodec {
    format: Arc<PointFormat>,
}

impl PointCodec {
    /// Validates the layout and builds a codec around it.
    pub fn new(format: PointFormat) -> Result<Self> {
        format.validate()?;
        Ok(Self {
            format: Arc::new(format),
        })
    }

    /// Builds a codec around a layout that is already shared elsewhere.
    pub fn with_shared(format: Arc<PointFormat>) -> Result<Self> {
        format.validate()?;
        Ok(Self { format })
    }

    pub fn format(&self) -> &PointFormat {
        &self.format
    }

    pub fn stride(&self) -> usize {
        self.format.stride()
    }

    //==============================================================================
    // Encode
    //==============================================================================

    /// Writes one record, after checking the point against the dataset layout.
    pub fn encode<W: Write + ?Sized>(&self, point: &Point<'_>, writer: &mut W) -> Result<()> {
        self.format.check_point(point)?;
        kernels::encode(point, self.format.max_data_len(), writer)
    }

    /// Appends one record to `out`; `out` is unchanged on error.
    pub fn encode_into(&self, point: &Point<'_>, out: &mut Vec<u8>) -> Result<()> {
        self.format.check_point(point)?;
        kernels::encode_into(point, self.format.max_data_len(), out)
    }

    /// Overwrites slot `index` of a fixed-stride buffer in place.
    /// The buffer must already contain that slot.
    pub fn encode_slot(&self, point: &Point<'_>, buf: &mut [u8], index: usize) -> Result<()> {
        self.format.check_point(point)?;
        let range = self.slot_range(buf.len(), index)?;
        let mut slot = &mut buf[range];
        kernels::encode(point, self.format.max_data_len(), &mut slot)?;
        debug_assert!(slot.is_empty());
        Ok(())
    }

    //==============================================================================
    // Decode
    //==============================================================================

    /// Decodes the record at the start of `buf`, which must match this layout.
    pub fn decode<'a>(&self, buf: &'a [u8]) -> Result<(Point<'a>, &'a [u8])> {
        let (header, _) = decode_header(buf)?;
        // Bounds-check the whole record before trusting any of its lengths.
        let decoded = kernels::decode_from_buffer(buf)?;
        match PointFormat::from_header(&header) {
            Some(found) => self.check_layout(found.dims(), found.max_data_len())?,
            None => {
                return Err(KdPointError::InvalidConfig(format!(
                    "record header {:?} describes no valid dataset layout",
                    header
                )));
            }
        }
        Ok(decoded)
    }

    /// Reads one record from `reader`, which must match this layout.
    pub fn decode_from_stream<R: Read + ?Sized>(&self, reader: &mut R) -> Result<Point<'static>> {
        let (point, max_data_len) = kernels::decode_from_stream(reader)?;
        self.check_layout(point.dims(), max_data_len)?;
        Ok(point)
    }

    /// Decodes slot `index` of a fixed-stride buffer in O(1).
    pub fn decode_slot<'a>(&self, buf: &'a [u8], index: usize) -> Result<Point<'a>> {
        let range = self.slot_range(buf.len(), index)?;
        let (point, _) = self.decode(&buf[range])?;
        Ok(point)
    }

    /// Number of complete slots in a buffer of `len` bytes.
    pub fn slot_count(&self, len: usize) -> usize {
        len / self.stride()
    }

    //==============================================================================
    // Helpers
    //==============================================================================

    fn slot_range(&self, len: usize, index: usize) -> Result<std::ops::Range<usize>> {
        let stride = self.stride();
        let start = index.checked_mul(stride);
        match start.and_then(|s| s.checked_add(stride).map(|e| s..e)) {
            Some(range) if range.end <= len => Ok(range),
            other => Err(KdPointError::TruncatedRecord {
                needed: other.map_or(usize::MAX, |r| r.end),
                available: len,
            }),
        }
    }

    fn check_layout(&self, dims: usize, max_data_len: usize) -> Result<()> {
        if dims != self.format.dims() {
            return Err(KdPointError::DimensionMismatch {
                left: dims,
                right: self.format.dims(),
            });
        }
        if max_data_len != self.format.max_data_len() {
            log::debug!(
                "record padded to {} bytes, dataset expects {}",
                max_data_len,
                self.format.max_data_len()
            );
            return Err(KdPointError::InvalidConfig(format!(
                "record max_data_len {} does not match dataset max_data_len {}",
                max_data_len,
                self.format.max_data_len()
            )));
        }
        Ok(())
    }
}
