//! This module contains the record encoder and the in-memory record decoder.
//!
//! Every record for a given `(dims, max_data_len)` pair has the same length,
//! `format::stride(dims, max_data_len)`, because the payload is followed by
//! `max_data_len - data_len` zero bytes. The padding length is also written
//! into the header, so records can be decoded back to back without knowing
//! `max_data_len` out of band.

use std::io::{self, Read, Write};

use crate::error::{KdPointError, Result};
use crate::format::{self, RecordHeader, FLOAT64_SIZE, HEADER_SIZE};
use crate::kernels::{float64, header::decode_header};
use crate::types::Point;

//==================================================================================
// 1. Encoder
//==================================================================================

/// Validates `point` against `max_data_len` and builds its header.
/// Nothing is written if this fails.
fn plan_record(point: &Point<'_>, max_data_len: usize) -> Result<RecordHeader> {
    let data_len = point.data().len();
    if data_len > max_data_len {
        log::debug!(
            "refusing to encode: data length {} exceeds max data length {}",
            data_len,
            max_data_len
        );
        return Err(KdPointError::PayloadTooLarge {
            data_len,
            max_data_len,
        });
    }
    Ok(RecordHeader {
        dims: format::header_field("dims", point.dims())?,
        data_len: format::header_field("payload", data_len)?,
        pad_len: format::header_field("padding", max_data_len - data_len)?,
    })
}

/// Writes one fixed-stride record for `point` to `writer`.
///
/// Exactly `format::stride(point.dims(), max_data_len)` bytes are written on
/// success. Length checks happen before the first byte is written. A failing
/// writer, however, can leave a partial record behind: callers that need an
/// all-or-nothing write should use [`encode_into`] on a scratch buffer and
/// write that buffer themselves.
pub fn encode<W>(point: &Point<'_>, max_data_len: usize, writer: &mut W) -> Result<()>
where
    W: Write + ?Sized,
{
    let header = plan_record(point, max_data_len)?;

    writer.write_all(&header.to_bytes())?;
    float64::write_le(point.pos(), writer)?;
    writer.write_all(point.data())?;
    io::copy(&mut io::repeat(0).take(u64::from(header.pad_len)), writer)?;

    log_metric!(
        "event" = "encode",
        "dims" = header.dims,
        "data_len" = header.data_len,
        "pad_len" = header.pad_len
    );
    Ok(())
}

/// Appends one complete record to `out`. On error `out` is left unchanged.
pub fn encode_into(point: &Point<'_>, max_data_len: usize, out: &mut Vec<u8>) -> Result<()> {
    plan_record(point, max_data_len)?;
    let start = out.len();
    out.reserve(format::stride(point.dims(), max_data_len));
    if let Err(err) = encode(point, max_data_len, out) {
        out.truncate(start);
        return Err(err);
    }
    Ok(())
}

//==================================================================================
// 2. Buffer Decoder
//==================================================================================

/// Decodes the record at the start of `buf` and returns the bytes after it.
///
/// The returned point's payload borrows from `buf` (no copy is made). Every
/// length declared by the header is checked against the buffer before it is
/// used, so a corrupt or truncated record yields
/// [`KdPointError::TruncatedRecord`] rather than an out-of-bounds slice.
/// Padding bytes are skipped without being inspected.
pub fn decode_from_buffer(buf: &[u8]) -> Result<(Point<'_>, &[u8])> {
    let (header, body) = decode_header(buf)?;

    let body_len = match header.body_len() {
        Some(len) if len <= body.len() => len,
        declared => {
            let needed = declared
                .and_then(|len| len.checked_add(HEADER_SIZE))
                .unwrap_or(usize::MAX);
            log::debug!(
                "truncated record: header declares {} bytes, buffer holds {}",
                needed,
                buf.len()
            );
            return Err(KdPointError::TruncatedRecord {
                needed,
                available: buf.len(),
            });
        }
    };

    let (record_body, remainder) = body.split_at(body_len);
    let (coords, rest) = record_body.split_at(header.dims as usize * FLOAT64_SIZE);
    let pos = float64::read_le(coords)?;
    let data = &rest[..header.data_len as usize];

    log_metric!(
        "event" = "decode",
        "dims" = header.dims,
        "data_len" = header.data_len,
        "pad_len" = header.pad_len
    );
    Ok((Point::new(pos, data), remainder))
}

//==================================================================================
// 3. Sequential Iteration
//==================================================================================

/// Iterates over back-to-back records in a buffer.
///
/// Iteration ends when the buffer is exhausted. After the first error the
/// iterator is fused and yields nothing more; [`RecordIter::remainder`] then
/// points at the record that failed.
#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> RecordIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            remaining: buf,
            failed: false,
        }
    }

    /// The bytes not yet consumed.
    pub fn remainder(&self) -> &'a [u8] {
        self.remaining
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = Result<Point<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }
        match decode_from_buffer(self.remaining) {
            Ok((point, rest)) => {
                self.remaining = rest;
                Some(Ok(point))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for RecordIter<'_> {}

//==================================================================================
// 4. Unit Tests
//==================================================================================
