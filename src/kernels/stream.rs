//! Decoding records directly from a byte-oriented input source.
//!
//! The caller does not need to know a record's length in advance: the 13-byte
//! header is read first, the body length is derived from it, and the whole
//! record is then handed to the buffer decoder.

use std::io::{self, Read};

use crate::error::{KdPointError, Result};
use crate::format::HEADER_SIZE;
use crate::kernels::header::decode_header;
use crate::kernels::record::decode_from_buffer;
use crate::types::Point;

/// Upper bound on the up-front allocation for a record body. Larger bodies
/// grow the buffer as bytes actually arrive, so a corrupt header cannot force
/// a huge allocation.
const MAX_PREALLOC: usize = 1 << 20;

/// Reads one record from `reader`.
///
/// Returns the decoded point (owning its payload) together with the maximum
/// payload length the record was padded to, which equals the dataset's
/// configured `max_data_len`.
///
/// If the reader is exhausted before the first header byte this fails with
/// [`KdPointError::CleanEndOfInput`]; if it ends anywhere later in the record
/// it fails with [`KdPointError::TruncatedRecord`].
pub fn decode_from_stream<R>(reader: &mut R) -> Result<(Point<'static>, usize)>
where
    R: Read + ?Sized,
{
    let mut header_bytes = [0u8; HEADER_SIZE];
    match read_full(reader, &mut header_bytes)? {
        0 => return Err(KdPointError::CleanEndOfInput),
        n if n < HEADER_SIZE => {
            log::debug!("stream ended {} bytes into a record header", n);
            return Err(KdPointError::TruncatedRecord {
                needed: HEADER_SIZE,
                available: n,
            });
        }
        _ => {}
    }
    let (header, _) = decode_header(&header_bytes)?;

    let (Some(record_len), Some(max_data_len)) = (header.record_len(), header.max_data_len())
    else {
        return Err(KdPointError::TruncatedRecord {
            needed: usize::MAX,
            available: HEADER_SIZE,
        });
    };
    let body_len = record_len - HEADER_SIZE;

    let mut record = Vec::with_capacity(HEADER_SIZE + body_len.min(MAX_PREALLOC));
    record.extend_from_slice(&header_bytes);
    (&mut *reader).take(body_len as u64).read_to_end(&mut record)?;
    if record.len() < record_len {
        log::debug!(
            "stream ended mid-record: needed {} bytes, got {}",
            record_len,
            record.len()
        );
        return Err(KdPointError::TruncatedRecord {
            needed: record_len,
            available: record.len(),
        });
    }

    let (point, _) = decode_from_buffer(&record)?;
    Ok((point.into_owned(), max_data_len))
}

/// Fills `buf` as far as the reader allows, retrying on `Interrupted`.
/// Returns the number of bytes read; fewer than `buf.len()` means end of input.
fn read_full<R>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize>
where
    R: Read + ?Sized,
{
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

//==================================================================================
// Sequential Iteration
//==================================================================================

/// Iterates over the records of a reader until it is cleanly exhausted.
///
/// A stream ending exactly on a record boundary ends the iteration; any other
/// error is yielded once, after which the iterator is fused.
#[derive(Debug)]
pub struct StreamRecords<R> {
    reader: R,
    max_data_len: Option<usize>,
    done: bool,
}

impl<R: Read> StreamRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            max_data_len: None,
            done: false,
        }
    }

    /// The `max_data_len` observed in the first record read, if any.
    pub fn observed_max_data_len(&self) -> Option<usize> {
        self.max_data_len
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for StreamRecords<R> {
    type Item = Result<Point<'static>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match decode_from_stream(&mut self.reader) {
            Ok((point, max_data_len)) => {
                match self.max_data_len {
                    None => self.max_data_len = Some(max_data_len),
                    Some(seen) if seen != max_data_len => log::warn!(
                        "record padded to {} bytes in a stream padded to {}; stride is not constant",
                        max_data_len,
                        seen
                    ),
                    Some(_) => {}
                }
                Some(Ok(point))
            }
            Err(KdPointError::CleanEndOfInput) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for StreamRecords<R> {}

//==================================================================================
// Unit Tests
//==================================================================================
