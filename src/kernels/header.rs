//! Parsing of the fixed 13-byte record header.
//!
//! The header decoder only validates the version byte and that the 13 header
//! bytes exist. It does not check the declared lengths against the rest of the
//! buffer; callers must bounds-check before slicing the body.

use crate::error::{KdPointError, Result};
use crate::format::{RecordHeader, FORMAT_VERSION, HEADER_SIZE, UINT32_SIZE};

/// Parses the leading header of `buf` and returns it with the bytes after it.
pub fn decode_header(buf: &[u8]) -> Result<(RecordHeader, &[u8])> {
    // Version is checked before length: a short buffer of foreign data
    // reports UnsupportedVersion, not TruncatedRecord.
    if let Some(&version) = buf.first() {
        if version != FORMAT_VERSION {
            log::debug!("rejecting record with serialization version {}", version);
            return Err(KdPointError::UnsupportedVersion(version));
        }
    }
    if buf.len() < HEADER_SIZE {
        return Err(KdPointError::TruncatedRecord {
            needed: HEADER_SIZE,
            available: buf.len(),
        });
    }

    let (fields, rest) = buf[1..].split_at(3 * UINT32_SIZE);
    let header = RecordHeader {
        dims: read_u32_le(&fields[0..4]),
        data_len: read_u32_le(&fields[4..8]),
        pad_len: read_u32_le(&fields[8..12]),
    };
    Ok((header, rest))
}

fn read_u32_le(bytes: &[u8]) -> u32 {
    let mut raw = [0u8; UINT32_SIZE];
    raw.copy_from_slice(bytes);
    u32::from_le_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_header_fields_and_remainder() {
        let mut buf = vec![0u8, 2, 0, 0, 0, 3, 0, 0, 0, 1, 1, 0, 0];
        buf.extend_from_slice(b"tail");

        let (header, rest) = decode_header(&buf).unwrap();
        assert_eq!(
            header,
            RecordHeader {
                dims: 2,
                data_len: 3,
                pad_len: 257,
            }
        );
        assert_eq!(rest, b"tail");
    }

    #[test]
    fn test_decode_header_rejects_unknown_version() {
        let mut buf = RecordHeader {
            dims: 1,
            data_len: 0,
            pad_len: 0,
        }
        .to_bytes();
        buf[0] = 1;
        assert!(matches!(
            decode_header(&buf),
            Err(KdPointError::UnsupportedVersion(1))
        ));
    }

    #[test]
    fn test_decode_header_short_buffers() {
        assert!(matches!(
            decode_header(&[]),
            Err(KdPointError::TruncatedRecord { needed: 13, available: 0 })
        ));
        assert!(matches!(
            decode_header(&[0, 1, 0, 0]),
            Err(KdPointError::TruncatedRecord { needed: 13, available: 4 })
        ));
        assert!(matches!(
            decode_header(&[9, 1, 0, 0]),
            Err(KdPointError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_decode_header_does_not_check_body() {
        // Lengths far beyond the buffer are still returned; the body check is the caller's.
        let buf = RecordHeader {
            dims: u32::MAX,
            data_len: u32::MAX,
            pad_len: u32::MAX,
        }
        .to_bytes();
        let (header, rest) = decode_header(&buf).unwrap();
        assert_eq!(header.dims, u32::MAX);
        assert!(rest.is_empty());
    }
}
