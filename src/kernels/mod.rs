//! This module serves as the public API for the pure, stateless record kernels.
//!
//! Each sub-module covers one stage of the record pipeline. The encoder is the
//! only producer of bytes; the header, buffer, and stream decoders are alternate
//! consumers depending on whether the caller already holds the bytes in memory.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Little-endian coordinate packing.
pub mod float64;

/// Fixed 13-byte header parsing.
pub mod header;

/// Record encoder and in-memory decoder.
pub mod record;

/// Decoder for byte-oriented input sources.
pub mod stream;

#[cfg(test)]
mod proptest_tests;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
// Unlike lower-level helpers, the four record operations are re-exported so that
// callers can reach them as `kernels::encode(...)` etc.
pub use header::decode_header;
pub use record::{decode_from_buffer, encode, encode_into, RecordIter};
pub use stream::{decode_from_stream, StreamRecords};
