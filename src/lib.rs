//! This file is the root of the `kdpoint` Rust crate: a fixed-stride binary codec
//! for the points of a disk-resident k-d tree.
//!
//! Every point carries a coordinate vector of fixed dimensionality and an opaque
//! payload bounded by a dataset-wide maximum. Encoding pads the payload up to
//! that maximum, so every record of a dataset has the same length and a
//! containing index can address record `i` at byte offset `i * stride`.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library.
//! 2.  Re-exporting the small public surface an index needs: `Point`, the four
//!     record operations, `stride`, and the error type.
//!
//! ```
//! use kdpoint::{decode_from_buffer, encode, stride, Point};
//!
//! let point = Point::new(vec![1.0, 2.0], vec![0xAA, 0xBB]);
//! let mut bytes = Vec::new();
//! encode(&point, 4, &mut bytes).unwrap();
//! assert_eq!(bytes.len(), stride(2, 4));
//!
//! let (decoded, rest) = decode_from_buffer(&bytes).unwrap();
//! assert_eq!(decoded, point);
//! assert!(rest.is_empty());
//! ```

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod format;
pub mod kernels;
pub mod types;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use bridge::{analyze_record, encode_record, PointCodec, RecordStats};
pub use config::PointFormat;
pub use error::{KdPointError, Result};
pub use format::{stride, try_stride, RecordHeader, FORMAT_VERSION, HEADER_SIZE};
pub use kernels::{
    decode_from_buffer, decode_from_stream, decode_header, encode, encode_into, RecordIter,
    StreamRecords,
};
pub use observability::enable_verbose_logging;
pub use types::Point;
