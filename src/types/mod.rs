//! This module defines the core, strongly-typed data representations used
//! throughout the kdpoint codec.
//!
//! It currently holds the `Point` value that every kernel encodes or decodes.

pub mod point;

// Re-export the main type(s) for easier access.
pub use point::Point;
