//! This module contains the pure, stateless kernel for packing coordinate vectors.
//!
//! Coordinates are always stored as little-endian IEEE-754 doubles. On
//! little-endian targets the in-memory representation already matches the
//! on-disk one, so packing is a zero-copy `bytemuck` reinterpretation; on
//! big-endian targets each value is byte-swapped individually.

use std::io::Write;

use crate::error::{KdPointError, Result};
use crate::format::FLOAT64_SIZE;

//==================================================================================
// 1. Encode
//==================================================================================

/// Writes `values` to `writer` as consecutive little-endian doubles.
pub fn write_le<W>(values: &[f64], writer: &mut W) -> std::io::Result<()>
where
    W: Write + ?Sized,
{
    #[cfg(target_endian = "little")]
    {
        writer.write_all(bytemuck::cast_slice::<f64, u8>(values))
    }
    #[cfg(not(target_endian = "little"))]
    {
        for value in values {
            writer.write_all(&value.to_le_bytes())?;
        }
        Ok(())
    }
}

//==================================================================================
// 2. Decode
//==================================================================================

/// Reads consecutive little-endian doubles. `bytes` may be unaligned but its
/// length must be a multiple of eight.
pub fn read_le(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.len() % FLOAT64_SIZE != 0 {
        return Err(KdPointError::TruncatedRecord {
            needed: bytes.len().next_multiple_of(FLOAT64_SIZE),
            available: bytes.len(),
        });
    }

    #[cfg(target_endian = "little")]
    {
        // Copies through an aligned allocation, so the input alignment is irrelevant.
        Ok(bytemuck::pod_collect_to_vec::<u8, f64>(bytes))
    }
    #[cfg(not(target_endian = "little"))]
    {
        Ok(bytes
            .chunks_exact(FLOAT64_SIZE)
            .map(|chunk| {
                let mut raw = [0u8; FLOAT64_SIZE];
                raw.copy_from_slice(chunk);
                f64::from_le_bytes(raw)
            })
            .collect())
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
