// In: src/config.rs

//! The dataset-wide record layout.
//!
//! A containing index picks `dims` and `max_data_len` once, when a dataset is
//! created, and must use the same values for every record it writes: that is
//! what keeps the stride constant. `PointFormat` captures that choice. It is
//! meant to be created once, persisted next to the dataset as JSON, and shared
//! read-only (typically as an `Arc<PointFormat>`) by everything that encodes
//! or addresses records.

use serde::{Deserialize, Serialize};

use crate::error::{KdPointError, Result};
use crate::format::{self, RecordHeader};
use crate::types::Point;

//==================================================================================
// I. The Dataset Layout
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub struct PointFormat {
    /// Number of coordinates in every point of the dataset.
    dims: usize,

    /// Upper bound on payload length. Shorter payloads are zero-padded up to it.
    #[serde(default)]
    max_data_len: usize,
}

impl PointFormat {
    /// Creates and validates a layout.
    pub fn new(dims: usize, max_data_len: usize) -> Result<Self> {
        let fmt = Self { dims, max_data_len };
        fmt.validate()?;
        Ok(fmt)
    }

    /// Recovers the layout from any single record header.
    /// Returns `None` when the header describes a layout that fails [`validate`](Self::validate).
    pub fn from_header(header: &RecordHeader) -> Option<Self> {
        let fmt = Self {
            dims: header.dims as usize,
            max_data_len: header.max_data_len()?,
        };
        fmt.validate().ok().map(|_| fmt)
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn max_data_len(&self) -> usize {
        self.max_data_len
    }

    /// Checks that every length in this layout can be written into a record.
    pub fn validate(&self) -> Result<()> {
        if u32::try_from(self.dims).is_err() {
            return Err(KdPointError::InvalidConfig(format!(
                "dims ({}) exceeds the 32-bit header field",
                self.dims
            )));
        }
        if u32::try_from(self.max_data_len).is_err() {
            return Err(KdPointError::InvalidConfig(format!(
                "max_data_len ({}) exceeds the 32-bit header field",
                self.max_data_len
            )));
        }
        if format::try_stride(self.dims, self.max_data_len).is_none() {
            return Err(KdPointError::InvalidConfig(format!(
                "stride for dims={} max_data_len={} overflows usize",
                self.dims, self.max_data_len
            )));
        }
        Ok(())
    }

    /// Byte length of every record in the dataset.
    pub fn stride(&self) -> usize {
        format::stride(self.dims, self.max_data_len)
    }

    /// Byte offset of record slot `index`, or `None` on overflow.
    pub fn record_offset(&self, index: u64) -> Option<u64> {
        index.checked_mul(self.stride() as u64)
    }

    /// Checks that a point can be stored in this dataset.
    pub fn check_point(&self, point: &Point<'_>) -> Result<()> {
        if point.dims() != self.dims {
            return Err(KdPointError::DimensionMismatch {
                left: point.dims(),
                right: self.dims,
            });
        }
        if point.data().len() > self.max_data_len {
            return Err(KdPointError::PayloadTooLarge {
                data_len: point.data().len(),
                max_data_len: self.max_data_len,
            });
        }
        Ok(())
    }

    //==============================================================================
    // II. Persistence
    //==============================================================================

    /// Parses and validates a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let fmt: Self = serde_json::from_str(json)?;
        fmt.validate()?;
        Ok(fmt)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

//==================================================================================
// III. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_and_offsets() {
        let fmt = PointFormat::new(2, 4).unwrap();
        assert_eq!(fmt.stride(), 33);
        assert_eq!(fmt.record_offset(0), Some(0));
        assert_eq!(fmt.record_offset(3), Some(99));
        assert_eq!(fmt.record_offset(u64::MAX), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let fmt = PointFormat::new(3, 16).unwrap();
        let json = fmt.to_json().unwrap();
        assert_eq!(json, r#"{"dims":3,"max_data_len":16}"#);
        assert_eq!(PointFormat::from_json(&json).unwrap(), fmt);
    }

    #[test]
    fn test_json_defaults_max_data_len() {
        let fmt = PointFormat::from_json(r#"{"dims":2}"#).unwrap();
        assert_eq!(fmt.max_data_len, 0);
        assert_eq!(fmt.stride(), 13 + 16);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            PointFormat::from_json("{not json"),
            Err(KdPointError::SerdeJson(_))
        ));
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            PointFormat::from_json(r#"{"dims":5000000000,"max_data_len":0}"#),
            Err(KdPointError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_check_point() {
        let fmt = PointFormat::new(2, 2).unwrap();
        assert!(fmt.check_point(&Point::new(vec![1.0, 2.0], vec![1, 2])).is_ok());
        assert!(matches!(
            fmt.check_point(&Point::new(vec![1.0], vec![1])),
            Err(KdPointError::DimensionMismatch { left: 1, right: 2 })
        ));
        assert!(matches!(
            fmt.check_point(&Point::new(vec![1.0, 2.0], vec![1, 2, 3])),
            Err(KdPointError::PayloadTooLarge { data_len: 3, max_data_len: 2 })
        ));
    }

    #[test]
    fn test_from_header() {
        let header = RecordHeader {
            dims: 4,
            data_len: 3,
            pad_len: 5,
        };
        let fmt = PointFormat::from_header(&header);
        assert_eq!(fmt, Some(PointFormat::new(4, 8).unwrap()));
    }

    #[test]
    fn test_from_header_rejects_unrepresentable_layout() {
        // data_len + pad_len no longer fits the 32-bit max_data_len a writer could use.
        let header = RecordHeader {
            dims: 1,
            data_len: u32::MAX,
            pad_len: u32::MAX,
        };
        assert_eq!(PointFormat::from_header(&header), None);
    }

    #[test]
    fn test_deserialized_layout_is_validated_before_use() {
        // Fields are private, so an out-of-range layout can only arrive through
        // `new` or `from_json`, and both reject it before `stride` is reachable.
        assert!(PointFormat::new(usize::MAX / 4, 0).is_err());
        assert!(matches!(
            PointFormat::from_json(&format!(r#"{{"dims":{}}}"#, usize::MAX / 4)),
            Err(KdPointError::InvalidConfig(_))
        ));
        let fmt = PointFormat::new(3, 7).unwrap();
        assert_eq!((fmt.dims(), fmt.max_data_len()), (3, 7));
    }
}
