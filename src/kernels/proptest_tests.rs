//! Property-based tests for the record kernels.

#![allow(clippy::float_cmp)]

use proptest::prelude::*;
use std::io::Cursor;

use crate::error::KdPointError;
use crate::format::{self, HEADER_SIZE};
use crate::kernels::{decode_from_buffer, decode_from_stream, encode, RecordIter};
use crate::types::Point;

/// Strategy for a point together with a `max_data_len` that fits its payload.
fn arb_point_and_max() -> impl Strategy<Value = (Point<'static>, usize)> {
    (
        prop::collection::vec(any::<f64>(), 0..12),
        prop::collection::vec(any::<u8>(), 0..64),
        0usize..32,
    )
        .prop_map(|(pos, data, slack)| {
            let max = data.len() + slack;
            (Point::new(pos, data), max)
        })
}

/// Strategy for several points sharing one dimensionality.
fn arb_dataset() -> impl Strategy<Value = (Vec<Point<'static>>, usize)> {
    (1usize..6, 0usize..16).prop_flat_map(|(dims, max)| {
        let point = (
            prop::collection::vec(any::<f64>(), dims),
            prop::collection::vec(any::<u8>(), 0..=max),
        )
            .prop_map(|(pos, data)| Point::new(pos, data));
        (prop::collection::vec(point, 0..10), Just(max))
    })
}

fn encoded(point: &Point<'_>, max: usize) -> Vec<u8> {
    let mut out = Vec::new();
    encode(point, max, &mut out).unwrap();
    out
}

proptest! {
    #[test]
    fn prop_roundtrip((point, max) in arb_point_and_max()) {
        let bytes = encoded(&point, max);

        let (decoded, rest) = decode_from_buffer(&bytes).unwrap();
        prop_assert_eq!(&decoded, &point);
        prop_assert!(rest.is_empty());

        let (streamed, observed) = decode_from_stream(&mut Cursor::new(&bytes)).unwrap();
        prop_assert_eq!(&streamed, &point);
        prop_assert_eq!(observed, max);
    }

    #[test]
    fn prop_constant_stride((point, max) in arb_point_and_max()) {
        let bytes = encoded(&point, max);
        prop_assert_eq!(bytes.len(), HEADER_SIZE + point.dims() * 8 + max);
        prop_assert_eq!(bytes.len(), format::stride(point.dims(), max));
    }

    #[test]
    fn prop_version_guard(
        (point, max) in arb_point_and_max(),
        version in 1u8..=255,
    ) {
        let mut bytes = encoded(&point, max);
        bytes[0] = version;
        prop_assert!(matches!(
            decode_from_buffer(&bytes),
            Err(KdPointError::UnsupportedVersion(v)) if v == version
        ));
    }

    #[test]
    fn prop_overflow_guard(
        pos in prop::collection::vec(any::<f64>(), 0..4),
        max in 0usize..32,
        extra in 1usize..16,
    ) {
        let point = Point::new(pos, vec![0u8; max + extra]);
        let mut out = Vec::new();
        let is_too_large = matches!(
            encode(&point, max, &mut out),
            Err(KdPointError::PayloadTooLarge { .. })
        );
        prop_assert!(is_too_large);
        prop_assert!(out.is_empty());
    }

    #[test]
    fn prop_truncation_guard(
        (point, max) in arb_point_and_max(),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = encoded(&point, max);
        let len = cut.index(bytes.len());
        let result = decode_from_buffer(&bytes[..len]);
        prop_assert!(
            matches!(result, Err(KdPointError::TruncatedRecord { .. })),
            "prefix of {} / {} bytes decoded: {:?}", len, bytes.len(), result
        );

        let streamed = decode_from_stream(&mut Cursor::new(&bytes[..len]));
        let is_expected = if len == 0 {
            matches!(streamed, Err(KdPointError::CleanEndOfInput))
        } else {
            matches!(streamed, Err(KdPointError::TruncatedRecord { .. }))
        };
        prop_assert!(is_expected, "stream prefix of {} bytes: {:?}", len, streamed);
    }

    #[test]
    fn prop_distance_properties(
        (a, b) in (1usize..8).prop_flat_map(|dims| (
            prop::collection::vec(-1e6f64..1e6, dims),
            prop::collection::vec(-1e6f64..1e6, dims),
        )),
    ) {
        let a = Point::new(a, Vec::<u8>::new());
        let b = Point::new(b, Vec::<u8>::new());
        prop_assert_eq!(a.distance_squared(&a).unwrap(), 0.0);
        prop_assert_eq!(a.distance_squared(&b).unwrap(), b.distance_squared(&a).unwrap());
        prop_assert!(a.distance_squared(&b).unwrap() >= 0.0);
    }

    #[test]
    fn prop_sequential_decode((points, max) in arb_dataset()) {
        let mut bytes = Vec::new();
        for p in &points {
            encode(p, max, &mut bytes).unwrap();
        }

        let decoded: Vec<Point<'_>> = RecordIter::new(&bytes)
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(decoded, points);
    }
}
