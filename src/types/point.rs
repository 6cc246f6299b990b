//! The `Point` value: a fixed-dimension coordinate vector plus an opaque payload.
//!
//! A point does not know its dataset's maximum payload length; that is supplied
//! at encode time. Fields are private so a constructed or decoded point is never
//! mutated in place.

use std::borrow::Cow;

use crate::error::{KdPointError, Result};

/// A spatial point with an opaque, variable-length payload.
///
/// `data` is a `Cow` so that buffer decoding can hand back a zero-copy view of
/// the caller's bytes. A point borrowed this way keeps the source buffer
/// immutably borrowed for `'a`; call [`Point::into_owned`] to detach it.
#[derive(Debug, Clone)]
pub struct Point<'a> {
    pos: Vec<f64>,
    data: Cow<'a, [u8]>,
}

impl<'a> Point<'a> {
    pub fn new(pos: Vec<f64>, data: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            pos,
            data: data.into(),
        }
    }

    /// The coordinate vector. Its length is the point's dimensionality.
    pub fn pos(&self) -> &[f64] {
        &self.pos
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn dims(&self) -> usize {
        self.pos.len()
    }

    /// True if the payload is a view into a decode buffer rather than owned.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.data, Cow::Borrowed(_))
    }

    /// Copies a borrowed payload so the point no longer ties up its source buffer.
    pub fn into_owned(self) -> Point<'static> {
        Point {
            pos: self.pos,
            data: Cow::Owned(self.data.into_owned()),
        }
    }

    pub fn into_parts(self) -> (Vec<f64>, Cow<'a, [u8]>) {
        (self.pos, self.data)
    }

    /// Exact equality: same dimensionality, same payload bytes, and every
    /// coordinate pair identical bit for bit. No epsilon is applied, so `0.0`
    /// and `-0.0` differ while two NaNs with the same bit pattern are equal.
    pub fn bitwise_eq(&self, other: &Point<'_>) -> bool {
        self.pos.len() == other.pos.len()
            && self.data.len() == other.data.len()
            && self
                .pos
                .iter()
                .zip(&other.pos)
                .all(|(a, b)| a.to_bits() == b.to_bits())
            && self.data[..] == other.data[..]
    }

    /// Squared Euclidean distance between two points of the same dimensionality.
    ///
    /// Mismatched dimensionality is a caller bug and is reported as
    /// [`KdPointError::DimensionMismatch`] rather than truncating to the shorter vector.
    pub fn distance_squared(&self, other: &Point<'_>) -> Result<f64> {
        if self.pos.len() != other.pos.len() {
            return Err(KdPointError::DimensionMismatch {
                left: self.pos.len(),
                right: other.pos.len(),
            });
        }
        Ok(self
            .pos
            .iter()
            .zip(&other.pos)
            .map(|(a, b)| {
                let delta = a - b;
                delta * delta
            })
            .sum())
    }
}

impl PartialEq<Point<'_>> for Point<'_> {
    fn eq(&self, other: &Point<'_>) -> bool {
        self.bitwise_eq(other)
    }
}

// Bitwise comparison is reflexive, including for NaN coordinates.
impl Eq for Point<'_> {}
