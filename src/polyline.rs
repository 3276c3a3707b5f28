//! Encoded-polyline decoding for route geometries.
//!
//! Activity routes arrive from the feed as compact encoded-polyline strings
//! (delta + zig-zag + base-32 varint). This module decodes them into
//! coordinate sequences and provides the inverse encoding used by tests and
//! by anything that needs to hand a route back in wire form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A (longitude, latitude) pair in floating-point degrees.
pub type LngLat = (f64, f64);

/// Standard precision of feed polylines (fixed-point scale `10^5`).
pub const DEFAULT_PRECISION: u32 = 5;

/// Lowest character code used by the encoding (`?`).
const CHAR_OFFSET: u8 = 63;

/// Highest character code a well-formed polyline can contain.
const CHAR_MAX: u8 = 126;

/// Bit set on every chunk except the last one of a value.
const CONTINUATION_BIT: u64 = 0x20;

/// Decoding failure for a malformed encoded polyline.
///
/// Well-formed input never produces these; the reference decoder reads past
/// the end of the string on truncated input and emits garbage coordinates,
/// this one refuses instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The string ended in the middle of a varint value.
    #[error("encoded polyline ends mid-value")]
    Truncated,
    /// A character outside the encodable range (`?`..=`~`).
    #[error("invalid polyline character 0x{byte:02x} at byte {position}")]
    InvalidCharacter { position: usize, byte: u8 },
    /// A single value ran over the accumulator width.
    #[error("polyline value overflows at byte {position}")]
    Overflow { position: usize },
}

/// A route geometry as a decoded coordinate sequence.
///
/// Stores (longitude, latitude) points in path-traversal order, which is the
/// order the map renderer consumes. An empty polyline is valid and stands for
/// absent route data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<LngLat>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (longitude, latitude) pair.
    pub fn new(points: Vec<LngLat>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[LngLat] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<LngLat> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Decode an encoded polyline at the standard feed precision.
pub fn decode5(encoded: &str) -> Result<Polyline, PolylineError> {
    decode(encoded, DEFAULT_PRECISION)
}

/// Decode an encoded polyline string into a coordinate sequence.
///
/// `precision` selects the fixed-point scale factor `10^precision`. The empty
/// string decodes to an empty polyline. Values are delta-encoded, so each
/// decoded pair is accumulated onto the previous one; output points are in
/// (longitude, latitude) order even though the wire format stores latitude
/// first.
pub fn decode(encoded: &str, precision: u32) -> Result<Polyline, PolylineError> {
    let bytes = encoded.as_bytes();
    let factor = 10f64.powi(precision as i32);

    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let (lat_delta, next) = decode_value(bytes, index)?;
        let (lng_delta, next) = decode_value(bytes, next)?;
        index = next;

        lat += lat_delta;
        lng += lng_delta;

        points.push((lng as f64 / factor, lat as f64 / factor));
    }

    Ok(Polyline::new(points))
}

/// Decode one signed varint starting at `index`, returning the value and the
/// index of the first byte after it.
fn decode_value(bytes: &[u8], mut index: usize) -> Result<(i64, usize), PolylineError> {
    let mut shift = 0u32;
    let mut result = 0u64;

    loop {
        let byte = *bytes.get(index).ok_or(PolylineError::Truncated)?;
        if !(CHAR_OFFSET..=CHAR_MAX).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                position: index,
                byte,
            });
        }
        if shift >= u64::BITS {
            return Err(PolylineError::Overflow { position: index });
        }

        let chunk = u64::from(byte - CHAR_OFFSET);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        index += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    // Zig-zag: lowest bit carries the sign.
    let value = if result & 1 != 0 {
        !(result >> 1) as i64
    } else {
        (result >> 1) as i64
    };

    Ok((value, index))
}

/// Encode a coordinate sequence as an encoded polyline string.
///
/// Exact inverse of [`decode`] for coordinates representable at the given
/// precision. Points are (longitude, latitude); the wire format stores the
/// latitude delta of each pair first.
pub fn encode(points: &[LngLat], precision: u32) -> String {
    let factor = 10f64.powi(precision as i32);

    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for &(lng, lat) in points {
        let lat_fixed = (lat * factor).round() as i64;
        let lng_fixed = (lng * factor).round() as i64;

        encode_value(lat_fixed - prev_lat, &mut out);
        encode_value(lng_fixed - prev_lng, &mut out);

        prev_lat = lat_fixed;
        prev_lng = lng_fixed;
    }

    out
}

fn encode_value(value: i64, out: &mut String) {
    let mut rest = if value < 0 {
        !((value as u64) << 1)
    } else {
        (value as u64) << 1
    };

    while rest >= CONTINUATION_BIT {
        out.push((((rest & 0x1f) | CONTINUATION_BIT) as u8 + CHAR_OFFSET) as char);
        rest >>= 5;
    }
    out.push((rest as u8 + CHAR_OFFSET) as char);
}
