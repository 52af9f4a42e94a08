//! Encoded polyline codec for route geometries.
//!
//! Providers may return geometries in the compact signed-delta format
//! popularized by Google's routing APIs. Decoding happens at the adapter
//! boundary; the rest of the engine only ever sees `GeoPoint` sequences.

use crate::error::PolylineError;
use crate::geo::GeoPoint;

/// Scale factor for five decimal places (OSRM `polyline`, Google).
pub const PRECISION_5: f64 = 1e5;

const MAX_SHIFT: u32 = 30;

/// Decodes an encoded polyline into (lat, lng) points.
///
/// Coordinates accumulate as integers and are scaled once per point, so the
/// output matches reference decoders bit for bit.
pub fn decode(encoded: &str, precision: f64) -> Result<Vec<GeoPoint>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        lat = accumulate(lat, bytes, &mut index)?;
        lng = accumulate(lng, bytes, &mut index)?;
        points.push(GeoPoint::new(lat as f64 / precision, lng as f64 / precision));
    }

    Ok(points)
}

fn accumulate(current: i64, bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let delta = next_value(bytes, index)?;
    current
        .checked_add(delta)
        .ok_or(PolylineError::Overflow { index: start })
}

/// Reads one zig-zag value. Values are 32-bit, so at most seven groups.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated);
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                index: *index,
                ch: byte as char,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { index: start });
        }
        *index += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    // zig-zag
    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}

/// Encodes points into the polyline format at the given precision.
pub fn encode(points: &[GeoPoint], precision: f64) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.lat * precision).round() as i64;
        let lng = (point.lng * precision).round() as i64;
        push_value(&mut out, lat - prev_lat);
        push_value(&mut out, lng - prev_lng);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn push_value(out: &mut String, delta: i64) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= 0x20 {
        out.push(char::from((0x20 | (value & 0x1f)) as u8 + 63));
        value >>= 5;
    }
    out.push(char::from(value as u8 + 63));
}
