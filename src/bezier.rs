//! Cubic Bezier evaluation over lat/lng control points.

use crate::geo::GeoPoint;

/// Evaluates a cubic Bezier curve at `t` using the Bernstein basis.
///
/// `t = 0` returns `p0` and `t = 1` returns `p3` exactly.
pub fn bezier_point(t: f64, p0: GeoPoint, p1: GeoPoint, p2: GeoPoint, p3: GeoPoint) -> GeoPoint {
    let mt = 1.0 - t;
    let b0 = mt * mt * mt;
    let b1 = 3.0 * mt * mt * t;
    let b2 = 3.0 * mt * t * t;
    let b3 = t * t * t;

    GeoPoint::new(
        b0 * p0.lat + b1 * p1.lat + b2 * p2.lat + b3 * p3.lat,
        b0 * p0.lng + b1 * p1.lng + b2 * p2.lng + b3 * p3.lng,
    )
}

/// Samples `samples` points at `t = i / samples` for `i` in `0..samples`.
///
/// The end point is left out so consecutive segments can be chained
/// without duplicating their shared vertex.
pub fn sample_segment(
    p0: GeoPoint,
    p1: GeoPoint,
    p2: GeoPoint,
    p3: GeoPoint,
    samples: usize,
) -> Vec<GeoPoint> {
    (0..samples)
        .map(|i| bezier_point(i as f64 / samples as f64, p0, p1, p2, p3))
        .collect()
}
