use nalgebra::Point3;

/// Absolute per-component tolerance used when testing whether two points
/// occupy the same position.
pub const OVERLAP_TOLERANCE: f64 = 1e-8;

/// Tests whether two points coincide component-wise within `tolerance`.
///
/// Any non-finite component on either side makes the pair non-coincident,
/// so "unplaced" (NaN) coordinates never match anything.
pub fn points_coincide(a: &Point3<f64>, b: &Point3<f64>, tolerance: f64) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| x.is_finite() && y.is_finite() && (x - y).abs() <= tolerance)
}
