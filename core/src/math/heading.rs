use ndarray::{arr2, Array2, ArrayView2};

/// Cross-product norm below which gravity and the geomagnetic field are
/// treated as parallel and no attitude can be resolved (free fall, or the
/// device pointed straight at a magnetic pole).
const MIN_CROSS_NORM: f32 = 0.1;

fn cross(a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(v: &[f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn scaled(v: &[f32; 3], factor: f32) -> [f32; 3] {
    [v[0] * factor, v[1] * factor, v[2] * factor]
}

/// Builds the device-to-world (East-North-Up) rotation matrix from the
/// gravity and geomagnetic vectors.
///
/// Rows are H (east), M (north), A (up): H is the normalized cross product
/// of the field and gravity, M closes the right-handed frame. Returns
/// `None` when the inputs are degenerate.
pub fn rotation_matrix(gravity: &[f32; 3], geomagnetic: &[f32; 3]) -> Option<Array2<f32>> {
    let h = cross(geomagnetic, gravity);
    let norm_h = norm(&h);
    if norm_h < MIN_CROSS_NORM {
        return None;
    }
    let h = scaled(&h, 1.0 / norm_h);
    let a = scaled(gravity, 1.0 / norm(gravity));
    let m = cross(&a, &h);
    Some(arr2(&[h, m, a]))
}

/// Extracts the azimuth (rotation about the vertical axis) in radians.
pub fn azimuth(rotation: &ArrayView2<f32>) -> f32 {
    rotation[[0, 1]].atan2(rotation[[1, 1]])
}

/// Compass heading in degrees, [0, 360), from smoothed gravity and
/// geomagnetic vectors. `None` when the vectors are degenerate.
///
/// The azimuth is negated before wrapping so the value rotates the same
/// way the on-screen compass card does. Fixed display contract.
pub fn compute_heading(gravity: &[f32; 3], geomagnetic: &[f32; 3]) -> Option<f32> {
    let rotation = rotation_matrix(gravity, geomagnetic)?;
    let azimuth_deg = azimuth(&rotation.view()).to_degrees();
    Some((-azimuth_deg + 360.0).rem_euclid(360.0))
}
