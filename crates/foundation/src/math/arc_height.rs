//! Paraboloid arc height profile.
//!
//! This is a CPU port of the height function in the arc layer's vertex shader.
//! Markers placed with it sit exactly on the rendered arc, so the arithmetic
//! must stay operation-for-operation identical to the shader.

use super::geodesy::{GeoPoint, great_circle_distance_m, position_at_progress};

/// Altitude at `ratio` (0..=1) along an arc of horizontal length `distance`.
pub fn arc_height(
    distance: f64,
    source_z: f64,
    target_z: f64,
    ratio: f64,
    height_multiplier: f64,
) -> f64 {
    let delta_z = target_z - source_z;
    let dh = distance * height_multiplier;

    if dh == 0.0 {
        return source_z + delta_z * ratio;
    }

    let unit_z = delta_z / dh;
    let p2 = unit_z * unit_z + 1.0;
    let descending = delta_z < 0.0;
    let z0 = if descending { target_z } else { source_z };
    let r = if descending { 1.0 - ratio } else { ratio };

    (r * (p2 - r)).sqrt() * dh + z0
}

/// `[lon, lat, altitude]` vertices of a great-circle arc, `num_segments + 1`
/// samples from source to target inclusive.
pub fn sample_arc(
    source: GeoPoint,
    target: GeoPoint,
    altitude_source: f64,
    altitude_target: f64,
    height_multiplier: f64,
    num_segments: usize,
) -> Vec<[f64; 3]> {
    let n = num_segments.max(1);
    let distance = great_circle_distance_m(source, target);

    (0..=n)
        .map(|i| {
            let ratio = i as f64 / n as f64;
            let p = position_at_progress(source, target, ratio * 100.0);
            let z = arc_height(
                distance,
                altitude_source,
                altitude_target,
                ratio,
                height_multiplier,
            );
            [p.lon, p.lat, z]
        })
        .collect()
}
