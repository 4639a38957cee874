//! Antimeridian splitting for flat projections.
//!
//! A polyline hopping from +179° to -179° would otherwise be drawn across the
//! whole map. Runs are cut at the crossing and each side gets a boundary vertex
//! a hair away from ±180° so renderers never join them.

use super::geodesy::{GeoPoint, position_at_progress};

/// Upper bound on bisection steps when locating a crossing.
pub const MAX_BISECTION_ITERATIONS: u32 = 30;
/// Stop once the estimate is this close (degrees) to ±180°.
pub const CROSSING_TOLERANCE_DEG: f64 = 1e-5;
/// Longitude magnitude of the vertex closing a run on the departure side.
pub const DEPARTURE_BOUNDARY_LON: f64 = 179.99999;
/// Longitude magnitude of the vertex opening a run on the arrival side.
pub const ARRIVAL_BOUNDARY_LON: f64 = 180.00001;

/// Result of locating where a segment crosses ±180°.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Crossing {
    /// Latitude (degrees) of the best estimate.
    pub lat: f64,
    /// Great-circle parameter (0..=1) of the best estimate.
    pub t: f64,
    pub iterations: u32,
    /// False when the iteration cap was hit before reaching the tolerance.
    pub converged: bool,
}

/// `true` when a step between two consecutive vertices must be read as a
/// wrap across ±180° rather than a long run the other way round.
pub fn crosses_antimeridian(prev: GeoPoint, curr: GeoPoint) -> bool {
    (curr.lon - prev.lon).abs() > 180.0
}

/// Bisect the great circle from `prev` to `curr` for the ±180° crossing.
pub fn find_crossing(prev: GeoPoint, curr: GeoPoint) -> Crossing {
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    let mut best = Crossing {
        lat: (prev.lat + curr.lat) / 2.0,
        t: 0.5,
        iterations: 0,
        converged: false,
    };

    for i in 1..=MAX_BISECTION_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let p = position_at_progress(prev, curr, mid * 100.0);

        best = Crossing {
            lat: p.lat,
            t: mid,
            iterations: i,
            converged: false,
        };

        if 180.0 - p.lon.abs() < CROSSING_TOLERANCE_DEG {
            best.converged = true;
            break;
        }

        if (p.lon - prev.lon).abs() <= 180.0 {
            // Still on the departure side.
            lo = mid;
        } else {
            hi = mid;
        }
    }

    best
}

/// Split a lon/lat polyline into runs that never cross ±180°.
///
/// Concatenating the runs and dropping the inserted boundary vertices gives
/// back the input. An empty input yields no runs.
pub fn split_at_antimeridian(coords: &[GeoPoint]) -> Vec<Vec<GeoPoint>> {
    let mut runs: Vec<Vec<GeoPoint>> = Vec::new();
    let Some(first) = coords.first() else {
        return runs;
    };

    let mut current: Vec<GeoPoint> = vec![*first];
    for pair in coords.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);

        if crosses_antimeridian(prev, curr) {
            let crossing = find_crossing(prev, curr);
            let departure = if prev.lon < 0.0 { -1.0 } else { 1.0 };

            current.push(GeoPoint::new(
                departure * DEPARTURE_BOUNDARY_LON,
                crossing.lat,
            ));
            runs.push(std::mem::take(&mut current));
            current.push(GeoPoint::new(
                -departure * ARRIVAL_BOUNDARY_LON,
                crossing.lat,
            ));
        }

        current.push(curr);
    }
    runs.push(current);

    runs
}

/// `true` for the synthetic vertices inserted by [`split_at_antimeridian`].
pub fn is_boundary_vertex(p: GeoPoint) -> bool {
    let m = p.lon.abs();
    m == DEPARTURE_BOUNDARY_LON || m == ARRIVAL_BOUNDARY_LON
}
