//! Great-circle geometry on a spherical Earth.
//!
//! Everything here takes and returns degrees; radians are an internal detail.
//! All functions are total over finite input: degenerate geometry falls back to
//! a well-defined value instead of producing NaN.

use core::f64::consts::{PI, TAU};

/// Mean Earth radius (meters) used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A longitude/latitude pair in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn as_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// `(lon, lat)` in radians.
    pub fn to_radians(self) -> (f64, f64) {
        (self.lon.to_radians(), self.lat.to_radians())
    }

    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        p.as_array()
    }
}

/// `lon2 - lon1` (radians) brought into `[-PI, PI]`.
pub fn normalize_lon_diff(lon1: f64, lon2: f64) -> f64 {
    let mut diff = lon2 - lon1;
    if diff > PI {
        diff -= TAU;
    }
    if diff < -PI {
        diff += TAU;
    }
    diff
}

/// Wrap a longitude in degrees into `[-180, 180]`.
pub fn wrap_longitude(lon: f64) -> f64 {
    if !lon.is_finite() || (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // Positive multiples of 180 land on the eastern edge.
    if wrapped == -180.0 && lon > 0.0 { 180.0 } else { wrapped }
}

/// Initial compass bearing (degrees, `[0, 360)`) of the great circle from
/// `start` to `end`. 0 is north, clockwise.
pub fn bearing(start: GeoPoint, end: GeoPoint) -> f64 {
    let (lon1, lat1) = start.to_radians();
    let (lon2, lat2) = end.to_radians();

    let d_lon = normalize_lon_diff(lon1, lon2);
    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Central angle (radians) between two points, spherical law of cosines.
///
/// The cosine is not clamped: rounding past ±1 yields NaN, which callers treat
/// as degenerate geometry.
pub fn angular_distance(start: GeoPoint, end: GeoPoint) -> f64 {
    let (lon1, lat1) = start.to_radians();
    let (lon2, lat2) = end.to_radians();

    let d_lon = normalize_lon_diff(lon1, lon2);
    (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * d_lon.cos()).acos()
}

/// Great-circle distance in meters.
///
/// Points close enough for the cosine to round past 1 are treated as
/// coincident.
pub fn great_circle_distance_m(start: GeoPoint, end: GeoPoint) -> f64 {
    if start == end {
        return 0.0;
    }
    let d = angular_distance(start, end);
    if !d.is_finite() {
        return 0.0;
    }
    d * EARTH_RADIUS_M
}

/// Point at `progress` percent (0..=100) along the great circle from `start` to
/// `end`.
///
/// Coincident points, or points whose central angle is not finite, return
/// `start` unchanged.
pub fn position_at_progress(start: GeoPoint, end: GeoPoint, progress: f64) -> GeoPoint {
    let t = progress / 100.0;
    let (lon1, lat1) = start.to_radians();
    let (lon2, lat2) = end.to_radians();

    let d = angular_distance(start, end);
    if !d.is_finite() || d == 0.0 {
        return start;
    }

    let sin_d = d.sin();
    let a = ((1.0 - t) * d).sin() / sin_d;
    let b = (t * d).sin() / sin_d;

    let x = a * lat1.cos() * lon1.cos() + b * lat2.cos() * lon2.cos();
    let y = a * lat1.cos() * lon1.sin() + b * lat2.cos() * lon2.sin();
    let z = a * lat1.sin() + b * lat2.sin();

    let lat = z.atan2((x * x + y * y).sqrt());
    let lon = y.atan2(x);

    // sin(d) underflows to zero for antipodal input.
    if !lat.is_finite() || !lon.is_finite() {
        return start;
    }

    GeoPoint::new(wrap_longitude(lon.to_degrees()), lat.to_degrees())
}

/// Heading (degrees) at `progress` percent, measured towards a point
/// `lookahead` percent further along the path.
///
/// At the end of the path the lookahead point is clamped to 100, the same way
/// directional markers are oriented.
pub fn heading_at_progress(start: GeoPoint, end: GeoPoint, progress: f64, lookahead: f64) -> f64 {
    let here = position_at_progress(start, end, progress);
    let ahead = position_at_progress(start, end, (progress + lookahead).min(100.0));
    bearing(here, ahead)
}

#[cfg(test)]
mod tests {
    use super::{
        EARTH_RADIUS_M, GeoPoint, angular_distance, bearing, great_circle_distance_m,
        heading_at_progress, normalize_lon_diff, position_at_progress, wrap_longitude,
    };
    use core::f64::consts::PI;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    const NYC: GeoPoint = GeoPoint::new(-74.0, 40.7);
    const TOKYO: GeoPoint = GeoPoint::new(139.7, 35.7);

    #[test]
    fn lon_diff_takes_the_short_way() {
        let a = 170.0_f64.to_radians();
        let b = (-170.0_f64).to_radians();
        assert_close(normalize_lon_diff(a, b), 20.0_f64.to_radians(), 1e-12);
        assert_close(normalize_lon_diff(b, a), -20.0_f64.to_radians(), 1e-12);
        assert!(normalize_lon_diff(0.0, PI) <= PI);
    }

    #[test]
    fn wrap_longitude_into_range() {
        assert_close(wrap_longitude(190.0), -170.0, 1e-12);
        assert_close(wrap_longitude(-540.0), -180.0, 1e-12);
        assert_close(wrap_longitude(45.0), 45.0, 0.0);
    }

    #[test]
    fn wrap_longitude_handles_large_magnitudes() {
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(540.0), 180.0);
        assert_eq!(wrap_longitude(-540.0), -180.0);
        assert_close(wrap_longitude(720.0 + 30.0), 30.0, 1e-9);

        for lon in [1e20, -1e20, 3.5e15, f64::MAX] {
            let w = wrap_longitude(lon);
            assert!(w.is_finite(), "{lon} -> {w}");
            assert!((-180.0..=180.0).contains(&w), "{lon} -> {w}");
        }
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert_close(bearing(origin, GeoPoint::new(0.0, 90.0)), 0.0, 1e-9);
        assert_close(bearing(origin, GeoPoint::new(90.0, 0.0)), 90.0, 1e-9);
        assert_close(bearing(origin, GeoPoint::new(0.0, -45.0)), 180.0, 1e-9);
        assert_close(bearing(origin, GeoPoint::new(-30.0, 0.0)), 270.0, 1e-9);
    }

    #[test]
    fn bearing_is_in_range_and_deterministic() {
        let samples = [
            (NYC, TOKYO),
            (TOKYO, NYC),
            (GeoPoint::new(170.0, 10.0), GeoPoint::new(-170.0, 12.0)),
            (GeoPoint::new(-0.1, 51.5), GeoPoint::new(151.2, -33.9)),
        ];
        for (s, e) in samples {
            let b = bearing(s, e);
            assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
            assert_eq!(b.to_bits(), bearing(s, e).to_bits());
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        for p in [NYC, TOKYO, GeoPoint::new(0.0, 90.0), GeoPoint::new(180.0, -12.5)] {
            assert_eq!(great_circle_distance_m(p, p), 0.0);
        }
    }

    #[test]
    fn near_coincident_distance_is_finite() {
        let a = GeoPoint::new(-166.828, -12.0);
        let b = GeoPoint::new(-166.827999999, -12.0);
        let d = great_circle_distance_m(a, b);
        assert!(d.is_finite() && d >= 0.0);

        for i in 0..2000 {
            let lon = -180.0 + f64::from(i) * 0.18;
            for lat in [-12.0, 0.0, 45.5, 89.9] {
                let d = great_circle_distance_m(
                    GeoPoint::new(lon, lat),
                    GeoPoint::new(lon + 1e-9, lat),
                );
                assert!(d.is_finite() && d >= 0.0, "({lon}, {lat}) -> {d}");
                assert!(d < 1.0);
            }
        }
    }

    #[test]
    fn quarter_meridian_distance() {
        let d = great_circle_distance_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 90.0));
        assert_close(d, EARTH_RADIUS_M * PI / 2.0, 1e-3);
    }

    #[test]
    fn nyc_tokyo_distance_is_plausible() {
        let km = great_circle_distance_m(NYC, TOKYO) / 1000.0;
        assert!((10_800.0..10_900.0).contains(&km), "got {km} km");
    }

    #[test]
    fn progress_endpoints_match_inputs() {
        let pairs = [
            (NYC, TOKYO),
            (GeoPoint::new(170.0, 10.0), GeoPoint::new(-170.0, 12.0)),
            (GeoPoint::new(2.35, 48.85), GeoPoint::new(-43.2, -22.9)),
        ];
        for (s, e) in pairs {
            let p0 = position_at_progress(s, e, 0.0);
            let p1 = position_at_progress(s, e, 100.0);
            assert_close(p0.lon, s.lon, 1e-6);
            assert_close(p0.lat, s.lat, 1e-6);
            assert_close(p1.lon, e.lon, 1e-6);
            assert_close(p1.lat, e.lat, 1e-6);
        }
    }

    #[test]
    fn progress_midpoint_on_equator() {
        let mid = position_at_progress(GeoPoint::new(0.0, 0.0), GeoPoint::new(90.0, 0.0), 50.0);
        assert_close(mid.lon, 45.0, 1e-9);
        assert_close(mid.lat, 0.0, 1e-9);
    }

    #[test]
    fn progress_crossing_antimeridian_wraps_longitude() {
        let mid = position_at_progress(GeoPoint::new(170.0, 0.0), GeoPoint::new(-170.0, 0.0), 50.0);
        assert_close(mid.lon.abs(), 180.0, 1e-9);
        assert!((-180.0..=180.0).contains(&mid.lon));
    }

    #[test]
    fn degenerate_geometry_returns_start() {
        let p = GeoPoint::new(12.0, 34.0);
        assert_eq!(position_at_progress(p, p, 50.0), p);

        let antipode = GeoPoint::new(-168.0, -34.0);
        let out = position_at_progress(p, antipode, 50.0);
        assert!(out.is_finite());
    }

    #[test]
    fn heading_follows_the_path() {
        // Along the equator heading east the whole way.
        let h = heading_at_progress(GeoPoint::new(0.0, 0.0), GeoPoint::new(90.0, 0.0), 30.0, 1.0);
        assert_close(h, 90.0, 1e-6);

        // Heading at p approximates the bearing between two nearby samples.
        let p = 40.0;
        let a = position_at_progress(NYC, TOKYO, p);
        let b = position_at_progress(NYC, TOKYO, p + 0.01);
        assert_close(heading_at_progress(NYC, TOKYO, p, 0.01), bearing(a, b), 1e-9);
    }

    #[test]
    fn angular_distance_is_symmetric() {
        assert_close(angular_distance(NYC, TOKYO), angular_distance(TOKYO, NYC), 1e-12);
    }
}
