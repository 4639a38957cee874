use super::geodesy::GeoPoint;

/// Default maximum vertex spacing (degrees) before extra points are inserted.
pub const DEFAULT_DENSIFY_THRESHOLD_DEG: f64 = 5.0;

/// Insert intermediate vertices so that no step exceeds `threshold_deg` in
/// longitude or latitude.
///
/// Steps are linear in lon/lat. Lines projected onto a sphere then follow the
/// surface instead of cutting chords through it.
pub fn interpolate_coordinates(coords: &[GeoPoint], threshold_deg: f64) -> Vec<GeoPoint> {
    if coords.len() < 2 || !threshold_deg.is_finite() || threshold_deg <= 0.0 {
        return coords.to_vec();
    }

    let mut out: Vec<GeoPoint> = Vec::with_capacity(coords.len());
    out.push(coords[0]);

    for pair in coords.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        let lon_diff = (curr.lon - prev.lon).abs();
        let lat_diff = (curr.lat - prev.lat).abs();

        if lon_diff > threshold_deg || lat_diff > threshold_deg {
            let steps = (lon_diff.max(lat_diff) / threshold_deg).ceil() as usize;
            for j in 1..steps {
                let t = j as f64 / steps as f64;
                out.push(GeoPoint::new(
                    prev.lon + (curr.lon - prev.lon) * t,
                    prev.lat + (curr.lat - prev.lat) * t,
                ));
            }
        }
        out.push(curr);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_DENSIFY_THRESHOLD_DEG, interpolate_coordinates};
    use crate::math::geodesy::GeoPoint;

    #[test]
    fn short_steps_are_untouched() {
        let line = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(3.0, 4.0),
            GeoPoint::new(5.0, 5.0),
        ];
        assert_eq!(interpolate_coordinates(&line, DEFAULT_DENSIFY_THRESHOLD_DEG), line);
    }

    #[test]
    fn long_step_is_subdivided_evenly() {
        let line = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(20.0, 10.0)];
        let out = interpolate_coordinates(&line, 5.0);
        // ceil(20 / 5) = 4 steps -> 3 inserted points.
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], line[0]);
        assert_eq!(out[2], GeoPoint::new(10.0, 5.0));
        assert_eq!(out[4], line[1]);
    }

    #[test]
    fn every_step_is_within_threshold() {
        let line = vec![
            GeoPoint::new(-120.0, 30.0),
            GeoPoint::new(-60.0, 47.0),
            GeoPoint::new(-61.0, -12.0),
        ];
        let out = interpolate_coordinates(&line, 5.0);
        for pair in out.windows(2) {
            assert!((pair[1].lon - pair[0].lon).abs() <= 5.0 + 1e-9);
            assert!((pair[1].lat - pair[0].lat).abs() <= 5.0 + 1e-9);
        }
    }

    #[test]
    fn degenerate_inputs_pass_through() {
        let one = vec![GeoPoint::new(1.0, 1.0)];
        assert_eq!(interpolate_coordinates(&one, 5.0), one);

        let two = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(90.0, 0.0)];
        assert_eq!(interpolate_coordinates(&two, 0.0), two);
        assert_eq!(interpolate_coordinates(&two, f64::NAN), two);
    }
}
