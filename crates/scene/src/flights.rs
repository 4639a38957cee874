use foundation::math::{
    GeoPoint, great_circle_distance_m, heading_at_progress, position_at_progress,
};
use foundation::time::{TimeSpan, TimeWindow};

/// One static origin/destination pair and the progress (percent) at which its
/// marker is shown.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Flight {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub progress: f64,
}

impl Flight {
    pub fn new(start: GeoPoint, end: GeoPoint, progress: f64) -> Self {
        Self {
            start,
            end,
            progress,
        }
    }

    /// Marker position on the great circle.
    pub fn position(&self) -> GeoPoint {
        position_at_progress(self.start, self.end, self.progress)
    }

    pub fn distance_m(&self) -> f64 {
        great_circle_distance_m(self.start, self.end)
    }

    /// Direction of travel at the marker, looking one percent ahead.
    pub fn heading(&self) -> f64 {
        heading_at_progress(self.start, self.end, self.progress, 1.0)
    }
}

/// One cycle of one flight on the animation timeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimatedSegment {
    /// Timeline ms at which the arc leaves `source`.
    pub time1: f64,
    /// Timeline ms at which the arc reaches `target`.
    pub time2: f64,
    pub source: GeoPoint,
    pub target: GeoPoint,
    pub altitude_source: f64,
    pub altitude_target: f64,
    pub flight_index: usize,
    pub progress: f64,
}

impl AnimatedSegment {
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.time1, self.time2)
    }

    /// Whether any part of the segment is inside `window`.
    pub fn is_active(&self, window: &TimeWindow) -> bool {
        window.overlaps(self.time1, self.time2)
    }

    /// Timestamp at `ratio` (0..=1) along the arc.
    pub fn timestamp_at(&self, ratio: f64) -> f64 {
        self.time1 + (self.time2 - self.time1) * ratio
    }
}

/// How flights are repeated along the timeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CycleSchedule {
    /// Repetitions of every flight.
    pub num_cycles: u32,
    /// Length of one repetition (timeline ms).
    pub duration_ms: f64,
    /// Offset between consecutive flights (timeline ms).
    pub stagger_ms: f64,
}

impl Default for CycleSchedule {
    fn default() -> Self {
        Self {
            num_cycles: 30,
            duration_ms: 2000.0,
            stagger_ms: 200.0,
        }
    }
}

impl CycleSchedule {
    pub fn segment_count(&self, flights: usize) -> usize {
        flights * self.num_cycles as usize
    }

    /// Start of cycle `cycle` of flight `index`.
    pub fn start_time(&self, index: usize, cycle: u32) -> f64 {
        index as f64 * self.stagger_ms + f64::from(cycle) * self.duration_ms
    }
}

/// Expand every flight into `num_cycles` segments.
///
/// Flight `i`, cycle `c` runs from `i * stagger + c * duration` for one
/// `duration`. Output is ordered by flight, then cycle.
pub fn expand_flights(flights: &[Flight], schedule: &CycleSchedule) -> Vec<AnimatedSegment> {
    let mut out = Vec::with_capacity(schedule.segment_count(flights.len()));

    for (index, flight) in flights.iter().enumerate() {
        for cycle in 0..schedule.num_cycles {
            let time1 = schedule.start_time(index, cycle);
            out.push(AnimatedSegment {
                time1,
                time2: time1 + schedule.duration_ms,
                source: flight.start,
                target: flight.end,
                altitude_source: 0.0,
                altitude_target: 0.0,
                flight_index: index,
                progress: flight.progress,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{AnimatedSegment, CycleSchedule, Flight, expand_flights};
    use foundation::math::GeoPoint;
    use foundation::time::TimeWindow;

    fn nyc_tokyo() -> Flight {
        Flight::new(GeoPoint::new(-74.0, 40.7), GeoPoint::new(139.7, 35.7), 50.0)
    }

    #[test]
    fn single_flight_three_cycles() {
        let schedule = CycleSchedule {
            num_cycles: 3,
            duration_ms: 2000.0,
            stagger_ms: 200.0,
        };
        let segs = expand_flights(&[nyc_tokyo()], &schedule);

        assert_eq!(segs.len(), 3);
        let t1: Vec<f64> = segs.iter().map(|s| s.time1).collect();
        let t2: Vec<f64> = segs.iter().map(|s| s.time2).collect();
        assert_eq!(t1, vec![0.0, 2000.0, 4000.0]);
        assert_eq!(t2, vec![2000.0, 4000.0, 6000.0]);
        assert!(segs.iter().all(|s| s.flight_index == 0 && s.progress == 50.0));
        assert!(segs.iter().all(|s| s.altitude_source == 0.0 && s.altitude_target == 0.0));
    }

    #[test]
    fn flights_are_staggered_by_index() {
        let schedule = CycleSchedule {
            num_cycles: 2,
            duration_ms: 1000.0,
            stagger_ms: 200.0,
        };
        let flights = [nyc_tokyo(), nyc_tokyo(), nyc_tokyo()];
        let segs = expand_flights(&flights, &schedule);

        assert_eq!(segs.len(), 6);
        assert_eq!(segs[2].flight_index, 1);
        assert_eq!(segs[2].time1, 200.0);
        assert_eq!(segs[5].time1, 400.0 + 1000.0);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(expand_flights(&[], &CycleSchedule::default()).is_empty());
        let none = CycleSchedule {
            num_cycles: 0,
            ..CycleSchedule::default()
        };
        assert!(expand_flights(&[nyc_tokyo()], &none).is_empty());
    }

    #[test]
    fn segment_activity_and_timestamps() {
        let seg = AnimatedSegment {
            time1: 1000.0,
            time2: 3000.0,
            source: GeoPoint::new(0.0, 0.0),
            target: GeoPoint::new(10.0, 0.0),
            altitude_source: 0.0,
            altitude_target: 0.0,
            flight_index: 0,
            progress: 0.0,
        };
        assert_eq!(seg.timestamp_at(0.5), 2000.0);
        assert!(seg.is_active(&TimeWindow::new(2500.0, 6500.0)));
        assert!(!seg.is_active(&TimeWindow::new(3000.5, 7000.0)));
    }

    #[test]
    fn marker_heading_points_along_route() {
        let f = Flight::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(60.0, 0.0), 25.0);
        assert!((f.position().lon - 15.0).abs() < 1e-9);
        assert!((f.heading() - 90.0).abs() < 1e-6);
    }
}
