//! Frame-driven flight animation.
//!
//! [`FlightAnimator`] owns everything that changes between frames: the
//! expanded segments, their time groups and the animation clock. Segments and
//! groups are rebuilt wholesale, and only when the flight set or the settings
//! change; per frame the clock moves and group visibility is recomputed.

use foundation::time::TimeWindow;
use runtime::clock::{AnimationClock, ClockParams};
use tracing::debug;

use crate::flights::{AnimatedSegment, CycleSchedule, Flight, expand_flights};
use crate::temporal::{ArcGroup, DEFAULT_GROUP_SIZE, group_by_time};
use crate::visibility::{GroupVisibility, cull_groups};

/// Content hash identifying a flight set.
pub type ContentKey = [u8; 32];

/// Animator tunables. The clock period is derived from the schedule.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimatorSettings {
    pub schedule: CycleSchedule,
    /// Clock advance per reference frame (timeline ms).
    pub speed: f64,
    pub time_window_ms: f64,
    pub group_size: usize,
}

impl AnimatorSettings {
    pub fn new(
        schedule: CycleSchedule,
        speed: f64,
        time_window_ms: f64,
        group_size: usize,
    ) -> Self {
        Self {
            schedule,
            speed,
            time_window_ms,
            group_size,
        }
    }

    pub fn clock(&self) -> ClockParams {
        ClockParams::for_schedule(
            self.speed,
            self.schedule.duration_ms,
            self.schedule.num_cycles,
            self.time_window_ms,
        )
    }
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self::new(CycleSchedule::default(), 10.0, 4000.0, DEFAULT_GROUP_SIZE)
    }
}

/// What the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    /// Clock value at the start of the window.
    pub time: f64,
    pub window: TimeWindow,
    /// The clock restarted from 0 on this frame.
    pub wrapped: bool,
    pub visibility: GroupVisibility,
    pub groups: &'a [ArcGroup<AnimatedSegment>],
}

impl<'a> FrameView<'a> {
    pub fn visible(&self) -> impl Iterator<Item = &'a ArcGroup<AnimatedSegment>> + '_ {
        let groups = self.groups;
        self.visibility.iter_visible().filter_map(move |i| groups.get(i))
    }
}

#[derive(Debug, Clone)]
pub struct FlightAnimator {
    settings: AnimatorSettings,
    flights: Vec<Flight>,
    content_key: Option<ContentKey>,
    segment_count: usize,
    groups: Vec<ArcGroup<AnimatedSegment>>,
    clock: AnimationClock,
}

impl FlightAnimator {
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            settings,
            flights: Vec::new(),
            content_key: None,
            segment_count: 0,
            groups: Vec::new(),
            clock: AnimationClock::new(settings.clock()),
        }
    }

    pub fn settings(&self) -> AnimatorSettings {
        self.settings
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn content_key(&self) -> Option<ContentKey> {
        self.content_key
    }

    pub fn groups(&self) -> &[ArcGroup<AnimatedSegment>] {
        &self.groups
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn clock(&self) -> AnimationClock {
        self.clock
    }

    /// Replace the flight set. Returns `true` when segments were rebuilt,
    /// `false` when `key` matches the current set.
    ///
    /// `key` must identify the content of `flights`: a repeated key is taken
    /// to mean the same set and `flights` is ignored. Callers loading from a
    /// file should pass the hash the file loader computed
    /// (`formats::FlightSet::key`) rather than inventing one.
    pub fn set_flights(&mut self, key: ContentKey, flights: &[Flight]) -> bool {
        if self.content_key == Some(key) {
            return false;
        }
        self.content_key = Some(key);
        self.flights = flights.to_vec();
        self.rebuild();
        true
    }

    /// Apply new settings, rebuilding if the schedule or grouping changed.
    ///
    /// The clock keeps its value unless it is past the new period.
    pub fn reconfigure(&mut self, settings: AnimatorSettings) {
        if settings == self.settings {
            return;
        }
        let layout_changed = settings.schedule != self.settings.schedule
            || settings.group_size != self.settings.group_size;
        self.settings = settings;

        let params = settings.clock();
        let time = self.clock.time();
        let time = if time < params.period_ms { time } else { 0.0 };
        self.clock = AnimationClock::at(params, time);

        if layout_changed {
            self.rebuild();
        }
    }

    /// Step the clock by one host frame and cull groups against the new
    /// window.
    pub fn advance(&mut self, delta_ms: f64) -> FrameView<'_> {
        let step = self.clock.step(delta_ms);
        self.clock = step.clock;
        if step.wrapped {
            debug!(period_ms = self.settings.clock().period_ms, "animation clock wrapped");
        }
        self.view_with(step.wrapped)
    }

    /// The current frame without moving the clock.
    pub fn view(&self) -> FrameView<'_> {
        self.view_with(false)
    }

    fn view_with(&self, wrapped: bool) -> FrameView<'_> {
        let window = self.clock.window();
        FrameView {
            time: self.clock.time(),
            window,
            wrapped,
            visibility: cull_groups(&self.groups, &window),
            groups: &self.groups,
        }
    }

    fn rebuild(&mut self) {
        let segments = expand_flights(&self.flights, &self.settings.schedule);
        self.segment_count = segments.len();
        self.groups = group_by_time(segments, |s| s.time1, |s| s.time2, self.settings.group_size);
        debug!(
            flights = self.flights.len(),
            segments = self.segment_count,
            groups = self.groups.len(),
            "rebuilt arc groups"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimatorSettings, FlightAnimator};
    use crate::flights::{CycleSchedule, Flight};
    use foundation::math::GeoPoint;
    use runtime::frame::REFERENCE_FRAME_MS;

    fn flights(n: usize) -> Vec<Flight> {
        (0..n)
            .map(|i| {
                Flight::new(
                    GeoPoint::new(-74.0 + i as f64, 40.7),
                    GeoPoint::new(139.7, 35.7),
                    50.0,
                )
            })
            .collect()
    }

    fn small_settings() -> AnimatorSettings {
        let schedule = CycleSchedule {
            num_cycles: 3,
            duration_ms: 2000.0,
            stagger_ms: 200.0,
        };
        AnimatorSettings::new(schedule, 10.0, 4000.0, 4)
    }

    #[test]
    fn default_settings_match_schedule() {
        let s = AnimatorSettings::default();
        assert_eq!(s.clock().period_ms, 64_000.0);
        assert_eq!(s.group_size, 2500);
    }

    #[test]
    fn rebuilds_only_on_new_key() {
        let mut a = FlightAnimator::new(small_settings());
        assert!(a.set_flights([1; 32], &flights(5)));
        assert_eq!(a.segment_count(), 15);
        assert_eq!(a.groups().len(), 4);

        assert!(!a.set_flights([1; 32], &flights(1)));
        assert_eq!(a.flights().len(), 5);

        assert!(a.set_flights([2; 32], &flights(1)));
        assert_eq!(a.segment_count(), 3);
    }

    #[test]
    fn advance_moves_window_and_culls() {
        let mut a = FlightAnimator::new(small_settings());
        a.set_flights([7; 32], &flights(5));

        let first = a.view();
        assert_eq!(first.window.lo, 0.0);
        assert_eq!(first.window.hi, 4000.0);
        let visible_at_start = first.visibility.visible_count();
        assert!(visible_at_start > 0);

        // Jump to near the end of the timeline: only late groups remain.
        for _ in 0..800 {
            a.advance(REFERENCE_FRAME_MS);
        }
        let late = a.view();
        assert!((late.time - 8000.0).abs() < 1e-6);
        assert!(late.visible().all(|g| g.end_time > late.window.lo));
        assert!(late.visibility.visible_count() < visible_at_start);
    }

    #[test]
    fn wrap_is_reported() {
        let mut a = FlightAnimator::new(small_settings());
        a.set_flights([3; 32], &flights(1));
        let period = a.settings().clock().period_ms;

        let frames = (period / 10.0).ceil() as usize;
        let mut wrapped = false;
        for _ in 0..frames {
            if a.advance(REFERENCE_FRAME_MS).wrapped {
                wrapped = true;
                break;
            }
        }
        assert!(wrapped);
        assert_eq!(a.clock().time(), 0.0);
    }

    #[test]
    fn reconfigure_regroups_and_keeps_clock() {
        let mut a = FlightAnimator::new(small_settings());
        a.set_flights([9; 32], &flights(5));
        a.advance(10.0 * REFERENCE_FRAME_MS);
        let t = a.clock().time();

        let mut s = small_settings();
        s.group_size = 100;
        a.reconfigure(s);
        assert_eq!(a.groups().len(), 1);
        assert_eq!(a.clock().time(), t);
    }

    #[test]
    fn reconfigure_schedule_moves_wrap_period() {
        let mut a = FlightAnimator::new(small_settings());
        a.set_flights([4; 32], &flights(2));
        for _ in 0..500 {
            a.advance(REFERENCE_FRAME_MS);
        }
        assert!((a.clock().time() - 5000.0).abs() < 1e-6);

        let mut s = small_settings();
        s.schedule.num_cycles = 1;
        a.reconfigure(s);

        assert_eq!(a.clock().params().period_ms, 2000.0 * 1.0 + 4000.0);
        assert_eq!(a.segment_count(), 2);
        assert!((a.clock().time() - 5000.0).abs() < 1e-6);

        s.schedule.duration_ms = 500.0;
        a.reconfigure(s);
        assert_eq!(a.clock().params().period_ms, 500.0 + 4000.0);
        assert_eq!(a.clock().time(), 0.0);
    }

    #[test]
    fn repeated_key_keeps_previous_flights() {
        let mut a = FlightAnimator::new(small_settings());
        a.set_flights([5; 32], &flights(3));
        let before = a.groups().to_vec();

        assert!(!a.set_flights([5; 32], &flights(8)));
        assert_eq!(a.flights(), &flights(3)[..]);
        assert_eq!(a.groups(), &before[..]);
    }

    #[test]
    fn empty_flight_set_is_valid() {
        let mut a = FlightAnimator::new(AnimatorSettings::default());
        a.set_flights([0; 32], &[]);
        let view = a.advance(REFERENCE_FRAME_MS);
        assert!(view.visibility.is_empty());
        assert_eq!(view.visible().count(), 0);
    }
}
