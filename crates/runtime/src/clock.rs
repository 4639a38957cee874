use foundation::time::TimeWindow;

use crate::frame::{Frame, steps_for};

/// Tunables of the animation clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockParams {
    /// Clock advance per reference frame (timeline ms).
    pub speed: f64,
    /// Width of the visible window (timeline ms).
    pub time_window_ms: f64,
    /// Clock value at which the timeline restarts from 0.
    pub period_ms: f64,
}

impl ClockParams {
    /// Parameters for a schedule of `num_cycles` flights of `duration_ms`.
    ///
    /// The period leaves one extra window at the end so the last cycle can
    /// play out before the wrap.
    pub fn for_schedule(
        speed: f64,
        duration_ms: f64,
        num_cycles: u32,
        time_window_ms: f64,
    ) -> Self {
        Self {
            speed,
            time_window_ms,
            period_ms: duration_ms * f64::from(num_cycles) + time_window_ms,
        }
    }
}

impl Default for ClockParams {
    fn default() -> Self {
        Self::for_schedule(10.0, 2000.0, 30, 4000.0)
    }
}

/// Monotonic, wrapping animation clock.
///
/// Each transition is pure: `advance` consumes the clock and returns the
/// next one. The owner keeps the value between frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationClock {
    time: f64,
    params: ClockParams,
}

/// Result of one clock transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockStep {
    pub clock: AnimationClock,
    /// The timeline restarted during this step.
    pub wrapped: bool,
}

impl AnimationClock {
    pub fn new(params: ClockParams) -> Self {
        Self { time: 0.0, params }
    }

    /// Clock positioned at `time`, for replays and tests.
    pub fn at(params: ClockParams, time: f64) -> Self {
        Self { time, params }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn params(&self) -> ClockParams {
        self.params
    }

    pub fn step(self, delta_ms: f64) -> ClockStep {
        let next = self.time + self.params.speed * steps_for(delta_ms);
        let wrapped = next >= self.params.period_ms;
        ClockStep {
            clock: Self {
                time: if wrapped { 0.0 } else { next },
                params: self.params,
            },
            wrapped,
        }
    }

    pub fn advance(self, delta_ms: f64) -> Self {
        self.step(delta_ms).clock
    }

    pub fn advance_frame(self, frame: &Frame) -> Self {
        self.advance(frame.delta_ms)
    }

    /// `[time, time + time_window]`.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::starting_at(self.time, self.params.time_window_ms)
    }
}
