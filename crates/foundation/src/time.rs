/// A point on the animation timeline, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

/// Closed interval `[start, end]` on the animation timeline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start: Time(start),
            end: Time(end),
        }
    }

    pub fn forever() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn instant(t: Time) -> Self {
        Self { start: t, end: t }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Endpoint-inclusive overlap.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        !(self.end.0 < other.start.0 || self.start.0 > other.end.0)
    }
}

/// Sliding `[lo, hi]` window of the animation clock.
///
/// Arcs are drawn only where their interpolated timestamp falls inside the
/// window, faded linearly from `lo` (transparent) to `hi` (opaque).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeWindow {
    pub lo: f64,
    pub hi: f64,
}

impl TimeWindow {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Window of `width` starting at `clock`.
    pub fn starting_at(clock: f64, width: f64) -> Self {
        Self::new(clock, clock + width)
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.lo && t <= self.hi
    }

    /// Whether `[start, end]` intersects the window (endpoints inclusive).
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        start <= self.hi && end >= self.lo
    }

    /// Linear fade factor `(t - lo) / (hi - lo)`; 0 for an empty window.
    pub fn fade(&self, t: f64) -> f64 {
        let w = self.width();
        if w <= 0.0 || !w.is_finite() {
            return 0.0;
        }
        (t - self.lo) / w
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.lo, self.hi]
    }

    pub fn as_span(&self) -> TimeSpan {
        TimeSpan::new(self.lo, self.hi)
    }
}
