/// Frame length (ms) that per-frame rates are expressed against.
///
/// A rate of `k` per frame means `k * delta_ms / REFERENCE_FRAME_MS` for a
/// frame of arbitrary length, so animations run at the same speed on 30, 60
/// or 144 Hz displays.
pub const REFERENCE_FRAME_MS: f64 = 16.67;

/// Deterministic frame metadata derived from host timestamps.
///
/// Hosts hand in the timestamp their animation-frame scheduler supplies; the
/// previous frame is the only state, so a recorded timestamp stream replays
/// identically.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Host timestamp of this frame (ms).
    pub timestamp_ms: f64,
    /// Time since the previous frame (ms). Never negative or NaN.
    pub delta_ms: f64,
}

impl Frame {
    /// First frame of a loop; it has no predecessor and therefore no delta.
    pub fn start(timestamp_ms: f64) -> Self {
        Self {
            index: 0,
            timestamp_ms,
            delta_ms: 0.0,
        }
    }

    pub fn next(self, timestamp_ms: f64) -> Self {
        let delta = timestamp_ms - self.timestamp_ms;
        Self {
            index: self.index + 1,
            timestamp_ms,
            delta_ms: sanitize_delta(delta),
        }
    }

    /// How many reference frames this frame is worth.
    pub fn steps(&self) -> f64 {
        steps_for(self.delta_ms)
    }
}

/// Reference-frame count for a raw delta; bad deltas count as no time.
pub fn steps_for(delta_ms: f64) -> f64 {
    sanitize_delta(delta_ms) / REFERENCE_FRAME_MS
}

fn sanitize_delta(delta_ms: f64) -> f64 {
    if delta_ms.is_finite() && delta_ms > 0.0 {
        delta_ms
    } else {
        0.0
    }
}
