use std::fmt;
use std::fs;
use std::path::Path;

use runtime::clock::ClockParams;
use scene::animator::AnimatorSettings;
use scene::flights::CycleSchedule;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Animation tunables. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Clock advance per reference frame (timeline ms).
    pub animation_speed: f64,
    pub time_window_ms: f64,
    pub flight_duration_ms: f64,
    pub num_cycles: u32,
    /// Arc apex multiplier. Markers use the same one so they stay on their
    /// arcs.
    pub arc_height: f64,
    pub stagger_ms: f64,
    pub group_size: usize,
    pub arc_width: f64,
    pub num_segments: usize,
    pub densify_threshold_deg: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            animation_speed: 10.0,
            time_window_ms: 4000.0,
            flight_duration_ms: 2000.0,
            num_cycles: 30,
            arc_height: 0.3,
            stagger_ms: 200.0,
            group_size: 2500,
            arc_width: 2.0,
            num_segments: 100,
            densify_threshold_deg: 5.0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "Config parse error: {err}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AnimationConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload).map_err(ConfigError::Parse)?;
        if let Err(err) = config.validate() {
            warn!("rejected animation config: {err}");
            return Err(err);
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&payload)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("animation_speed", self.animation_speed),
            ("arc_height", self.arc_height),
            ("stagger_ms", self.stagger_ms),
            ("arc_width", self.arc_width),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        let positive = [
            ("time_window_ms", self.time_window_ms),
            ("flight_duration_ms", self.flight_duration_ms),
            ("densify_threshold_deg", self.densify_threshold_deg),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, positive number (got {value})"
                )));
            }
        }

        if self.group_size == 0 {
            return Err(ConfigError::Invalid("group_size must be at least 1".to_string()));
        }
        if self.num_segments == 0 {
            return Err(ConfigError::Invalid("num_segments must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn schedule(&self) -> CycleSchedule {
        CycleSchedule {
            num_cycles: self.num_cycles,
            duration_ms: self.flight_duration_ms,
            stagger_ms: self.stagger_ms,
        }
    }

    pub fn clock_params(&self) -> ClockParams {
        ClockParams::for_schedule(
            self.animation_speed,
            self.flight_duration_ms,
            self.num_cycles,
            self.time_window_ms,
        )
    }

    pub fn animator_settings(&self) -> AnimatorSettings {
        AnimatorSettings::new(
            self.schedule(),
            self.animation_speed,
            self.time_window_ms,
            self.group_size,
        )
    }
}
