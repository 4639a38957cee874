use std::fmt;
use std::fs;
use std::path::Path;

use foundation::bounds::LonLatBounds;
use foundation::math::GeoPoint;
use foundation::math::precision::canonical_f64;
use scene::animator::{ContentKey, FlightAnimator};
use scene::flights::Flight;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One flight as stored in a flights JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// `[lon, lat]`, degrees.
    pub start: [f64; 2],
    pub end: [f64; 2],
    /// Percent along the route, 0..=100.
    #[serde(default)]
    pub progress: f64,
}

#[derive(Debug)]
pub enum FlightsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidCoordinate { index: usize, field: &'static str },
    InvalidProgress { index: usize, value: f64 },
}

impl fmt::Display for FlightsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightsError::Io(err) => write!(f, "I/O error: {err}"),
            FlightsError::Parse(err) => write!(f, "Flights parse error: {err}"),
            FlightsError::InvalidCoordinate { index, field } => {
                write!(f, "Flight {index}: {field} is not a valid lon/lat pair")
            }
            FlightsError::InvalidProgress { index, value } => {
                write!(f, "Flight {index}: progress {value} is outside 0..=100")
            }
        }
    }
}

impl std::error::Error for FlightsError {}

fn valid_lon_lat(p: [f64; 2]) -> bool {
    let [lon, lat] = p;
    lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat)
}

impl FlightRecord {
    pub fn validate(&self, index: usize) -> Result<Flight, FlightsError> {
        if !valid_lon_lat(self.start) {
            return Err(FlightsError::InvalidCoordinate {
                index,
                field: "start",
            });
        }
        if !valid_lon_lat(self.end) {
            return Err(FlightsError::InvalidCoordinate { index, field: "end" });
        }
        if !self.progress.is_finite() || !(0.0..=100.0).contains(&self.progress) {
            return Err(FlightsError::InvalidProgress {
                index,
                value: self.progress,
            });
        }
        Ok(Flight::new(
            GeoPoint::from(self.start),
            GeoPoint::from(self.end),
            self.progress,
        ))
    }
}

/// A validated flight list plus its content key.
///
/// The key only depends on coordinate and progress values, so reformatting a
/// file does not force downstream rebuilds.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSet {
    flights: Vec<Flight>,
    key: ContentKey,
}

impl FlightSet {
    pub fn from_records(records: &[FlightRecord]) -> Result<Self, FlightsError> {
        let flights = records
            .iter()
            .enumerate()
            .map(|(i, r)| r.validate(i))
            .collect::<Result<Vec<_>, _>>()?;
        let key = content_key(&flights);
        Ok(Self { flights, key })
    }

    pub fn from_json_str(payload: &str) -> Result<Self, FlightsError> {
        let records: Vec<FlightRecord> =
            serde_json::from_str(payload).map_err(FlightsError::Parse)?;
        Self::from_records(&records)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlightsError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(FlightsError::Io)?;
        let set = Self::from_json_str(&payload)?;
        info!(
            path = %path.display(),
            flights = set.len(),
            key = %set.key_hex(),
            "loaded flight set"
        );
        Ok(set)
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn key(&self) -> ContentKey {
        self.key
    }

    pub fn key_hex(&self) -> String {
        blake3::Hash::from(self.key).to_hex().to_string()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Hand the set to `animator` keyed by its content hash. Returns `true`
    /// when the animator rebuilt.
    pub fn apply_to(&self, animator: &mut FlightAnimator) -> bool {
        animator.set_flights(self.key, &self.flights)
    }

    /// Bounds of all origins and destinations.
    pub fn bounds(&self) -> Option<LonLatBounds> {
        let points: Vec<GeoPoint> = self.flights.iter().flat_map(|f| [f.start, f.end]).collect();
        LonLatBounds::from_points(&points)
    }

    pub fn to_records(&self) -> Vec<FlightRecord> {
        self.flights
            .iter()
            .map(|f| FlightRecord {
                start: f.start.as_array(),
                end: f.end.as_array(),
                progress: f.progress,
            })
            .collect()
    }
}

fn content_key(flights: &[Flight]) -> ContentKey {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(flights.len() as u64).to_le_bytes());
    for f in flights {
        for v in [f.start.lon, f.start.lat, f.end.lon, f.end.lat, f.progress] {
            hasher.update(&canonical_f64(v).to_le_bytes());
        }
    }
    *hasher.finalize().as_bytes()
}
