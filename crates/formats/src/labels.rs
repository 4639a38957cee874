use std::fmt;
use std::fs;
use std::path::Path;

use foundation::math::GeoPoint;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryLabel {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl CountryLabel {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lon, self.lat)
    }
}

/// `{ "countries": [...] }` label file.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryLabels {
    pub countries: Vec<CountryLabel>,
}

#[derive(Debug)]
pub enum LabelsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for LabelsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelsError::Io(err) => write!(f, "I/O error: {err}"),
            LabelsError::Parse(err) => write!(f, "Labels parse error: {err}"),
        }
    }
}

impl std::error::Error for LabelsError {}

impl CountryLabels {
    pub fn from_json_str(payload: &str) -> Result<Self, LabelsError> {
        serde_json::from_str(payload).map_err(LabelsError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LabelsError> {
        let payload = fs::read_to_string(path).map_err(LabelsError::Io)?;
        let labels = Self::from_json_str(&payload)?;
        info!(labels = labels.countries.len(), "loaded country labels");
        Ok(labels)
    }

    /// `(name, position)` pairs, the shape label layers consume.
    pub fn anchors(&self) -> impl Iterator<Item = (&str, GeoPoint)> {
        self.countries.iter().map(|c| (c.name.as_str(), c.point()))
    }
}
