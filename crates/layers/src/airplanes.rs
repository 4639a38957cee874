use foundation::math::{Projection, arc_height};
use scene::flights::Flight;

use crate::arcs::ArcLayerStyle;
use crate::layer::{Layer, LayerId, LayerKind};
use crate::symbology::{FlightPalette, Rgba8};

/// Percent of the route looked ahead to orient a marker.
pub const HEADING_LOOKAHEAD: f64 = 1.0;

/// Rotation that lines the airplane model up with its direction of travel.
///
/// Offsets depend on the model asset and on the renderer's axis convention,
/// which differs between the flat and the globe projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerCalibration {
    pub flat_yaw_offset: f64,
    pub globe_yaw_offset: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl MarkerCalibration {
    pub fn yaw_offset(&self, projection: Projection) -> f64 {
        if projection.is_flat() {
            self.flat_yaw_offset
        } else {
            self.globe_yaw_offset
        }
    }

    /// `[pitch, yaw, roll]` in degrees for a marker heading `bearing`.
    pub fn orientation(&self, bearing: f64, projection: Projection) -> [f64; 3] {
        [self.pitch, -bearing + self.yaw_offset(projection), self.roll]
    }
}

impl Default for MarkerCalibration {
    fn default() -> Self {
        Self {
            flat_yaw_offset: 90.0,
            globe_yaw_offset: -90.0,
            pitch: 0.0,
            roll: 90.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AirplaneData {
    /// `[lon, lat, altitude]`, altitude on the arc profile.
    pub position: [f64; 3],
    /// `[pitch, yaw, roll]`, degrees.
    pub orientation: [f64; 3],
    pub flight_index: usize,
}

/// Marker for `flight`: on the great circle at its progress, lifted onto the
/// arc and turned towards the point one percent further along.
pub fn airplane_data(
    flight: &Flight,
    index: usize,
    projection: Projection,
    calibration: &MarkerCalibration,
    arc_height_multiplier: f64,
) -> AirplaneData {
    let here = flight.position();
    let heading = flight.heading();
    let altitude = arc_height(
        flight.distance_m(),
        0.0,
        0.0,
        flight.progress / 100.0,
        arc_height_multiplier,
    );

    AirplaneData {
        position: [here.lon, here.lat, altitude],
        orientation: calibration.orientation(heading, projection),
        flight_index: index,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirplaneLayerSnapshot {
    pub airplanes: Vec<AirplaneData>,
    pub colors: Vec<Rgba8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirplaneLayer {
    id: LayerId,
    pub projection: Projection,
    pub calibration: MarkerCalibration,
    /// Must match the arc layer's height or markers float off their arcs.
    pub arc_height: f64,
    pub palette: FlightPalette,
    pub selected: Option<usize>,
}

impl AirplaneLayer {
    /// Markers ride the arcs drawn with `arcs`.
    pub fn new(id: u64, projection: Projection, arcs: &ArcLayerStyle) -> Self {
        Self {
            id: LayerId(id),
            projection,
            calibration: MarkerCalibration::default(),
            arc_height: arcs.height,
            palette: FlightPalette::default(),
            selected: None,
        }
    }

    pub fn extract(&self, flights: &[Flight]) -> AirplaneLayerSnapshot {
        let airplanes: Vec<AirplaneData> = flights
            .iter()
            .enumerate()
            .map(|(i, f)| airplane_data(f, i, self.projection, &self.calibration, self.arc_height))
            .collect();
        let colors = airplanes
            .iter()
            .map(|a| self.palette.airplane(self.selected == Some(a.flight_index)))
            .collect();
        AirplaneLayerSnapshot { airplanes, colors }
    }
}

impl Layer for AirplaneLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Airplanes
    }
}
