//! Coastline and border polylines for the three view modes.
//!
//! Flat maps wrap at ±180°, so lines are split there. Globe lines are densified
//! before they are lifted onto the sphere, otherwise long edges cut chords
//! through it. The plane view is a straight equirectangular scale.

use foundation::math::{
    DEFAULT_DENSIFY_THRESHOLD_DEG, GeoPoint, Vec2, Vec3, interpolate_coordinates,
    split_at_antimeridian, to_plane, to_sphere,
};

use formats::AnimationConfig;

use crate::layer::{Layer, LayerId, LayerKind};
use crate::symbology::LayerStyle;

/// Radius of the globe mesh in scene units.
pub const GLOBE_RADIUS: f64 = 150.0;
/// Lines float slightly above the globe surface.
pub const LINE_RADIUS: f64 = GLOBE_RADIUS * 1.43;

/// Runs of a flat-map line set, none of which crosses the antimeridian.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PolylineSegmentSet {
    pub runs: Vec<Vec<GeoPoint>>,
}

impl PolylineSegmentSet {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a [GeoPoint]>) -> Self {
        let mut runs = Vec::new();
        for line in lines {
            runs.extend(split_at_antimeridian(line));
        }
        Self { runs }
    }

    pub fn vertex_count(&self) -> usize {
        self.runs.iter().map(Vec::len).sum()
    }
}

/// Densify `coords` and lift it onto a sphere of `radius`.
pub fn sphere_polyline(coords: &[GeoPoint], radius: f64, threshold_deg: f64) -> Vec<Vec3> {
    interpolate_coordinates(coords, threshold_deg)
        .into_iter()
        .map(|p| to_sphere(p, radius))
        .collect()
}

pub fn plane_polyline(coords: &[GeoPoint], scale: f64) -> Vec<Vec2> {
    coords.iter().map(|p| to_plane(*p, scale)).collect()
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LineMode {
    /// Lon/lat runs for a flat web map.
    Flat,
    Sphere { radius: f64 },
    Plane { scale: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineGeometry {
    Flat(PolylineSegmentSet),
    Sphere(Vec<Vec<Vec3>>),
    Plane(Vec<Vec<Vec2>>),
}

impl LineGeometry {
    pub fn line_count(&self) -> usize {
        match self {
            LineGeometry::Flat(set) => set.runs.len(),
            LineGeometry::Sphere(lines) => lines.len(),
            LineGeometry::Plane(lines) => lines.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinesLayerSnapshot {
    pub style: LayerStyle,
    pub geometry: LineGeometry,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinesLayer {
    id: LayerId,
    pub mode: LineMode,
    pub style: LayerStyle,
    pub densify_threshold_deg: f64,
}

impl LinesLayer {
    pub fn new(id: u64, mode: LineMode) -> Self {
        Self {
            id: LayerId(id),
            mode,
            style: LayerStyle::default(),
            densify_threshold_deg: DEFAULT_DENSIFY_THRESHOLD_DEG,
        }
    }

    pub fn with_config(id: u64, mode: LineMode, config: &AnimationConfig) -> Self {
        Self {
            densify_threshold_deg: config.densify_threshold_deg,
            ..Self::new(id, mode)
        }
    }

    /// Geometry for `lines`; lines with fewer than two vertices are skipped.
    pub fn extract(&self, lines: &[Vec<GeoPoint>]) -> LinesLayerSnapshot {
        let usable = lines.iter().filter(|l| l.len() >= 2).map(Vec::as_slice);

        let geometry = match self.mode {
            LineMode::Flat => LineGeometry::Flat(PolylineSegmentSet::from_lines(usable)),
            LineMode::Sphere { radius } => LineGeometry::Sphere(
                usable
                    .map(|l| sphere_polyline(l, radius, self.densify_threshold_deg))
                    .collect(),
            ),
            LineMode::Plane { scale } => {
                LineGeometry::Plane(usable.map(|l| plane_polyline(l, scale)).collect())
            }
        };

        LinesLayerSnapshot {
            style: self.style,
            geometry,
        }
    }
}

impl Layer for LinesLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Lines
    }
}
