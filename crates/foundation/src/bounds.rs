use crate::math::GeoPoint;

/// Axis-aligned lon/lat box in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LonLatBounds {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

/// Parameters for fitting a zoom level to a box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomFit {
    /// Zoom levels lost per degree of extent.
    pub scale: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ZoomFit {
    fn default() -> Self {
        Self {
            scale: 5.0,
            min_zoom: 3.0,
            max_zoom: 9.0,
        }
    }
}

impl LonLatBounds {
    pub fn new(min: GeoPoint, max: GeoPoint) -> Self {
        Self { min, max }
    }

    /// Tight bounds of `points`, skipping non-finite ones. `None` when nothing
    /// finite is left.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Option<Self> {
        let mut out: Option<Self> = None;
        for p in points.into_iter().filter(|p| p.is_finite()) {
            out = Some(match out {
                None => Self::new(*p, *p),
                Some(b) => Self::new(
                    GeoPoint::new(b.min.lon.min(p.lon), b.min.lat.min(p.lat)),
                    GeoPoint::new(b.max.lon.max(p.lon), b.max.lat.max(p.lat)),
                ),
            });
        }
        out
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min.lon + self.max.lon) / 2.0,
            (self.min.lat + self.max.lat) / 2.0,
        )
    }

    /// Larger of the lon and lat extents (degrees).
    pub fn max_extent(&self) -> f64 {
        (self.max.lon - self.min.lon).max(self.max.lat - self.min.lat)
    }

    /// Zoom level that keeps the box in view: `max_zoom - extent * scale`,
    /// clamped to `[min_zoom, max_zoom]`.
    pub fn zoom_level(&self, fit: ZoomFit) -> f64 {
        (fit.max_zoom - self.max_extent() * fit.scale).clamp(fit.min_zoom, fit.max_zoom)
    }
}
