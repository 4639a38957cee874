//! Lon/lat to scene-space projections used by the globe and flat map views.

use super::geodesy::GeoPoint;
use super::vec::{Vec2, Vec3};

/// Which way a view is drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Projection {
    /// 3D sphere.
    #[default]
    Globe,
    /// Flat web-mercator style map.
    Mercator,
}

impl Projection {
    pub fn is_flat(self) -> bool {
        matches!(self, Projection::Mercator)
    }
}

/// Point on a sphere of `radius` centred at the origin, z towards the north
/// pole and x through (0°, 0°).
pub fn to_sphere(p: GeoPoint, radius: f64) -> Vec3 {
    let (lon, lat) = p.to_radians();
    Vec3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.cos() * lon.sin(),
        radius * lat.sin(),
    )
}

/// Inverse of [`to_sphere`], ignoring the radius.
pub fn from_sphere(v: Vec3) -> GeoPoint {
    let lat = v.z.atan2((v.x * v.x + v.y * v.y).sqrt());
    let lon = v.y.atan2(v.x);
    GeoPoint::new(lon.to_degrees(), lat.to_degrees())
}

/// Equirectangular plane position; ±180° longitude maps to ±`scale`.
pub fn to_plane(p: GeoPoint, scale: f64) -> Vec2 {
    Vec2::new(p.lon / 180.0 * scale, p.lat / 180.0 * scale)
}

/// Whether a point on a sphere centred at the origin is on the hemisphere
/// facing `camera`.
pub fn faces_camera(camera: Vec3, point: Vec3) -> bool {
    camera.normalize().dot(point.normalize()) > 0.0
}
