//! Drag-to-rotate globe camera with momentum.
//!
//! The camera sits on a sphere around the globe centre, described by a polar
//! angle `phi` (0 at the +y pole) and an azimuth `theta` around +y. Dragging
//! sets an angular velocity; after release the velocity keeps rotating the
//! camera and decays each frame.

use core::f64::consts::{FRAC_PI_2, PI};

use foundation::math::{GeoPoint, Vec3, to_sphere};

use crate::frame::steps_for;

/// Radians of rotation per pixel of drag, before `rotate_speed`.
pub const DRAG_RADIANS_PER_PIXEL: f64 = 0.002;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitParams {
    pub rotate_speed: f64,
    /// Velocity multiplier per reference frame after release.
    pub damping: f64,
    /// Momentum stops once both velocity components are at or below this.
    pub min_velocity: f64,
    /// Keeps `phi` this far away from either pole.
    pub polar_margin: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            rotate_speed: 0.5,
            damping: 0.95,
            min_velocity: 0.001,
            polar_margin: 0.1,
            min_distance: 500.0,
            max_distance: 1200.0,
        }
    }
}

/// Camera position readout, degrees and scene units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraInfo {
    pub lat: f64,
    pub lon: f64,
    pub distance: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitState {
    pub theta: f64,
    pub phi: f64,
    pub radius: f64,
    pub velocity: [f64; 2],
    pub dragging: bool,
    last_pointer: [f64; 2],
    params: OrbitParams,
}

impl OrbitState {
    pub fn from_position(position: Vec3, params: OrbitParams) -> Self {
        let radius = position.length();
        let (theta, phi) = if radius == 0.0 {
            (0.0, FRAC_PI_2)
        } else {
            (
                position.x.atan2(position.z),
                (position.y / radius).clamp(-1.0, 1.0).acos(),
            )
        };
        Self {
            theta,
            phi,
            radius,
            velocity: [0.0, 0.0],
            dragging: false,
            last_pointer: [0.0, 0.0],
            params,
        }
    }

    /// Camera `distance` away from the centre, above `target` on the globe.
    ///
    /// The globe is z-up while orbit angles are y-up, so [`Self::camera_info`]
    /// does not echo `target` back.
    pub fn looking_at(target: GeoPoint, distance: f64, params: OrbitParams) -> Self {
        Self::from_position(to_sphere(target, distance), params)
    }

    pub fn params(&self) -> OrbitParams {
        self.params
    }

    pub fn position(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }

    /// Pointer pressed: start a drag and cancel any momentum.
    pub fn press(self, x: f64, y: f64) -> Self {
        Self {
            dragging: true,
            last_pointer: [x, y],
            velocity: [0.0, 0.0],
            ..self
        }
    }

    /// Pointer moved. Ignored unless a drag is in progress.
    pub fn drag(self, x: f64, y: f64) -> Self {
        if !self.dragging {
            return self;
        }
        let dx = x - self.last_pointer[0];
        let dy = y - self.last_pointer[1];
        let k = DRAG_RADIANS_PER_PIXEL * self.params.rotate_speed;
        let velocity = [dx * k, -dy * k];

        Self {
            velocity,
            last_pointer: [x, y],
            ..self.rotated(velocity[0], velocity[1])
        }
    }

    /// Pointer released; the last drag velocity is kept as momentum.
    pub fn release(self) -> Self {
        Self {
            dragging: false,
            ..self
        }
    }

    /// Apply momentum for a frame of `delta_ms`.
    pub fn tick(self, delta_ms: f64) -> Self {
        let [vx, vy] = self.velocity;
        let min = self.params.min_velocity;
        if self.dragging || (vx.abs() <= min && vy.abs() <= min) {
            return self;
        }

        let steps = steps_for(delta_ms);
        let decay = self.params.damping.powf(steps);
        Self {
            velocity: [vx * decay, vy * decay],
            ..self.rotated(vx * steps, vy * steps)
        }
    }

    /// Move towards (`factor < 1`) or away from the globe, within limits.
    pub fn zoom(self, factor: f64) -> Self {
        let radius =
            (self.radius * factor).clamp(self.params.min_distance, self.params.max_distance);
        Self { radius, ..self }
    }

    pub fn is_moving(&self) -> bool {
        let min = self.params.min_velocity;
        self.velocity[0].abs() > min || self.velocity[1].abs() > min
    }

    pub fn camera_info(&self) -> CameraInfo {
        CameraInfo {
            lat: (FRAC_PI_2 - self.phi).to_degrees(),
            lon: ((self.theta.to_degrees() + 180.0) % 360.0) - 180.0,
            distance: self.radius,
        }
    }

    fn rotated(self, d_theta: f64, d_phi: f64) -> Self {
        let margin = self.params.polar_margin;
        Self {
            theta: self.theta - d_theta,
            phi: (self.phi + d_phi).clamp(margin, PI - margin),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OrbitParams, OrbitState};
    use crate::frame::REFERENCE_FRAME_MS;
    use core::f64::consts::{FRAC_PI_2, PI};
    use foundation::math::{GeoPoint, Vec3};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn equator_camera() -> OrbitState {
        OrbitState::from_position(Vec3::new(0.0, 0.0, 600.0), OrbitParams::default())
    }

    #[test]
    fn position_round_trip() {
        let start = Vec3::new(120.0, -340.0, 410.0);
        let orbit = OrbitState::from_position(start, OrbitParams::default());
        let p = orbit.position();
        assert_close(p.x, start.x, 1e-9);
        assert_close(p.y, start.y, 1e-9);
        assert_close(p.z, start.z, 1e-9);
    }

    #[test]
    fn looking_at_keeps_distance() {
        let orbit =
            OrbitState::looking_at(GeoPoint::new(-88.08, 34.26), 600.0, OrbitParams::default());
        assert_close(orbit.camera_info().distance, 600.0, 1e-9);
    }

    #[test]
    fn drag_rotates_and_sets_velocity() {
        let orbit = equator_camera().press(100.0, 100.0).drag(110.0, 100.0);
        let k = 0.002 * 0.5;
        assert_close(orbit.velocity[0], 10.0 * k, 1e-15);
        assert_eq!(orbit.velocity[1], 0.0);
        assert_close(orbit.theta, -10.0 * k, 1e-15);
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let orbit = equator_camera();
        assert_eq!(orbit.drag(500.0, 500.0), orbit);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let orbit = equator_camera().press(0.0, 0.0).drag(0.0, -100_000.0);
        assert_close(orbit.phi, PI - 0.1, 1e-12);
        let orbit = equator_camera().press(0.0, 0.0).drag(0.0, 100_000.0);
        assert_close(orbit.phi, 0.1, 1e-12);
    }

    #[test]
    fn momentum_decays_after_release() {
        let released = equator_camera().press(0.0, 0.0).drag(40.0, 0.0).release();
        let v0 = released.velocity[0];

        let next = released.tick(REFERENCE_FRAME_MS);
        assert_close(next.velocity[0], v0 * 0.95, 1e-12);
        assert!(next.theta < released.theta);

        let mut s = next;
        for _ in 0..500 {
            s = s.tick(REFERENCE_FRAME_MS);
        }
        assert!(!s.is_moving());
        assert_eq!(s.tick(REFERENCE_FRAME_MS), s);
    }

    #[test]
    fn no_momentum_while_dragging() {
        let dragging = equator_camera().press(0.0, 0.0).drag(40.0, 0.0);
        assert_eq!(dragging.tick(REFERENCE_FRAME_MS), dragging);
    }

    #[test]
    fn zoom_respects_limits() {
        let orbit = equator_camera();
        assert_eq!(orbit.zoom(0.1).radius, 500.0);
        assert_eq!(orbit.zoom(10.0).radius, 1200.0);
    }

    #[test]
    fn camera_info_on_equator() {
        let info = equator_camera().camera_info();
        assert_close(info.lat, 0.0, 1e-9);
        assert_close(info.lon, 0.0, 1e-9);
        assert_close(FRAC_PI_2, equator_camera().phi, 1e-12);
    }
}
