//! Decorative rotating cube
//!
//! Purely cosmetic: nothing in the simulation reads it. The renderer rotates
//! the pulsing cube corners, projects them and draws the twelve edges.

use std::f64::consts::TAU;

use glam::{DMat3, DVec2, DVec3};

/// Euler-angle rotation with constant angular rates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation3D {
    /// (x, y, z) angles in radians, each kept in [0, 2π)
    angles: DVec3,
    /// Radians per second
    rates: DVec3,
    matrix: DMat3,
}

impl Default for Rotation3D {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DVec3::ZERO)
    }
}

impl Rotation3D {
    pub fn new(angles: DVec3, rates: DVec3) -> Self {
        let mut rotation = Self {
            angles: wrap(angles),
            rates,
            matrix: DMat3::IDENTITY,
        };
        rotation.recompute();
        rotation
    }

    pub fn angles(&self) -> DVec3 {
        self.angles
    }

    pub fn rates(&self) -> DVec3 {
        self.rates
    }

    /// Combined matrix M = Rz·Ry·Rx
    pub fn matrix(&self) -> DMat3 {
        self.matrix
    }

    pub fn set_angles(&mut self, angles: DVec3) {
        self.angles = wrap(angles);
        self.recompute();
    }

    pub fn set_rates(&mut self, rates: DVec3) {
        self.rates = rates;
    }

    /// Advance the angles by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        self.angles = wrap(self.angles + self.rates * dt);
        self.recompute();
    }

    #[inline]
    pub fn rotate_point(&self, p: DVec3) -> DVec3 {
        self.matrix * p
    }

    pub fn rotate_points(&self, points: &[DVec3]) -> Vec<DVec3> {
        points.iter().map(|&p| self.matrix * p).collect()
    }

    fn recompute(&mut self) {
        self.matrix = DMat3::from_rotation_z(self.angles.z)
            * DMat3::from_rotation_y(self.angles.y)
            * DMat3::from_rotation_x(self.angles.x);
    }
}

fn wrap(angles: DVec3) -> DVec3 {
    DVec3::new(
        angles.x.rem_euclid(TAU),
        angles.y.rem_euclid(TAU),
        angles.z.rem_euclid(TAU),
    )
}

/// Pinhole projection onto the screen plane around `center`
#[inline]
pub fn project_perspective(point: DVec3, center: DVec2, fov: f64, z_offset: f64) -> DVec2 {
    let f = fov / (point.z + z_offset).max(1e-6);
    center + DVec2::new(point.x, point.y) * f
}

/// Corner pairs joined by an edge; corner i has bits (x, y, z) = (i>>2, i>>1, i) & 1
pub const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (1, 3),
    (1, 5),
    (2, 3),
    (2, 6),
    (3, 7),
    (4, 5),
    (4, 6),
    (5, 7),
    (6, 7),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeModel {
    /// Half edge length at rest (pixels)
    pub base_size: f64,
    pub pulse_amplitude: f64,
    /// Radians per second
    pub pulse_speed: f64,
    pub fov: f64,
    pub z_offset: f64,
    pub rotation: Rotation3D,
}

impl Default for CubeModel {
    fn default() -> Self {
        Self {
            base_size: 27.0,
            pulse_amplitude: 2.0,
            pulse_speed: 15.0,
            fov: 400.0,
            z_offset: 200.0,
            rotation: Rotation3D::new(DVec3::ZERO, DVec3::new(1.2, 0.9, 0.6)),
        }
    }
}

impl CubeModel {
    pub fn half_size(&self, time_secs: f64) -> f64 {
        self.base_size + self.pulse_amplitude * (time_secs * self.pulse_speed).sin()
    }

    /// Unrotated corners at `time_secs`
    pub fn vertices(&self, time_secs: f64) -> [DVec3; 8] {
        let s = self.half_size(time_secs);
        std::array::from_fn(|i| {
            let pick = |bit: usize| if (i >> bit) & 1 == 1 { s } else { -s };
            DVec3::new(pick(2), pick(1), pick(0))
        })
    }

    pub fn update(&mut self, dt: f64) {
        self.rotation.update(dt);
    }

    /// Screen-space line segments for the current rotation
    pub fn projected_edges(&self, time_secs: f64, center: DVec2) -> [(DVec2, DVec2); 12] {
        let projected = self
            .vertices(time_secs)
            .map(|v| project_perspective(self.rotation.rotate_point(v), center, self.fov, self.z_offset));
        EDGES.map(|(a, b)| (projected[a], projected[b]))
    }
}
