//! # Heliocentric projection
//!
//! Rotation of a position given in the orbital plane (distance `r`, true anomaly `v`) into
//! heliocentric ecliptic Cartesian coordinates, using the argument of perihelion `ω`, the
//! longitude of the ascending node `Ω` and the inclination `i`.
//!
//! Two equivalent paths are provided:
//!
//! - [`project`]: closed-form expressions of the rotated components;
//! - [`perifocal_to_ecliptic`]: the rotation matrix `Rz(Ω)·Rx(i)·Rz(ω)` assembled from
//!   elementary rotations ([`rotmt`]), to be applied to perifocal vectors.
use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    constants::{AstronomicalUnit, Radian},
    kepler::principal_angle,
};

/// Coordinate axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation matrix of angle `alpha` (rad, counter-clockwise) around `axis`.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation from the perifocal frame (x towards perihelion, z along the orbit normal) to the
/// heliocentric ecliptic frame.
///
/// Arguments
/// ---------
/// * `periapsis_argument`: ω (rad)
/// * `ascending_node_longitude`: Ω (rad)
/// * `inclination`: i (rad)
///
/// Return
/// ------
/// * `Rz(Ω)·Rx(i)·Rz(ω)`
pub fn perifocal_to_ecliptic(
    periapsis_argument: Radian,
    ascending_node_longitude: Radian,
    inclination: Radian,
) -> Matrix3<f64> {
    rotmt(ascending_node_longitude, Axis::Z)
        * rotmt(inclination, Axis::X)
        * rotmt(periapsis_argument, Axis::Z)
}

/// Heliocentric ecliptic Cartesian position, in the length unit of the semi-major axis (AU).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeliocentricPosition {
    pub x: AstronomicalUnit,
    pub y: AstronomicalUnit,
    pub z: AstronomicalUnit,
}

impl HeliocentricPosition {
    pub fn new(x: AstronomicalUnit, y: AstronomicalUnit, z: AstronomicalUnit) -> Self {
        HeliocentricPosition { x, y, z }
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Distance to the Sun.
    pub fn distance(&self) -> AstronomicalUnit {
        self.to_vector().norm()
    }

    /// Heliocentric ecliptic longitude, in `[0, 2π)`.
    pub fn ecliptic_longitude(&self) -> Radian {
        principal_angle(self.y.atan2(self.x))
    }

    /// Heliocentric ecliptic latitude, in `[-π/2, π/2]`.
    pub fn ecliptic_latitude(&self) -> Radian {
        self.z.atan2(self.x.hypot(self.y))
    }
}

impl From<Vector3<f64>> for HeliocentricPosition {
    fn from(v: Vector3<f64>) -> Self {
        HeliocentricPosition::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for HeliocentricPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x = {:+.8} AU, y = {:+.8} AU, z = {:+.8} AU",
            self.x, self.y, self.z
        )
    }
}

/// Heliocentric ecliptic coordinates of a body at distance `r` and true anomaly `v`.
///
/// ```text
/// xh = r·(cos Ω·cos(v+ω) − sin Ω·sin(v+ω)·cos i)
/// yh = r·(sin Ω·cos(v+ω) + cos Ω·sin(v+ω)·cos i)
/// zh = r·(sin(v+ω)·sin i)
/// ```
pub fn project(
    radius: AstronomicalUnit,
    true_anomaly: Radian,
    periapsis_argument: Radian,
    ascending_node_longitude: Radian,
    inclination: Radian,
) -> HeliocentricPosition {
    let (sin_u, cos_u) = (true_anomaly + periapsis_argument).sin_cos();
    let (sin_n, cos_n) = ascending_node_longitude.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();

    HeliocentricPosition {
        x: radius * (cos_n * cos_u - sin_n * sin_u * cos_i),
        y: radius * (sin_n * cos_u + cos_n * sin_u * cos_i),
        z: radius * (sin_u * sin_i),
    }
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use crate::constants::RADEG;
    use approx::assert_relative_eq;

    fn assert_position_eq(a: &HeliocentricPosition, b: &HeliocentricPosition, tol: f64) {
        assert_relative_eq!(a.x, b.x, epsilon = tol);
        assert_relative_eq!(a.y, b.y, epsilon = tol);
        assert_relative_eq!(a.z, b.z, epsilon = tol);
    }

    #[test]
    fn test_identity_rotation() {
        let pos = project(1.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(pos, HeliocentricPosition::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotmt() {
        let rot = rotmt(90.0 * RADEG, Axis::Z);
        let v = rot * Vector3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(v, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-15);

        let rot = rotmt(90.0 * RADEG, Axis::X);
        let v = rot * Vector3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(v, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-15);

        let rot = rotmt(0.3, Axis::Y);
        assert_relative_eq!(rot * rot.transpose(), Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_project_matches_rotation_matrix() {
        let cases = [
            (1.2, 0.3, 1.1, 2.2, 0.4),
            (0.98, 5.9, 4.9, 0.0, 1e-5),
            (30.1, 3.0, 0.8, 2.3, 0.03),
            (2.0, 1.0, 2.0, 3.0, 170.0 * RADEG),
        ];
        for (r, v, w, n, i) in cases {
            let closed_form = project(r, v, w, n, i);
            let perifocal = Vector3::new(r * v.cos(), r * v.sin(), 0.0);
            let rotated: HeliocentricPosition = (perifocal_to_ecliptic(w, n, i) * perifocal).into();
            assert_position_eq(&closed_form, &rotated, 1e-12);
            assert_relative_eq!(closed_form.distance(), r, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_polar_orbit() {
        // argument of latitude 90° on a polar orbit: straight above the ecliptic
        let pos = project(2.0, 90.0 * RADEG, 0.0, 0.0, 90.0 * RADEG);
        assert_position_eq(&pos, &HeliocentricPosition::new(0.0, 0.0, 2.0), 1e-12);
        assert_relative_eq!(pos.ecliptic_latitude(), 90.0 * RADEG, epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_angles() {
        let pos = HeliocentricPosition::new(-1.0, -1.0, 0.0);
        assert_relative_eq!(pos.ecliptic_longitude(), 225.0 * RADEG, epsilon = 1e-12);
        assert_eq!(pos.ecliptic_latitude(), 0.0);

        let pos = HeliocentricPosition::new(1.0, 0.0, -1.0);
        assert_relative_eq!(pos.ecliptic_latitude(), -45.0 * RADEG, epsilon = 1e-12);
        assert_relative_eq!(pos.distance(), 2f64.sqrt(), epsilon = 1e-15);
    }
}
