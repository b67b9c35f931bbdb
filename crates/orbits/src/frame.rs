//! Rotations between the perifocal frame and the geocentric-equatorial frame.

use orbit_core::matrix::{self, Matrix3};

use crate::elements::OrbitalElements;

/// Rotation about the first axis.
pub fn r1(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]]
}

/// Rotation about the third axis.
pub fn r3(angle: f64) -> Matrix3 {
    let (s, c) = angle.sin_cos();
    [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]]
}

/// `R3(ω) · R1(i) · R3(Ω)`: geocentric-equatorial vectors into the perifocal frame.
pub fn geocentric_to_perifocal(elements: &OrbitalElements) -> Matrix3 {
    let node_and_tilt = matrix::mul(&r1(elements.inclination), &r3(elements.raan));
    matrix::mul(&r3(elements.arg_perigee), &node_and_tilt)
}

/// Perifocal vectors into the geocentric-equatorial frame (transpose of the forward rotation).
pub fn perifocal_to_geocentric(elements: &OrbitalElements) -> Matrix3 {
    matrix::transpose(&geocentric_to_perifocal(elements))
}
