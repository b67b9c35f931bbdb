//! Conversion between Cartesian state vectors and classical orbital elements.
//!
//! Follows the textbook (Curtis) algorithm step for step. Every `acos` ambiguity is resolved by
//! the sign of one disambiguating quantity through [`reflect_angle`]. Arguments to `acos` are not
//! clamped, so degenerate inputs (zero vectors, exactly circular orbits) surface as NaN rather
//! than as an error.

use orbit_core::constants::{MU_EARTH, TWO_PI};
use orbit_core::matrix;
use orbit_core::vector::{self, Vector3};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::elements::OrbitalElements;
use crate::frame::perifocal_to_geocentric;

/// Position (km) and velocity (km/s) in the geocentric-equatorial inertial frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianState {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl CartesianState {
    pub fn new(position: Vector3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }

    pub fn to_elements(&self) -> OrbitalElements {
        to_elements(&self.position, &self.velocity)
    }
}

impl OrbitalElements {
    pub fn to_cartesian(&self) -> CartesianState {
        to_cartesian(self)
    }
}

/// Keep the principal angle when `disambiguator >= 0`, otherwise take `2π - principal`.
#[inline]
pub fn reflect_angle(principal: f64, disambiguator: f64) -> f64 {
    if disambiguator >= 0.0 {
        principal
    } else {
        TWO_PI - principal
    }
}

/// Classical elements from a geocentric-equatorial position/velocity pair.
pub fn to_elements(position: &Vector3, velocity: &Vector3) -> OrbitalElements {
    let r = vector::norm(position);
    let v = vector::norm(velocity);
    let v_radial = vector::dot(position, velocity) / r;

    let h_vec = vector::cross(position, velocity);
    let h = vector::norm(&h_vec);

    let inclination = (h_vec[2] / h).acos();

    // Equatorial orbits have no node line; measure from the x axis instead.
    let mut node = vector::cross(&[0.0, 0.0, 1.0], &h_vec);
    if vector::is_zero(&node) {
        trace!("equatorial orbit, node line taken along x");
        node = [1.0, 0.0, 0.0];
    }
    let n = vector::norm(&node);

    let raan = reflect_angle((node[0] / n).acos(), node[1]);

    let e_vec = vector::scale(
        &vector::sub(
            &vector::scale(position, v * v - MU_EARTH / r),
            &vector::scale(velocity, r * v_radial),
        ),
        1.0 / MU_EARTH,
    );
    let e = vector::norm(&e_vec);

    let arg_perigee = reflect_angle((vector::dot(&node, &e_vec) / (n * e)).acos(), e_vec[2]);
    let theta = reflect_angle((vector::dot(&e_vec, position) / (e * r)).acos(), v_radial);

    OrbitalElements {
        theta,
        h,
        e,
        raan,
        inclination,
        arg_perigee,
    }
}

/// Geocentric-equatorial position and velocity for an element set.
pub fn to_cartesian(elements: &OrbitalElements) -> CartesianState {
    let OrbitalElements { theta, h, e, .. } = *elements;
    let (sin_theta, cos_theta) = theta.sin_cos();

    let radius = h * h / MU_EARTH / (1.0 + e * cos_theta);
    let position_perifocal = vector::scale(&[cos_theta, sin_theta, 0.0], radius);
    let velocity_perifocal = vector::scale(&[-sin_theta, e + cos_theta, 0.0], MU_EARTH / h);

    let rotation = perifocal_to_geocentric(elements);
    CartesianState {
        position: matrix::mul_vec(&rotation, &position_perifocal),
        velocity: matrix::mul_vec(&rotation, &velocity_perifocal),
    }
}
