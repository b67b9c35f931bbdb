//! `Orbit` aggregate: one element set plus the quantities derived from it.

use log::warn;
use orbit_core::constants::{MU_EARTH, TWO_PI};
use serde::{Deserialize, Serialize};

use crate::elements::OrbitalElements;
use crate::propagation;
use crate::state::{CartesianState, to_cartesian, to_elements};

/// Upper bound on the number of samples [`Orbit::path_points`] will produce.
pub const MAX_PATH_POINTS: usize = 1_000_000;

/// A closed orbit about Earth described by its classical elements.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orbit {
    elements: OrbitalElements,
}

impl From<OrbitalElements> for Orbit {
    fn from(elements: OrbitalElements) -> Self {
        Self::from_elements(elements)
    }
}

impl From<CartesianState> for Orbit {
    fn from(state: CartesianState) -> Self {
        Self::from_state(&state)
    }
}

impl Orbit {
    pub fn from_elements(elements: OrbitalElements) -> Self {
        Self { elements }
    }

    pub fn from_state(state: &CartesianState) -> Self {
        Self {
            elements: to_elements(&state.position, &state.velocity),
        }
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    /// Replace the element set as a whole.
    pub fn set_elements(&mut self, elements: OrbitalElements) {
        self.elements = elements;
    }

    pub fn semi_major_axis(&self) -> f64 {
        let OrbitalElements { h, e, .. } = self.elements;
        h * h / (MU_EARTH * (1.0 - e * e))
    }

    pub fn r_perigee(&self) -> f64 {
        self.semi_major_axis() * (1.0 - self.elements.e)
    }

    pub fn r_apogee(&self) -> f64 {
        self.semi_major_axis() * (1.0 + self.elements.e)
    }

    pub fn v_perigee(&self) -> f64 {
        self.elements.h / self.r_perigee()
    }

    pub fn v_apogee(&self) -> f64 {
        self.elements.h / self.r_apogee()
    }

    /// Distance from Earth's centre at the current true anomaly.
    pub fn current_radius(&self) -> f64 {
        let OrbitalElements { theta, e, .. } = self.elements;
        self.semi_major_axis() * (1.0 - e * e) / (1.0 + e * theta.cos())
    }

    pub fn radial_velocity(&self) -> f64 {
        self.radial_velocity_at_theta(self.elements.theta)
    }

    pub fn azimuthal_velocity(&self) -> f64 {
        self.elements.h / self.current_radius()
    }

    /// Speed at the current true anomaly.
    pub fn velocity(&self) -> f64 {
        self.radial_velocity().hypot(self.azimuthal_velocity())
    }

    /// Orbital period from the semi-major axis, `2π a^1.5 / √μ`.
    pub fn period(&self) -> f64 {
        TWO_PI / MU_EARTH.sqrt() * self.semi_major_axis().powf(1.5)
    }

    /// Angle between the velocity and the local horizon.
    pub fn flight_path_angle(&self) -> f64 {
        (self.radial_velocity() / self.azimuthal_velocity()).atan()
    }

    pub fn radius_at_theta(&self, theta: f64) -> f64 {
        let OrbitalElements { h, e, .. } = self.elements;
        h * h / MU_EARTH / (1.0 + e * theta.cos())
    }

    pub fn azimuthal_velocity_at_theta(&self, theta: f64) -> f64 {
        let OrbitalElements { h, e, .. } = self.elements;
        MU_EARTH / h * (1.0 + e * theta.cos())
    }

    pub fn radial_velocity_at_theta(&self, theta: f64) -> f64 {
        let OrbitalElements { h, e, .. } = self.elements;
        MU_EARTH / h * e * theta.sin()
    }

    /// Speed at an arbitrary true anomaly.
    pub fn velocity_at_theta(&self, theta: f64) -> f64 {
        self.radial_velocity_at_theta(theta)
            .hypot(self.azimuthal_velocity_at_theta(theta))
    }

    /// Geocentric-equatorial position and velocity at the current anomaly.
    pub fn state(&self) -> CartesianState {
        to_cartesian(&self.elements)
    }

    pub fn time_since_perigee(&self) -> f64 {
        propagation::time_since_perigee(&self.elements)
    }

    /// Move the body to where it is `time_since_perigee` seconds after perigee.
    pub fn advance_to(&mut self, time_since_perigee: f64) {
        self.elements = propagation::elements_at_time(&self.elements, time_since_perigee);
    }

    /// Sample the path at a fixed true-anomaly step over `[0, 2π]`.
    ///
    /// Returns `(theta, state)` pairs. The list is empty for a non-positive or non-finite step,
    /// and for a step so small that it would exceed [`MAX_PATH_POINTS`].
    pub fn path_points(&self, step: f64) -> Vec<(f64, CartesianState)> {
        if !(step.is_finite() && step > 0.0) {
            return Vec::new();
        }
        let intervals = (TWO_PI / step).floor();
        if !(intervals < MAX_PATH_POINTS as f64) {
            warn!("path step {step} rad needs more than {MAX_PATH_POINTS} points; nothing sampled");
            return Vec::new();
        }
        let count = intervals as usize + 1;
        (0..count)
            .map(|i| {
                let theta = i as f64 * step;
                (theta, to_cartesian(&self.elements.with_theta(theta)))
            })
            .collect()
    }
}
