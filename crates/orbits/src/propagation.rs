//! Time propagation along a fixed ellipse through Kepler's equation.
//!
//! Only closed orbits are modelled; for `e >= 1` the results are NaN and no error is raised.

use orbit_core::constants::{MU_EARTH, TWO_PI};
use orbit_core::newton::{self, NewtonOptions};
use std::f64::consts::PI;

use crate::elements::OrbitalElements;
use crate::state::{CartesianState, to_cartesian};

/// Orbital period `T = (2π / μ²) · (h / √(1 − e²))³` in seconds.
pub fn period(elements: &OrbitalElements) -> f64 {
    let OrbitalElements { h, e, .. } = *elements;
    TWO_PI / (MU_EARTH * MU_EARTH) * (h / (1.0 - e * e).sqrt()).powi(3)
}

/// Mean anomaly reached `time_since_perigee` seconds after perigee passage.
pub fn mean_anomaly(elements: &OrbitalElements, time_since_perigee: f64) -> f64 {
    let OrbitalElements { h, e, .. } = *elements;
    (MU_EARTH * MU_EARTH) / h.powi(3) * (1.0 - e * e).powf(1.5) * time_since_perigee
}

/// Solve Kepler's equation `E − e·sin E = M` for the eccentric anomaly.
pub fn eccentric_anomaly(mean_anomaly: f64, e: f64, options: &NewtonOptions) -> f64 {
    let guess = if mean_anomaly <= PI {
        mean_anomaly + e / 2.0
    } else {
        mean_anomaly - e / 2.0
    };
    newton::solve(
        |ecc| ecc - e * ecc.sin() - mean_anomaly,
        |ecc| 1.0 - e * ecc.cos(),
        guess,
        options,
    )
}

/// Elements with the true anomaly reached `time_since_perigee` seconds after perigee.
pub fn elements_at_time(elements: &OrbitalElements, time_since_perigee: f64) -> OrbitalElements {
    elements_at_time_with(elements, time_since_perigee, &NewtonOptions::default())
}

/// [`elements_at_time`] with explicit Newton settings.
///
/// The returned anomaly lies in `(−π, π]`; no wrapping to `[0, 2π)` is applied.
pub fn elements_at_time_with(
    elements: &OrbitalElements,
    time_since_perigee: f64,
    options: &NewtonOptions,
) -> OrbitalElements {
    let e = elements.e;
    let m = mean_anomaly(elements, time_since_perigee);
    let ecc = eccentric_anomaly(m, e, options);
    let theta = 2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (ecc / 2.0).tan()).atan();
    elements.with_theta(theta)
}

/// Seconds since the most recent perigee passage for the current true anomaly.
///
/// Anomalies past apogee map to negative times (time until the next perigee).
pub fn time_since_perigee(elements: &OrbitalElements) -> f64 {
    let OrbitalElements { theta, e, .. } = *elements;
    let ecc = 2.0 * (((1.0 - e) / (1.0 + e)).sqrt() * (theta / 2.0).tan()).atan();
    (ecc - e * ecc.sin()) * period(elements) / TWO_PI
}

/// Cartesian state `time_since_perigee` seconds after perigee passage.
pub fn state_at_time(elements: &OrbitalElements, time_since_perigee: f64) -> CartesianState {
    to_cartesian(&elements_at_time(elements, time_since_perigee))
}
