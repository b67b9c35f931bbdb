//! Classical orbital element set.

use serde::{Deserialize, Serialize};

/// The six classical elements of a closed two-body orbit.
///
/// Angles are in radians, `h` in km²/s.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// True anomaly θ.
    pub theta: f64,
    /// Specific angular momentum magnitude.
    pub h: f64,
    /// Eccentricity (0 circular, 0..1 elliptical).
    pub e: f64,
    /// Right ascension of the ascending node Ω.
    pub raan: f64,
    pub inclination: f64,
    /// Argument of perigee ω.
    pub arg_perigee: f64,
}

impl OrbitalElements {
    pub fn new(theta: f64, h: f64, e: f64, raan: f64, inclination: f64, arg_perigee: f64) -> Self {
        Self {
            theta,
            h,
            e,
            raan,
            inclination,
            arg_perigee,
        }
    }

    /// Same ellipse in space, ignoring where the body currently is on it.
    ///
    /// Comparison is exact; `==` additionally compares `theta`.
    pub fn orbit_eq(&self, other: &Self) -> bool {
        self.h == other.h
            && self.e == other.e
            && self.raan == other.raan
            && self.inclination == other.inclination
            && self.arg_perigee == other.arg_perigee
    }

    /// Copy of these elements with the true anomaly replaced.
    pub fn with_theta(&self, theta: f64) -> Self {
        Self { theta, ..*self }
    }

    /// `false` once a degenerate input has poisoned any element with NaN or infinity.
    pub fn is_finite(&self) -> bool {
        [
            self.theta,
            self.h,
            self.e,
            self.raan,
            self.inclination,
            self.arg_perigee,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrbitalElements {
        OrbitalElements::new(0.3, 55_000.0, 0.2, 1.1, 0.5, 2.0)
    }

    #[test]
    fn equality_includes_anomaly() {
        let a = sample();
        let b = a.with_theta(0.4);
        assert!(a.orbit_eq(&b));
        assert_ne!(a, b);
        assert_eq!(a, a.with_theta(0.3));
    }

    #[test]
    fn orbit_eq_checks_argument_of_perigee() {
        let a = sample();
        let b = OrbitalElements {
            arg_perigee: 2.5,
            ..a
        };
        assert!(!a.orbit_eq(&b));
    }

    #[test]
    fn with_theta_leaves_source_untouched() {
        let a = sample();
        let _ = a.with_theta(3.0);
        assert_eq!(a.theta, 0.3);
    }

    #[test]
    fn nan_is_not_finite() {
        let poisoned = OrbitalElements {
            raan: f64::NAN,
            ..sample()
        };
        assert!(sample().is_finite());
        assert!(!poisoned.is_finite());
    }
}
