//! Lambert's problem about Earth with the universal-variable formulation (Curtis, algorithm 5.2).
//!
//! Given two geocentric positions and a time of flight, Newton's method is run on the universal
//! variable `z` from `z = 0`. Degenerate geometry (collinear positions, zero time of flight) is not
//! rejected: NaN propagates into the returned elements. [`solve_checked`] turns that into an
//! error for callers that need one.

use std::f64::consts::SQRT_2;

use log::debug;
use orbit_core::constants::{MU_EARTH, TWO_PI};
use orbit_core::newton::{self, NewtonOptions};
use orbit_core::vector::{self, Vector3};
use orbit_orbits::{OrbitalElements, to_elements};
use thiserror::Error;

/// Direction of travel between the two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trajectory {
    #[default]
    Prograde,
    Retrograde,
}

#[derive(Debug, Error)]
pub enum LambertError {
    #[error("lambert solution is not finite (z = {z})")]
    NonFinite { z: f64 },
}

/// Transfer orbit plus the terminal velocities on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertSolution {
    /// Elements at the departure point.
    pub elements: OrbitalElements,
    pub departure_velocity: Vector3,
    pub arrival_velocity: Vector3,
    /// Converged universal variable; positive for elliptic transfers.
    pub z: f64,
}

impl LambertSolution {
    /// Whether the solve produced usable numbers.
    ///
    /// Only `z`, the velocities and the `h`/`e` shape are checked. Node and perigee angles are
    /// NaN for circular or equatorial transfers, which are still valid solutions.
    pub fn is_finite(&self) -> bool {
        self.z.is_finite()
            && self.elements.h.is_finite()
            && self.elements.e.is_finite()
            && self
                .departure_velocity
                .iter()
                .chain(self.arrival_velocity.iter())
                .all(|v| v.is_finite())
    }
}

/// Stumpff function `S(z)`.
pub fn stumpff_s(z: f64) -> f64 {
    if z > 0.0 {
        let s = z.sqrt();
        (s - s.sin()) / s.powi(3)
    } else if z < 0.0 {
        let s = (-z).sqrt();
        (s.sinh() - s) / s.powi(3)
    } else {
        1.0 / 6.0
    }
}

/// Stumpff function `C(z)`.
pub fn stumpff_c(z: f64) -> f64 {
    if z > 0.0 {
        (1.0 - z.sqrt().cos()) / z
    } else if z < 0.0 {
        ((-z).sqrt().cosh() - 1.0) / -z
    } else {
        0.5
    }
}

/// Sweep angle from `r1` to `r2` in `[0, 2π)` for the requested direction of travel.
///
/// Prograde keeps the principal angle while the `z` component of `r1 × r2` is non-negative;
/// retrograde keeps it while that component is negative.
pub fn transfer_angle(r1: &Vector3, r2: &Vector3, trajectory: Trajectory) -> f64 {
    let principal = (vector::dot(r1, r2) / (vector::norm(r1) * vector::norm(r2))).acos();
    let cross_z = vector::cross(r1, r2)[2];
    let keep = match trajectory {
        Trajectory::Prograde => cross_z >= 0.0,
        Trajectory::Retrograde => cross_z < 0.0,
    };
    if keep { principal } else { TWO_PI - principal }
}

/// Lagrange coefficients at the converged `z`.
#[derive(Debug, Clone, Copy)]
struct Lagrange {
    f: f64,
    g: f64,
    f_dot: f64,
    g_dot: f64,
}

struct Geometry {
    r1: f64,
    r2: f64,
    a: f64,
}

impl Geometry {
    fn y(&self, z: f64) -> f64 {
        self.r1 + self.r2 + self.a * (z * stumpff_s(z) - 1.0) / stumpff_c(z).sqrt()
    }

    fn f(&self, z: f64, tof: f64) -> f64 {
        let (s, c, y) = (stumpff_s(z), stumpff_c(z), self.y(z));
        (y / c).abs().powf(1.5) * s + self.a * y.sqrt() - MU_EARTH.sqrt() * tof
    }

    fn lagrange(&self, z: f64) -> Lagrange {
        let y = self.y(z);
        Lagrange {
            f: 1.0 - y / self.r1,
            g: self.a * (y / MU_EARTH).sqrt(),
            f_dot: MU_EARTH.sqrt() / (self.r1 * self.r2)
                * (y / stumpff_c(z)).sqrt()
                * (z * stumpff_s(z) - 1.0),
            g_dot: 1.0 - y / self.r2,
        }
    }

    fn f_prime(&self, z: f64) -> f64 {
        let a = self.a;
        if z == 0.0 {
            let y0 = self.y(0.0);
            SQRT_2 / 40.0 * y0.powf(1.5) + a / 8.0 * (y0.sqrt() + a * (1.0 / (2.0 * y0)).sqrt())
        } else {
            let (s, c, y) = (stumpff_s(z), stumpff_c(z), self.y(z));
            (y / c).powf(1.5) * (1.0 / (2.0 * z) * (c - 1.5 * s / c) + 0.75 * s * s / c)
                + a / 8.0 * (3.0 * s / c * y.sqrt() + a * (c / y).sqrt())
        }
    }
}

/// Prograde transfer from `r1` to `r2` in `tof` seconds, as elements at `r1`.
pub fn solve(r1: &Vector3, r2: &Vector3, tof: f64) -> OrbitalElements {
    solve_with(r1, r2, tof, Trajectory::Prograde, &NewtonOptions::default()).elements
}

/// Full Lambert solve with explicit direction and Newton settings.
pub fn solve_with(
    r1: &Vector3,
    r2: &Vector3,
    tof: f64,
    trajectory: Trajectory,
    options: &NewtonOptions,
) -> LambertSolution {
    let (r1_norm, r2_norm) = (vector::norm(r1), vector::norm(r2));
    let dtheta = transfer_angle(r1, r2, trajectory);
    let a = dtheta.sin() * (r1_norm * r2_norm / (1.0 - dtheta.cos())).sqrt();
    let geometry = Geometry {
        r1: r1_norm,
        r2: r2_norm,
        a,
    };

    let z = newton::solve(
        |z| geometry.f(z, tof),
        |z| geometry.f_prime(z),
        0.0,
        options,
    );
    let Lagrange { f, g, f_dot, g_dot } = geometry.lagrange(z);

    let departure_velocity = vector::scale(&vector::sub(r2, &vector::scale(r1, f)), 1.0 / g);
    let arrival_velocity = vector::scale(&vector::sub(&vector::scale(r2, g_dot), r1), 1.0 / g);
    debug!(
        "lambert: dtheta = {dtheta:.6} rad, z = {z:.6}, tof = {tof} s, f*g_dot - f_dot*g = {:.12}",
        f * g_dot - f_dot * g
    );

    LambertSolution {
        elements: to_elements(r1, &departure_velocity),
        departure_velocity,
        arrival_velocity,
        z,
    }
}

/// [`solve_with`] that rejects non-finite solutions.
pub fn solve_checked(
    r1: &Vector3,
    r2: &Vector3,
    tof: f64,
    trajectory: Trajectory,
    options: &NewtonOptions,
) -> Result<LambertSolution, LambertError> {
    let solution = solve_with(r1, r2, tof, trajectory, options);
    if solution.is_finite() {
        Ok(solution)
    } else {
        Err(LambertError::NonFinite { z: solution.z })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    // Curtis, Orbital Mechanics for Engineering Students, example 5.2.
    const R1: Vector3 = [5_000.0, 10_000.0, 2_100.0];
    const R2: Vector3 = [-14_600.0, 2_500.0, 7_000.0];
    const TOF: f64 = 3_600.0;

    #[test]
    fn curtis_example_velocities() {
        let solution = solve_with(&R1, &R2, TOF, Trajectory::Prograde, &NewtonOptions::default());
        assert_relative_eq!(solution.z, 1.5399, epsilon = 1e-4);
        let v1 = [-5.9925, 1.9254, 3.2456];
        let v2 = [-3.3125, -4.1966, -0.38529];
        for i in 0..3 {
            assert_relative_eq!(solution.departure_velocity[i], v1[i], epsilon = 1e-4);
            assert_relative_eq!(solution.arrival_velocity[i], v2[i], epsilon = 1e-4);
        }
    }

    #[test]
    fn curtis_example_elements() {
        let el = solve(&R1, &R2, TOF);
        assert_relative_eq!(el.h, 80_466.8, epsilon = 0.1);
        assert_relative_eq!(el.e, 0.43349, epsilon = 1e-5);
        assert_relative_eq!(el.inclination.to_degrees(), 30.191, epsilon = 1e-3);
        assert_relative_eq!(el.raan.to_degrees(), 44.600, epsilon = 1e-3);
        assert_relative_eq!(el.arg_perigee.to_degrees(), 30.706, epsilon = 1e-3);
        assert_relative_eq!(el.theta.to_degrees(), 350.830, epsilon = 1e-3);
    }

    #[test]
    fn retrograde_branch_flips_the_plane() {
        let solution =
            solve_with(&R1, &R2, TOF, Trajectory::Retrograde, &NewtonOptions::default());
        assert!(solution.is_finite());
        assert!(solution.elements.inclination > PI / 2.0);
        assert_relative_eq!(solution.elements.inclination.to_degrees(), 149.809, epsilon = 1e-3);
    }

    #[test]
    fn transfer_angle_branches() {
        let x = [7_000.0, 0.0, 0.0];
        let y = [0.0, 7_000.0, 0.0];
        let cases = [
            (&x, &y, Trajectory::Prograde, PI / 2.0),
            (&y, &x, Trajectory::Prograde, 1.5 * PI),
            (&x, &y, Trajectory::Retrograde, 1.5 * PI),
            (&y, &x, Trajectory::Retrograde, PI / 2.0),
        ];
        for (from, to, trajectory, expected) in cases {
            assert_relative_eq!(transfer_angle(from, to, trajectory), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn lagrange_coefficients_keep_unit_determinant() {
        let (r1, r2) = (vector::norm(&R1), vector::norm(&R2));
        let dtheta = transfer_angle(&R1, &R2, Trajectory::Prograde);
        let geometry = Geometry {
            r1,
            r2,
            a: dtheta.sin() * (r1 * r2 / (1.0 - dtheta.cos())).sqrt(),
        };
        for z in [-4.0, 0.0, 1.5399, 10.0] {
            let l = geometry.lagrange(z);
            assert_relative_eq!(l.f * l.g_dot - l.f_dot * l.g, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn circular_transfer_is_accepted_with_undefined_angles() {
        let r = 7_000.0_f64;
        let tof = PI / 2.0 * (r.powi(3) / MU_EARTH).sqrt();
        let solution = solve_checked(
            &[r, 0.0, 0.0],
            &[0.0, r, 0.0],
            tof,
            Trajectory::Prograde,
            &NewtonOptions::default(),
        )
        .unwrap();
        assert!(solution.elements.e.abs() < 1e-9);
        assert!(solution.elements.theta.is_nan());
        assert!(solution.elements.arg_perigee.is_nan());
        assert_relative_eq!(solution.departure_velocity[1], (MU_EARTH / r).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn stumpff_functions_are_continuous_at_zero() {
        assert_eq!(stumpff_s(0.0), 1.0 / 6.0);
        assert_eq!(stumpff_c(0.0), 0.5);
        for z in [1e-4, -1e-4] {
            assert_relative_eq!(stumpff_s(z), 1.0 / 6.0, epsilon = 1e-5);
            assert_relative_eq!(stumpff_c(z), 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn collinear_positions_fail_checked_solve() {
        let r1 = [7_000.0, 0.0, 0.0];
        let r2 = [14_000.0, 0.0, 0.0];
        assert!(!solve(&r1, &r2, 3_000.0).is_finite());
        let err = solve_checked(&r1, &r2, 3_000.0, Trajectory::Prograde, &NewtonOptions::default());
        assert!(matches!(err, Err(LambertError::NonFinite { .. })));
    }
}
