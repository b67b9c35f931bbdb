//! Two-impulse transfers between coaxial orbits about Earth.
//!
//! Burns are tangential speed changes evaluated at given true anomalies; plane changes and
//! flight-path-angle turning are not modelled.

use std::f64::consts::PI;

use orbit_core::constants::MU_EARTH;
use orbit_orbits::factory::hohmann_transfer;
use orbit_orbits::propagation::period;
use orbit_orbits::{Orbit, OrbitalElements};

/// Anomalies at which one impulse is applied: on the orbit being left and on the one entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnPoint {
    pub from_theta: f64,
    pub to_theta: f64,
}

impl BurnPoint {
    pub fn new(from_theta: f64, to_theta: f64) -> Self {
        Self {
            from_theta,
            to_theta,
        }
    }
}

/// Result of a Hohmann manoeuvre between two coaxial orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannResult {
    pub transfer: Orbit,
    pub dv_departure_km_s: f64, // signed: negative for a retro burn
    pub dv_arrival_km_s: f64,   // signed: negative for a retro capture
    pub dv_total_km_s: f64,     // |dv_departure| + |dv_arrival|
    pub tof_seconds: f64,
}

fn signed_impulse(from: &Orbit, from_theta: f64, to: &Orbit, to_theta: f64) -> f64 {
    to.velocity_at_theta(to_theta) - from.velocity_at_theta(from_theta)
}

/// Speed change needed to leave `from` at `theta_from` and continue on `to` at `theta_to`.
pub fn impulse_delta_v(from: &Orbit, theta_from: f64, to: &Orbit, theta_to: f64) -> f64 {
    signed_impulse(from, theta_from, to, theta_to).abs()
}

/// Total cost of `initial -> transfer -> target` with burns at the given anomalies.
pub fn transfer_delta_v(
    initial: &Orbit,
    transfer: &Orbit,
    target: &Orbit,
    departure: BurnPoint,
    arrival: BurnPoint,
) -> f64 {
    impulse_delta_v(initial, departure.from_theta, transfer, departure.to_theta)
        + impulse_delta_v(transfer, arrival.from_theta, target, arrival.to_theta)
}

/// Hohmann manoeuvre from `orbit1` to `orbit2`.
///
/// The transfer ellipse comes from [`hohmann_transfer`]. Outward, the departure burn puts the
/// body on the transfer perigee and the arrival burn is made at the transfer apogee; inward the
/// roles are swapped. On the end orbits the burn sits at perigee for the inner orbit and at
/// apogee for the outer one when `speed_up_at_perigee`, and the other way round otherwise.
pub fn hohmann(orbit1: &Orbit, orbit2: &Orbit, speed_up_at_perigee: bool) -> HohmannResult {
    let transfer = Orbit::from(hohmann_transfer(orbit1, orbit2, speed_up_at_perigee));
    let (inner_theta, outer_theta) = if speed_up_at_perigee {
        (0.0, PI)
    } else {
        (PI, 0.0)
    };

    let (departure, arrival) = if orbit1.r_perigee() <= orbit2.r_perigee() {
        (
            BurnPoint::new(inner_theta, 0.0),
            BurnPoint::new(PI, outer_theta),
        )
    } else {
        (
            BurnPoint::new(outer_theta, PI),
            BurnPoint::new(0.0, inner_theta),
        )
    };

    let dv_departure = signed_impulse(orbit1, departure.from_theta, &transfer, departure.to_theta);
    let dv_arrival = signed_impulse(&transfer, arrival.from_theta, orbit2, arrival.to_theta);

    HohmannResult {
        transfer,
        dv_departure_km_s: dv_departure,
        dv_arrival_km_s: dv_arrival,
        dv_total_km_s: dv_departure.abs() + dv_arrival.abs(),
        tof_seconds: 0.5 * transfer.period(),
    }
}

/// Total delta-v of [`hohmann`].
pub fn hohmann_delta_v(orbit1: &Orbit, orbit2: &Orbit, speed_up_at_perigee: bool) -> f64 {
    hohmann(orbit1, orbit2, speed_up_at_perigee).dv_total_km_s
}

/// Closed-form Hohmann estimate between circular, coplanar orbits of radii `r1_km` and `r2_km`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularHohmann {
    pub dv1_km_s: f64,
    pub dv2_km_s: f64,
    pub dv_total_km_s: f64,
    pub tof_seconds: f64,
}

/// Non-positive radii give NaN burns rather than an error.
pub fn circular_hohmann(r1_km: f64, r2_km: f64) -> CircularHohmann {
    // Transfer ellipse with its apsides on the two circles.
    let h = (2.0 * MU_EARTH * r1_km * r2_km / (r1_km + r2_km)).sqrt();
    let e = ((r2_km - r1_km) / (r1_km + r2_km)).abs();
    let transfer = OrbitalElements::new(0.0, h, e, 0.0, 0.0, 0.0);
    let circular_speed = |r: f64| (MU_EARTH / r).sqrt();

    let dv1 = h / r1_km - circular_speed(r1_km);
    let dv2 = circular_speed(r2_km) - h / r2_km;
    CircularHohmann {
        dv1_km_s: dv1,
        dv2_km_s: dv2,
        dv_total_km_s: dv1.abs() + dv2.abs(),
        tof_seconds: 0.5 * period(&transfer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use orbit_orbits::factory::{circular_from_radius, elliptical_from_radii};
    use proptest::prelude::*;

    fn leo() -> Orbit {
        Orbit::from(elliptical_from_radii(7_000.0, 7_000.0))
    }

    fn geo() -> Orbit {
        Orbit::from(circular_from_radius(42_164.0))
    }

    #[test]
    fn leo_to_geo_matches_textbook_burns() {
        let result = hohmann(&leo(), &geo(), true);
        let transfer = result.transfer;
        let expected = (transfer.v_perigee() - (MU_EARTH / 7_000.0).sqrt())
            + ((MU_EARTH / 42_164.0).sqrt() - transfer.v_apogee());
        assert_relative_eq!(result.dv_total_km_s, expected, max_relative = 1e-12);
        assert_relative_eq!(result.dv_total_km_s, 3.7707, epsilon = 1e-4);
        assert_relative_eq!(result.dv_departure_km_s, 2.3368, epsilon = 1e-4);
        assert_relative_eq!(result.dv_arrival_km_s, 1.4339, epsilon = 1e-4);
    }

    #[test]
    fn low_parking_orbit_to_geo() {
        let parking = Orbit::from(circular_from_radius(6_678.0));
        let dv = hohmann_delta_v(&parking, &geo(), true);
        assert!((3.84..=3.9).contains(&dv), "dv = {dv}");
    }

    #[test]
    fn circular_estimate_is_nan_for_non_positive_radii() {
        for (r1, r2) in [(0.0, 7_000.0), (-7_000.0, 42_164.0), (7_000.0, -7_000.0)] {
            let estimate = circular_hohmann(r1, r2);
            assert!(estimate.dv_total_km_s.is_nan(), "({r1}, {r2}) gave {estimate:?}");
        }
    }

    #[test]
    fn circular_estimate_inward_burns_are_retro() {
        let estimate = circular_hohmann(42_164.0, 7_000.0);
        assert!(estimate.dv1_km_s < 0.0 && estimate.dv2_km_s < 0.0);
        assert_relative_eq!(estimate.dv_total_km_s, 3.7707, epsilon = 1e-4);
    }

    #[test]
    fn elliptic_formula_agrees_with_circular_estimate() {
        let result = hohmann(&leo(), &geo(), true);
        let estimate = circular_hohmann(7_000.0, 42_164.0);
        assert_relative_eq!(result.dv_total_km_s, estimate.dv_total_km_s, max_relative = 1e-9);
        assert_relative_eq!(result.dv_departure_km_s, estimate.dv1_km_s, max_relative = 1e-9);
        assert_relative_eq!(result.tof_seconds, estimate.tof_seconds, max_relative = 1e-9);
    }

    #[test]
    fn inward_transfer_burns_are_retro() {
        let out = hohmann(&leo(), &geo(), true);
        let back = hohmann(&geo(), &leo(), true);
        assert!(out.dv_departure_km_s > 0.0 && out.dv_arrival_km_s > 0.0);
        assert!(back.dv_departure_km_s < 0.0 && back.dv_arrival_km_s < 0.0);
        assert_relative_eq!(out.dv_total_km_s, back.dv_total_km_s, max_relative = 1e-12);
        assert_relative_eq!(out.tof_seconds, back.tof_seconds, max_relative = 1e-12);
    }

    #[test]
    fn apogee_first_variant_between_ellipses() {
        let inner = Orbit::from(elliptical_from_radii(10_000.0, 20_000.0));
        let outer = Orbit::from(elliptical_from_radii(30_000.0, 60_000.0));
        let result = hohmann(&inner, &outer, false);
        assert_relative_eq!(result.dv_departure_km_s, 1.24531, epsilon = 1e-5);
        assert_relative_eq!(result.dv_arrival_km_s, 0.94872, epsilon = 1e-5);
        assert_relative_eq!(result.dv_total_km_s, 2.19403, epsilon = 1e-5);
    }

    #[test]
    fn transfer_delta_v_matches_hohmann_burn_points() {
        let (inner, outer) = (leo(), geo());
        let result = hohmann(&inner, &outer, true);
        let generic = transfer_delta_v(
            &inner,
            &result.transfer,
            &outer,
            BurnPoint::new(0.0, 0.0),
            BurnPoint::new(PI, PI),
        );
        assert_relative_eq!(generic, result.dv_total_km_s, max_relative = 1e-12);
    }

    #[test]
    fn impulse_between_identical_orbits_is_zero() {
        let orbit = Orbit::from(elliptical_from_radii(7_000.0, 12_000.0));
        assert_eq!(impulse_delta_v(&orbit, 1.3, &orbit, 1.3), 0.0);
    }

    #[test]
    fn transfer_time_is_half_the_transfer_period() {
        let result = hohmann(&leo(), &geo(), true);
        assert_relative_eq!(result.tof_seconds, 19_178.16, epsilon = 0.01);
        assert_relative_eq!(
            2.0 * result.tof_seconds,
            result.transfer.period(),
            max_relative = 1e-12
        );
    }

    proptest! {
        #[test]
        fn circular_transfer_cost_is_symmetric(
            r1 in 6_600.0f64..50_000.0,
            r2 in 6_600.0f64..50_000.0,
        ) {
            let a = Orbit::from(circular_from_radius(r1));
            let b = Orbit::from(circular_from_radius(r2));
            let there = hohmann_delta_v(&a, &b, true);
            let back = hohmann_delta_v(&b, &a, true);
            prop_assert!((there - back).abs() < 1e-9);
            prop_assert!(there >= 0.0);
        }
    }
}
