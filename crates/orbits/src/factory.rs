//! Constructors for in-plane orbits: circles, ellipses by apsides, and Hohmann transfer ellipses.
//!
//! Every constructor returns elements at perigee (`theta = 0`) with zero orientation angles.

use orbit_core::constants::MU_EARTH;

use crate::elements::OrbitalElements;
use crate::orbit::Orbit;

fn in_plane(h: f64, e: f64) -> OrbitalElements {
    OrbitalElements::new(0.0, h, e, 0.0, 0.0, 0.0)
}

/// Circular orbit of radius `radius_km`.
pub fn circular_from_radius(radius_km: f64) -> OrbitalElements {
    let speed = (MU_EARTH / radius_km).sqrt();
    in_plane(speed * radius_km, 0.0)
}

/// Circular orbit flown at `speed_km_s`.
pub fn circular_from_speed(speed_km_s: f64) -> OrbitalElements {
    let radius = MU_EARTH / (speed_km_s * speed_km_s);
    in_plane(radius * speed_km_s, 0.0)
}

/// Ellipse with the given perigee and apogee radii.
///
/// Radii given in the wrong order are swapped, not rejected.
pub fn elliptical_from_radii(perigee_km: f64, apogee_km: f64) -> OrbitalElements {
    let (rp, ra) = if perigee_km > apogee_km {
        (apogee_km, perigee_km)
    } else {
        (perigee_km, apogee_km)
    };
    let h = (2.0 * MU_EARTH).sqrt() * (rp * ra / (rp + ra)).sqrt();
    let e = (ra - rp) / (ra + rp);
    in_plane(h, e)
}

/// Apsis radii `(perigee, apogee)` of the Hohmann transfer between two orbits.
///
/// The orbit with the smaller perigee is the inner one. With `speed_up_at_perigee` the transfer
/// runs from the inner perigee to the outer apogee, otherwise from the inner apogee to the
/// outer perigee. The orbits are assumed to share an apse line; this is not checked.
pub fn hohmann_apsides(orbit1: &Orbit, orbit2: &Orbit, speed_up_at_perigee: bool) -> (f64, f64) {
    let (inner, outer) = if orbit1.r_perigee() <= orbit2.r_perigee() {
        (orbit1, orbit2)
    } else {
        (orbit2, orbit1)
    };
    if speed_up_at_perigee {
        (inner.r_perigee(), outer.r_apogee())
    } else {
        (inner.r_apogee(), outer.r_perigee())
    }
}

/// Transfer ellipse of a Hohmann manoeuvre between `orbit1` and `orbit2`.
pub fn hohmann_transfer(
    orbit1: &Orbit,
    orbit2: &Orbit,
    speed_up_at_perigee: bool,
) -> OrbitalElements {
    let (rp, ra) = hohmann_apsides(orbit1, orbit2, speed_up_at_perigee);
    elliptical_from_radii(rp, ra)
}
