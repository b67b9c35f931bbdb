use orbit_calc::constants::MU_EARTH;
use orbit_calc::impulsive::transfers::{circular_hohmann, hohmann, hohmann_delta_v};
use orbit_calc::impulsive::{RatioSweep, sweep::Range};
use orbit_calc::orbits::Orbit;
use orbit_calc::orbits::factory::{circular_from_radius, elliptical_from_radii};

#[test]
fn hohmann_leo_to_geo_matches_textbook_formula() {
    let leo = Orbit::from(elliptical_from_radii(7_000.0, 7_000.0));
    let geo = Orbit::from(circular_from_radius(42_164.0));
    let dv = hohmann_delta_v(&leo, &geo, true);

    let transfer = Orbit::from(elliptical_from_radii(7_000.0, 42_164.0));
    let expected = (transfer.v_perigee() - (MU_EARTH / 7_000.0).sqrt())
        + ((MU_EARTH / 42_164.0).sqrt() - transfer.v_apogee());
    assert!((dv - expected).abs() < 1e-12, "dv = {dv}, expected = {expected}");
    assert!((dv - 3.7707).abs() < 1e-4, "dv = {dv}");
}

#[test]
fn hohmann_from_300_km_parking_orbit_is_in_textbook_range() {
    let parking = Orbit::from(circular_from_radius(6_678.0));
    let geo = Orbit::from(circular_from_radius(42_164.0));
    let result = hohmann(&parking, &geo, true);
    assert!(
        (3.84..=3.9).contains(&result.dv_total_km_s),
        "dv_total = {}",
        result.dv_total_km_s
    );
    let hours = result.tof_seconds / 3_600.0;
    assert!((hours - 5.27).abs() < 0.01, "tof_hours = {hours}");
}

#[test]
fn hohmann_symmetry_and_time_match() {
    let low = Orbit::from(circular_from_radius(8_000.0));
    let high = Orbit::from(circular_from_radius(26_000.0));
    let out = hohmann(&low, &high, true);
    let back = hohmann(&high, &low, true);

    assert!((out.dv_total_km_s - back.dv_total_km_s).abs() < 1e-9);
    assert!((out.tof_seconds - back.tof_seconds).abs() < 1e-6);
    assert!(out.dv_departure_km_s > 0.0);
    assert!(back.dv_departure_km_s < 0.0);

    let estimate = circular_hohmann(8_000.0, 26_000.0);
    assert!((out.dv_total_km_s - estimate.dv_total_km_s).abs() < 1e-9);
    assert!((out.tof_seconds - estimate.tof_seconds).abs() < 1e-6);
}

#[test]
fn default_ratio_sweep_covers_the_full_grid() {
    let grid = RatioSweep::default().run();
    assert_eq!(grid.x.len(), 46);
    assert_eq!(grid.y.len(), 86);
    for row in &grid.ratios {
        assert_eq!(row.len(), 46);
        assert!(row.iter().all(|r| r.is_finite() && *r > 0.0), "row {row:?}");
    }
}

#[test]
fn perigee_first_is_cheaper_across_a_coarse_grid() {
    let sweep = RatioSweep {
        x: Range::new(5.5, 10.0, 0.5),
        y: Range::new(1.5, 10.0, 0.5),
        ..RatioSweep::default()
    };
    let grid = sweep.run();
    let ratios: Vec<f64> = grid.cells().map(|(_, _, r)| r).collect();
    let min = ratios.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ratios.iter().copied().fold(0.0, f64::max);
    assert!(min > 1.0, "min ratio {min}");
    assert!(max > 20.0, "max ratio {max}");
}
