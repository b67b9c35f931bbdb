//! Apogee-first versus perigee-first Hohmann cost over a grid of target orbits.
//!
//! Orbit A has perigee `base_radius_km` and apogee `base_apogee_factor · base_radius_km`. Each
//! grid cell is an orbit B with apogee `x · base_radius_km` and perigee `y · base_radius_km`
//! (swapped when `y > x`). The cell value is `Δv(apogee-first) / Δv(perigee-first)` for the
//! transfer from A to B.

use log::debug;
use orbit_orbits::Orbit;
use orbit_orbits::factory::elliptical_from_radii;

use crate::transfers::hohmann_delta_v;

/// Upper bound on the number of samples along one sweep axis.
pub const MAX_SAMPLES: usize = 10_000;

/// Inclusive range sampled at `start + i · step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Range {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// Number of samples; the stop value is included when it lies on the grid.
    ///
    /// Zero for a non-positive step, a reversed range, or one needing more than [`MAX_SAMPLES`].
    pub fn len(&self) -> usize {
        if !(self.step.is_finite() && self.step > 0.0) || self.stop < self.start {
            return 0;
        }
        // Slack for `(stop - start) / step` landing just under an integer.
        let intervals = ((self.stop - self.start) / self.step + 1e-9).floor();
        if !(intervals < MAX_SAMPLES as f64) {
            return 0;
        }
        intervals as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> Vec<f64> {
        (0..self.len())
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioSweep {
    pub base_radius_km: f64,
    pub base_apogee_factor: f64,
    /// Apogee of orbit B in units of `base_radius_km`.
    pub x: Range,
    /// Perigee of orbit B in units of `base_radius_km`.
    pub y: Range,
}

impl Default for RatioSweep {
    fn default() -> Self {
        Self {
            base_radius_km: 40_000.0,
            base_apogee_factor: 5.0,
            x: Range::new(5.5, 10.0, 0.1),
            y: Range::new(1.5, 10.0, 0.1),
        }
    }
}

/// Grid of delta-v ratios, indexed `ratios[y][x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub ratios: Vec<Vec<f64>>,
}

impl RatioGrid {
    /// Cells in row-major order as `(x, y, ratio)`.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.y.iter().zip(&self.ratios).flat_map(move |(&y, row)| {
            self.x.iter().zip(row).map(move |(&x, &ratio)| (x, y, ratio))
        })
    }
}

impl RatioSweep {
    /// Delta-v ratio for a single target orbit.
    pub fn ratio(&self, x: f64, y: f64) -> f64 {
        let base = Orbit::from(elliptical_from_radii(
            self.base_radius_km,
            self.base_apogee_factor * self.base_radius_km,
        ));
        let target = Orbit::from(elliptical_from_radii(
            y * self.base_radius_km,
            x * self.base_radius_km,
        ));
        hohmann_delta_v(&base, &target, false) / hohmann_delta_v(&base, &target, true)
    }

    pub fn run(&self) -> RatioGrid {
        let x = self.x.values();
        let y = self.y.values();
        debug!("ratio sweep: {} x {} cells", y.len(), x.len());
        let ratios = y
            .iter()
            .map(|&yv| x.iter().map(|&xv| self.ratio(xv, yv)).collect())
            .collect();
        RatioGrid { x, y, ratios }
    }
}
