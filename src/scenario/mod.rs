use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use orbit_config::{
    ConfigError, OrbitKind, RangeConfig, ScenarioConfig, SolverConfig, SweepConfig, load_scenario,
};
use orbit_core::newton::NewtonOptions;
use orbit_core::units::deg_to_rad;
use orbit_impulsive::lambert::{self, Trajectory};
use orbit_impulsive::sweep::Range;
use orbit_impulsive::{LambertError, RatioSweep, hohmann};
use orbit_orbits::factory::{circular_from_radius, circular_from_speed, elliptical_from_radii};
use orbit_orbits::{CartesianState, Orbit, OrbitalElements};

/// An orbit together with the name it was declared under.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedOrbit {
    pub name: String,
    pub orbit: Orbit,
    /// Total Hohmann delta-v, for transfer entries only.
    pub delta_v_km_s: Option<f64>,
}

/// A fully resolved scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: Option<String>,
    pub solver: NewtonOptions,
    pub orbits: Vec<NamedOrbit>,
    pub sweep: Option<RatioSweep>,
}

impl Scenario {
    pub fn find(&self, name: &str) -> Option<&NamedOrbit> {
        self.orbits.iter().find(|entry| entry.name == name)
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("orbit `{name}` references unknown orbit `{reference}`")]
    UnknownReference { name: String, reference: String },
    #[error("orbit name `{0}` is defined more than once")]
    DuplicateName(String),
    #[error("orbit `{name}`: {source}")]
    Lambert {
        name: String,
        #[source]
        source: LambertError,
    },
}

/// Newton settings with any overrides from the scenario applied.
pub fn solver_options(config: Option<&SolverConfig>) -> NewtonOptions {
    let mut options = NewtonOptions::default();
    if let Some(config) = config {
        if let Some(max_iterations) = config.max_iterations {
            options.max_iterations = max_iterations;
        }
        if let Some(tolerance) = config.tolerance {
            options.tolerance = tolerance;
        }
    }
    options
}

/// Ratio sweep with any overrides from the scenario applied.
pub fn sweep_from_config(config: &SweepConfig) -> RatioSweep {
    let defaults = RatioSweep::default();
    let range = |r: Option<RangeConfig>, fallback: Range| {
        r.map(|r| Range::new(r.start, r.stop, r.step))
            .unwrap_or(fallback)
    };
    RatioSweep {
        base_radius_km: config.base_radius_km.unwrap_or(defaults.base_radius_km),
        base_apogee_factor: config
            .base_apogee_factor
            .unwrap_or(defaults.base_apogee_factor),
        x: range(config.x, defaults.x),
        y: range(config.y, defaults.y),
    }
}

/// Resolve the orbit list in declaration order. Transfer entries may only reference orbits
/// declared before them.
pub fn resolve(config: &ScenarioConfig) -> Result<Scenario, ScenarioError> {
    let solver = solver_options(config.solver.as_ref());
    let mut orbits: Vec<NamedOrbit> = Vec::with_capacity(config.orbits.len());
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in &config.orbits {
        if index.contains_key(entry.name.as_str()) {
            return Err(ScenarioError::DuplicateName(entry.name.clone()));
        }
        let lookup = |reference: &str| -> Result<Orbit, ScenarioError> {
            index
                .get(reference)
                .map(|&i| orbits[i].orbit)
                .ok_or_else(|| ScenarioError::UnknownReference {
                    name: entry.name.clone(),
                    reference: reference.to_string(),
                })
        };

        let mut delta_v_km_s = None;
        let orbit = match &entry.kind {
            OrbitKind::CircularRadius { radius_km } => {
                Orbit::from(circular_from_radius(*radius_km))
            }
            OrbitKind::CircularSpeed { speed_km_s } => {
                Orbit::from(circular_from_speed(*speed_km_s))
            }
            OrbitKind::Elliptical {
                perigee_km,
                apogee_km,
            } => Orbit::from(elliptical_from_radii(*perigee_km, *apogee_km)),
            OrbitKind::Hohmann {
                from,
                to,
                speed_up_at_perigee,
            } => {
                let (from, to) = (lookup(from.as_str())?, lookup(to.as_str())?);
                let result = hohmann(&from, &to, *speed_up_at_perigee);
                delta_v_km_s = Some(result.dv_total_km_s);
                result.transfer
            }
            OrbitKind::State {
                position_km,
                velocity_km_s,
            } => Orbit::from(CartesianState::new(*position_km, *velocity_km_s)),
            OrbitKind::Elements {
                theta_deg,
                h,
                e,
                raan_deg,
                inclination_deg,
                arg_perigee_deg,
            } => Orbit::from(OrbitalElements::new(
                deg_to_rad(*theta_deg),
                *h,
                *e,
                deg_to_rad(*raan_deg),
                deg_to_rad(*inclination_deg),
                deg_to_rad(*arg_perigee_deg),
            )),
            OrbitKind::Lambert {
                position1_km,
                position2_km,
                time_of_flight_s,
                retrograde,
            } => {
                let trajectory = if *retrograde {
                    Trajectory::Retrograde
                } else {
                    Trajectory::Prograde
                };
                let solution = lambert::solve_checked(
                    position1_km,
                    position2_km,
                    *time_of_flight_s,
                    trajectory,
                    &solver,
                )
                .map_err(|source| ScenarioError::Lambert {
                    name: entry.name.clone(),
                    source,
                })?;
                Orbit::from(solution.elements)
            }
        };

        debug!("resolved orbit `{}`: {:?}", entry.name, orbit.elements());
        index.insert(entry.name.as_str(), orbits.len());
        orbits.push(NamedOrbit {
            name: entry.name.clone(),
            orbit,
            delta_v_km_s,
        });
    }

    info!(
        "scenario {}: {} orbits resolved",
        config.name.as_deref().unwrap_or("<unnamed>"),
        orbits.len()
    );

    Ok(Scenario {
        name: config.name.clone(),
        solver,
        orbits,
        sweep: config.sweep.as_ref().map(sweep_from_config),
    })
}

/// Load and resolve a scenario file (YAML, or TOML by extension).
pub fn load<P: AsRef<Path>>(path: P) -> Result<Scenario, ScenarioError> {
    let config = load_scenario(path)?;
    resolve(&config)
}
