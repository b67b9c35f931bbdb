//! Configuration models and loaders for orbit scenarios.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// A scenario manifest: solver settings, a list of named orbits, and an optional sweep.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub solver: Option<SolverConfig>,
    #[serde(default)]
    pub orbits: Vec<OrbitConfig>,
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
}

/// Newton iteration overrides; missing fields keep the library defaults.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct SolverConfig {
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

/// One named orbit entry.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OrbitConfig {
    pub name: String,
    #[serde(flatten)]
    pub kind: OrbitKind,
}

/// How an orbit entry is constructed. Angles are in degrees.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum OrbitKind {
    #[serde(rename = "circular_radius")]
    CircularRadius { radius_km: f64 },
    #[serde(rename = "circular_speed")]
    CircularSpeed { speed_km_s: f64 },
    #[serde(rename = "elliptical")]
    Elliptical { perigee_km: f64, apogee_km: f64 },
    /// Transfer between two orbits defined earlier in the same file.
    #[serde(rename = "hohmann")]
    Hohmann {
        from: String,
        to: String,
        #[serde(default = "default_true")]
        speed_up_at_perigee: bool,
    },
    #[serde(rename = "state")]
    State {
        position_km: [f64; 3],
        velocity_km_s: [f64; 3],
    },
    #[serde(rename = "elements")]
    Elements {
        theta_deg: f64,
        h: f64,
        e: f64,
        raan_deg: f64,
        inclination_deg: f64,
        arg_perigee_deg: f64,
    },
    #[serde(rename = "lambert")]
    Lambert {
        position1_km: [f64; 3],
        position2_km: [f64; 3],
        time_of_flight_s: f64,
        #[serde(default)]
        retrograde: bool,
    },
}

fn default_true() -> bool {
    true
}

/// Delta-v ratio sweep overrides.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct SweepConfig {
    #[serde(default)]
    pub base_radius_km: Option<f64>,
    #[serde(default)]
    pub base_apogee_factor: Option<f64>,
    #[serde(default)]
    pub x: Option<RangeConfig>,
    #[serde(default)]
    pub y: Option<RangeConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct RangeConfig {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load a scenario from a `.toml` file, or from YAML for any other extension.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Parse a YAML scenario held in memory.
pub fn parse_yaml(contents: &str) -> Result<ScenarioConfig, ConfigError> {
    Ok(serde_yaml::from_str(contents)?)
}

/// Parse a TOML scenario held in memory.
pub fn parse_toml(contents: &str) -> Result<ScenarioConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
