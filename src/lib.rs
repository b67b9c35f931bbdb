//! Two-body orbit calculator about Earth.
//!
//! The numerical work lives in the member crates and is re-exported here so that the binaries
//! and any other front-end share one entry point. [`scenario`] turns a scenario file into
//! resolved, named orbits.

pub mod scenario;

pub use orbit_config as config;
pub use orbit_core::{constants, matrix, newton, time, units, vector};
pub use orbit_export as export;
pub use orbit_impulsive as impulsive;
pub use orbit_orbits as orbits;
