//! Two-body orbit description: classical elements, frame rotations, state conversion,
//! Kepler propagation, and orbit constructors about Earth.

pub mod elements;
pub mod factory;
pub mod frame;
pub mod orbit;
pub mod propagation;
pub mod state;

pub use elements::OrbitalElements;
pub use factory::{
    circular_from_radius, circular_from_speed, elliptical_from_radii, hohmann_transfer,
};
pub use orbit::{MAX_PATH_POINTS, Orbit};
pub use propagation::{elements_at_time, state_at_time, time_since_perigee};
pub use state::{CartesianState, to_cartesian, to_elements};
