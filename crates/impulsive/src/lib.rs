//! Impulsive manoeuvre utilities: Hohmann transfers between coaxial orbits, a universal-variable
//! Lambert solver, and the apogee-first versus perigee-first delta-v sweep.

pub mod lambert;
pub mod sweep;
pub mod transfers;

pub use lambert::{LambertError, LambertSolution, Trajectory, solve as lambert_solve};
pub use sweep::{RatioGrid, RatioSweep};
pub use transfers::{BurnPoint, HohmannResult, hohmann, hohmann_delta_v};
