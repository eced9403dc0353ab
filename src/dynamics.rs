//! Vertical-plane vehicle dynamics.

pub mod state;
pub mod submarine;

pub use state::{SubmarineParams, VehicleState, NOMINAL_FORWARD_SPEED};
pub use submarine::{integrate_position_then_force, Submarine};
