use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Nominal constants
// ---------------------------------------------------------------------------

/// Constant forward speed along the cave axis.
pub const NOMINAL_FORWARD_SPEED: f64 = 1.0;

// ---------------------------------------------------------------------------
// Planar state: position and velocity in the vertical plane
// ---------------------------------------------------------------------------

/// Kinematic state of the vehicle. `x` is distance along the cave, `y` is depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
}

impl VehicleState {
    /// State at the start of every run: origin, moving forward, no vertical rate.
    pub fn initial() -> Self {
        Self {
            pos: Vector2::zeros(),
            vel: Vector2::new(NOMINAL_FORWARD_SPEED, 0.0),
        }
    }

    pub fn depth(&self) -> f64 {
        self.pos.y
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::initial()
    }
}

// ---------------------------------------------------------------------------
// Vehicle constants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmarineParams {
    pub mass: f64,
    pub drag: f64,          // linear drag on vertical velocity
    pub actuator_gain: f64, // force per unit of (action + disturbance)
    pub dt: f64,            // seconds per simulation step
}

impl Default for SubmarineParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            drag: 0.1,
            actuator_gain: 1.0,
            dt: 1.0,
        }
    }
}
