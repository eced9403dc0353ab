use nalgebra::Vector2;

use super::state::{SubmarineParams, VehicleState};

// ---------------------------------------------------------------------------
// Two-phase discrete step
// ---------------------------------------------------------------------------

/// Advance the state by one step of `params.dt`.
///
/// Phase 1 integrates position with the velocity held at the start of the
/// step. Phase 2 computes the vertical force from that same velocity and
/// `input` (action plus disturbance), then integrates velocity. Swapping the
/// phases changes every trajectory, so the order is part of the model.
pub fn integrate_position_then_force(
    state: &VehicleState,
    params: &SubmarineParams,
    input: f64,
) -> VehicleState {
    let pos = state.pos + state.vel * params.dt;

    let force_y = -params.drag * state.vel.y + params.actuator_gain * input;
    let acc_y = force_y / params.mass;

    VehicleState {
        pos,
        vel: Vector2::new(state.vel.x, state.vel.y + acc_y * params.dt),
    }
}

// ---------------------------------------------------------------------------
// Submarine plant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Submarine {
    pub params: SubmarineParams,
    state: VehicleState,
}

impl Submarine {
    pub fn new(params: SubmarineParams) -> Self {
        Self { params, state: VehicleState::initial() }
    }

    /// Apply one control action and one disturbance sample.
    pub fn transition(&mut self, action: f64, disturbance: f64) {
        self.state = integrate_position_then_force(&self.state, &self.params, action + disturbance);
    }

    pub fn get_depth(&self) -> f64 {
        self.state.depth()
    }

    pub fn get_position(&self) -> (f64, f64) {
        (self.state.pos.x, self.state.pos.y)
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// Restore the initial condition. Constants in `params` are untouched.
    pub fn reset_state(&mut self) {
        self.state = VehicleState::initial();
    }

    pub fn dt(&self) -> f64 {
        self.params.dt
    }
}

impl Default for Submarine {
    fn default() -> Self {
        Self::new(SubmarineParams::default())
    }
}
