use serde::{Deserialize, Serialize};

use super::Controller;

// ---------------------------------------------------------------------------
// PD gains
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdGains {
    pub kp: f64,
    pub kd: f64,
}

impl Default for PdGains {
    fn default() -> Self {
        Self { kp: 0.15, kd: 0.6 }
    }
}

// ---------------------------------------------------------------------------
// PD Controller (depth axis)
// ---------------------------------------------------------------------------

/// Discrete PD law. The derivative term is the raw error difference between
/// consecutive calls, not divided by the step length.
#[derive(Debug, Clone)]
pub struct PdController {
    pub kp: f64,
    pub kd: f64,
    previous_error: f64,
}

impl PdController {
    pub fn new(kp: f64, kd: f64) -> Self {
        Self { kp, kd, previous_error: 0.0 }
    }

    pub fn from_gains(gains: PdGains) -> Self {
        Self::new(gains.kp, gains.kd)
    }

    pub fn gains(&self) -> PdGains {
        PdGains { kp: self.kp, kd: self.kd }
    }

    pub fn update(&mut self, reference: f64, current_depth: f64) -> f64 {
        let error = reference - current_depth;
        let action = self.kp * error + self.kd * (error - self.previous_error);
        self.previous_error = error;
        action
    }

    /// Error seen on the most recent call (0 before the first call).
    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }

    pub fn reset(&mut self) {
        self.previous_error = 0.0;
    }
}

impl Default for PdController {
    fn default() -> Self {
        Self::from_gains(PdGains::default())
    }
}

impl Controller for PdController {
    fn compute_control_action(&mut self, reference: f64, current_depth: f64) -> f64 {
        self.update(reference, current_depth)
    }

    fn reset(&mut self) {
        PdController::reset(self);
    }

    fn name(&self) -> &str {
        "PdController"
    }
}
