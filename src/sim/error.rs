use thiserror::Error;

/// Errors raised by the closed loop and the performance evaluator.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error(
        "Disturbance sequence ({disturbances} samples) is shorter than the mission horizon \
         ({horizon} steps)"
    )]
    InvalidInput { disturbances: usize, horizon: usize },

    #[error("Disturbance variance must be finite and non-negative, got {0}")]
    InvalidVariance(f64),

    #[error("Cannot evaluate performance of an empty mission")]
    EmptyMission,

    #[error("Trajectory has {trajectory} steps but the mission has {mission}")]
    LengthMismatch { trajectory: usize, mission: usize },
}
