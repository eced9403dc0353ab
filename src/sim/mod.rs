pub mod disturbance;
pub mod error;
pub mod metrics;
pub mod runner;
pub mod trajectory;

pub use disturbance::{gaussian_disturbances, DEFAULT_VARIANCE};
pub use error::SimError;
pub use metrics::{calculate_performance_metrics, settling_index, PerformanceMetrics};
pub use runner::{ClosedLoop, ControllerReset};
pub use trajectory::Trajectory;
