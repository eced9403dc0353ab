use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::disturbance::gaussian_disturbances;
use super::error::SimError;
use super::metrics::{calculate_performance_metrics, PerformanceMetrics};
use super::trajectory::Trajectory;
use crate::dynamics::Submarine;
use crate::gnc::{Controller, PdController};
use crate::mission::Mission;

// ---------------------------------------------------------------------------
// Controller carry-over policy
// ---------------------------------------------------------------------------

/// What happens to controller memory between two `simulate` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerReset {
    /// Reset the controller together with the vehicle; repeated runs on the
    /// same inputs give the same trajectory.
    #[default]
    PerRun,
    /// Keep the controller's previous error from the last run. The first
    /// action of the next run then depends on how the last one ended.
    Carry,
}

// ---------------------------------------------------------------------------
// Closed loop: plant + controller
// ---------------------------------------------------------------------------

pub struct ClosedLoop<C: Controller = PdController> {
    pub plant: Submarine,
    pub controller: C,
    pub controller_reset: ControllerReset,
}

impl<C: Controller> ClosedLoop<C> {
    pub fn new(plant: Submarine, controller: C) -> Self {
        Self { plant, controller, controller_reset: ControllerReset::default() }
    }

    pub fn with_controller_reset(mut self, policy: ControllerReset) -> Self {
        self.controller_reset = policy;
        self
    }

    /// Run the mission against a caller-supplied disturbance sequence.
    ///
    /// Only the first `mission.duration()` disturbances are used. The returned
    /// trajectory holds the state seen at the start of each step, so entry 0 is
    /// the reset state and the state after the final transition is dropped.
    pub fn simulate(
        &mut self,
        mission: &Mission,
        disturbances: &[f64],
    ) -> Result<Trajectory, SimError> {
        let horizon = mission.duration();
        if disturbances.len() < horizon {
            return Err(SimError::InvalidInput {
                disturbances: disturbances.len(),
                horizon,
            });
        }

        self.plant.reset_state();
        if self.controller_reset == ControllerReset::PerRun {
            self.controller.reset();
        }
        debug!(
            horizon,
            controller = self.controller.name(),
            policy = ?self.controller_reset,
            "starting closed-loop run"
        );

        let mut trajectory = Trajectory::with_capacity(horizon);
        for (&reference, &disturbance) in mission.reference().iter().zip(disturbances) {
            let position = self.plant.state().pos;
            let observation = self.plant.get_depth();
            let action = self.controller.compute_control_action(reference, observation);
            self.plant.transition(action, disturbance);
            trajectory.record(position, action);
        }

        Ok(trajectory)
    }

    /// Run with Gaussian disturbances from thread-local entropy, then report
    /// the performance metrics.
    pub fn simulate_with_random_disturbances(
        &mut self,
        mission: &Mission,
        variance: f64,
    ) -> Result<Trajectory, SimError> {
        self.simulate_with_rng(mission, variance, &mut rand::thread_rng())
    }

    /// As `simulate_with_random_disturbances`, drawing from `rng`.
    pub fn simulate_with_rng<R: Rng + ?Sized>(
        &mut self,
        mission: &Mission,
        variance: f64,
        rng: &mut R,
    ) -> Result<Trajectory, SimError> {
        let disturbances = gaussian_disturbances(mission.duration(), variance, rng)?;
        let trajectory = self.simulate(mission, &disturbances)?;
        // A zero-length mission has nothing to report.
        if !mission.is_empty() {
            let metrics = self.calculate_performance_metrics(&trajectory, mission)?;
            report(&metrics);
        }
        Ok(trajectory)
    }

    /// Metrics for a run of this loop, timed with the plant's step length.
    pub fn calculate_performance_metrics(
        &self,
        trajectory: &Trajectory,
        mission: &Mission,
    ) -> Result<PerformanceMetrics, SimError> {
        calculate_performance_metrics(trajectory, mission, self.plant.dt())
    }
}

impl Default for ClosedLoop<PdController> {
    fn default() -> Self {
        Self::new(Submarine::default(), PdController::default())
    }
}

fn report(metrics: &PerformanceMetrics) {
    info!(
        overshoot_pct = ?metrics.overshoot_pct,
        steady_state_error = metrics.steady_state_error,
        settling_time = metrics.settling_time,
        settling_index = metrics.settling_index,
        "performance metrics"
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::presets;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    fn default_loop() -> ClosedLoop {
        ClosedLoop::default()
    }

    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn zero_reference_zero_disturbance_stays_at_origin() {
        let mut cl = default_loop();
        let mission = presets::constant(5, 0.0, 1.0);
        let traj = cl.simulate(&mission, &[0.0; 5]).unwrap();
        assert_eq!(traj.depths(), vec![0.0; 5]);
        assert!(traj.actions().iter().all(|&a| a == 0.0));
    }

    #[test]
    fn x_advances_one_unit_per_step() {
        let mut cl = default_loop();
        let mission = presets::constant(4, 3.0, 1.0);
        let traj = cl.simulate(&mission, &[0.0; 4]).unwrap();
        let xs: Vec<f64> = traj.positions().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn short_disturbance_rejected_before_any_mutation() {
        let mut cl = default_loop();
        let mission = presets::constant(5, 1.0, 1.0);
        cl.simulate(&mission, &[0.0; 5]).unwrap();
        let state_before = *cl.plant.state();
        let prev_error_before = cl.controller.previous_error();

        let err = cl.simulate(&mission, &[0.0; 4]).unwrap_err();
        assert_eq!(err, SimError::InvalidInput { disturbances: 4, horizon: 5 });
        assert_eq!(*cl.plant.state(), state_before);
        assert_eq!(cl.controller.previous_error(), prev_error_before);
    }

    #[test]
    fn extra_disturbances_are_ignored() {
        let mission = presets::constant(3, 0.0, 1.0);
        let mut cl = default_loop();
        let a = cl.simulate(&mission, &[0.0, 0.0, 0.0]).unwrap();
        let b = cl.simulate(&mission, &[0.0, 0.0, 0.0, 9.0, 9.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_random_runs_are_reproducible() {
        let mission = presets::step(40, 5, -4.0);
        let mut cl = default_loop();
        let a = cl.simulate_with_rng(&mission, 0.5, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = cl.simulate_with_rng(&mission, 0.5, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
    }

    #[test]
    fn random_run_reports_metrics_as_one_event() {
        let sink = LogSink::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let mission = presets::step(20, 5, -2.0);
        tracing::subscriber::with_default(subscriber, || {
            default_loop()
                .simulate_with_rng(&mission, 0.5, &mut StdRng::seed_from_u64(3))
                .unwrap();
        });

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.lines().count(), 1, "{text}");
        assert!(text.contains("performance metrics"));
        assert!(text.contains("settling_time="));
        assert!(!text.contains("Settling Time:"));
    }

    #[test]
    fn random_run_rejects_bad_variance() {
        let mission = presets::constant(3, 1.0, 1.0);
        let mut cl = default_loop();
        assert_eq!(
            cl.simulate_with_random_disturbances(&mission, -0.5),
            Err(SimError::InvalidVariance(-0.5))
        );
    }

    #[test]
    fn empty_mission_gives_empty_trajectory() {
        let mission = presets::constant(0, 1.0, 1.0);
        let mut cl = default_loop();
        let traj = cl.simulate_with_random_disturbances(&mission, 0.5).unwrap();
        assert!(traj.is_empty());
    }
}
