/// A depth-keeping control law driven once per step by the closed loop.
///
/// The loop hands over the reference depth for the step and the depth the
/// vehicle reports, and feeds the returned action to the vertical actuator.
pub trait Controller {
    /// Actuator command for one step, from the commanded and observed depth.
    fn compute_control_action(&mut self, reference: f64, current_depth: f64) -> f64;

    /// Forget anything carried over from earlier steps. Called by the loop
    /// before a run when the reset policy is per run; stateless laws keep the
    /// no-op.
    fn reset(&mut self) {}

    /// Label used in the run's log events.
    fn name(&self) -> &str {
        "depth-controller"
    }
}
