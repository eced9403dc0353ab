use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// Recorded run
// ---------------------------------------------------------------------------

/// Positions seen at the start of each step, plus the action issued on that step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    position: Vec<Vector2<f64>>,
    actions: Vec<f64>,
}

impl Trajectory {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            position: Vec::with_capacity(n),
            actions: Vec::with_capacity(n),
        }
    }

    pub(crate) fn record(&mut self, position: Vector2<f64>, action: f64) {
        self.position.push(position);
        self.actions.push(action);
    }

    /// Build a trajectory from depth samples alone, with `x = t` and zero actions.
    pub fn from_depths(depths: &[f64]) -> Self {
        Self {
            position: depths
                .iter()
                .enumerate()
                .map(|(t, &y)| Vector2::new(t as f64, y))
                .collect(),
            actions: vec![0.0; depths.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn positions(&self) -> &[Vector2<f64>] {
        &self.position
    }

    pub fn actions(&self) -> &[f64] {
        &self.actions
    }

    pub fn depths(&self) -> Vec<f64> {
        self.position.iter().map(|p| p.y).collect()
    }

    pub fn last(&self) -> Option<&Vector2<f64>> {
        self.position.last()
    }
}
