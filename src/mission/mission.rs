use rand::Rng;
use thiserror::Error;

use super::terrain::generate_reference_and_limits;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum MissionError {
    #[error(
        "Mission columns differ in length (reference: {reference}, cave_height: {cave_height}, \
         cave_depth: {cave_depth})"
    )]
    LengthMismatch {
        reference: usize,
        cave_height: usize,
        cave_depth: usize,
    },

    #[error("Cannot access the mission file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse the mission table: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Mission: reference depth plus the cave corridor around it
// ---------------------------------------------------------------------------

/// One run's worth of input data. `cave_depth[i] <= reference[i] <= cave_height[i]`
/// is the intended reading of the three columns; it is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    reference: Vec<f64>,
    cave_height: Vec<f64>,
    cave_depth: Vec<f64>,
}

impl Mission {
    pub fn new(
        reference: Vec<f64>,
        cave_height: Vec<f64>,
        cave_depth: Vec<f64>,
    ) -> Result<Self, MissionError> {
        if reference.len() != cave_height.len() || reference.len() != cave_depth.len() {
            return Err(MissionError::LengthMismatch {
                reference: reference.len(),
                cave_height: cave_height.len(),
                cave_depth: cave_depth.len(),
            });
        }
        Ok(Self { reference, cave_height, cave_depth })
    }

    /// Procedurally generated cave of `duration` steps. `scale` sets the
    /// amplitude of the terrain and the width of the corridor.
    pub fn random<R: Rng + ?Sized>(duration: usize, scale: f64, rng: &mut R) -> Self {
        let (reference, cave_height, cave_depth) =
            generate_reference_and_limits(duration, scale, rng);
        Self { reference, cave_height, cave_depth }
    }

    /// Mission horizon T.
    pub fn duration(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    pub fn reference(&self) -> &[f64] {
        &self.reference
    }

    pub fn cave_height(&self) -> &[f64] {
        &self.cave_height
    }

    pub fn cave_depth(&self) -> &[f64] {
        &self.cave_depth
    }

    /// Iterate `(reference, cave_height, cave_depth)` per step.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.reference
            .iter()
            .zip(&self.cave_height)
            .zip(&self.cave_depth)
            .map(|((&r, &h), &d)| (r, h, d))
    }
}

// ---------------------------------------------------------------------------
// Mission builder
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MissionBuilder {
    reference: Vec<f64>,
    cave_height: Vec<f64>,
    cave_depth: Vec<f64>,
}

impl MissionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            reference: Vec::with_capacity(n),
            cave_height: Vec::with_capacity(n),
            cave_depth: Vec::with_capacity(n),
        }
    }

    pub fn sample(mut self, reference: f64, cave_height: f64, cave_depth: f64) -> Self {
        self.push(reference, cave_height, cave_depth);
        self
    }

    pub fn push(&mut self, reference: f64, cave_height: f64, cave_depth: f64) {
        self.reference.push(reference);
        self.cave_height.push(cave_height);
        self.cave_depth.push(cave_depth);
    }

    pub fn build(self) -> Mission {
        // Columns grow together, so they are always the same length here.
        Mission {
            reference: self.reference,
            cave_height: self.cave_height,
            cave_depth: self.cave_depth,
        }
    }
}

// ---------------------------------------------------------------------------
// Preset missions
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Constant reference with a fixed-width corridor around it.
    pub fn constant(duration: usize, reference: f64, half_width: f64) -> Mission {
        let mut builder = MissionBuilder::with_capacity(duration);
        for _ in 0..duration {
            builder.push(reference, reference + half_width, reference - half_width);
        }
        builder.build()
    }

    /// Reference that sits at 0 for `hold` steps, then steps to `depth`.
    pub fn step(duration: usize, hold: usize, depth: f64) -> Mission {
        let mut builder = MissionBuilder::with_capacity(duration);
        for t in 0..duration {
            let r = if t < hold { 0.0 } else { depth };
            builder.push(r, r + depth.abs().max(1.0), r - depth.abs().max(1.0));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_rejects_unequal_columns() {
        let err = Mission::new(vec![0.0; 3], vec![1.0; 3], vec![-1.0; 2]).unwrap_err();
        assert!(matches!(
            err,
            MissionError::LengthMismatch { reference: 3, cave_height: 3, cave_depth: 2 }
        ));
    }

    #[test]
    fn bounds_are_not_validated() {
        // Reference outside the corridor is accepted as-is.
        let m = Mission::new(vec![5.0], vec![1.0], vec![-1.0]).unwrap();
        assert_eq!(m.duration(), 1);
    }

    #[test]
    fn builder_keeps_columns_aligned() {
        let m = MissionBuilder::new()
            .sample(0.0, 1.0, -1.0)
            .sample(0.5, 2.0, -2.0)
            .build();
        assert_eq!(m.duration(), 2);
        let samples: Vec<_> = m.samples().collect();
        assert_eq!(samples[1], (0.5, 2.0, -2.0));
    }

    #[test]
    fn random_mission_has_requested_duration() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Mission::random(250, 10.0, &mut rng);
        assert_eq!(m.duration(), 250);
        assert_eq!(m.cave_height().len(), 250);
        assert_eq!(m.cave_depth().len(), 250);
    }

    #[test]
    fn step_preset_switches_after_hold() {
        let m = presets::step(10, 4, -3.0);
        assert_eq!(m.reference()[3], 0.0);
        assert_eq!(m.reference()[4], -3.0);
        for (r, h, d) in m.samples() {
            assert!(d <= r && r <= h);
        }
    }
}
