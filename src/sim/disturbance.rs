use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::error::SimError;

/// Variance used when no disturbance level is configured.
pub const DEFAULT_VARIANCE: f64 = 0.5;

/// Draw `n` independent samples from N(0, variance).
///
/// `variance` is the second moment, so samples use `sqrt(variance)` as their
/// standard deviation. Zero variance gives an all-zero sequence.
pub fn gaussian_disturbances<R: Rng + ?Sized>(
    n: usize,
    variance: f64,
    rng: &mut R,
) -> Result<Vec<f64>, SimError> {
    if !variance.is_finite() || variance < 0.0 {
        return Err(SimError::InvalidVariance(variance));
    }
    let normal =
        Normal::new(0.0, variance.sqrt()).map_err(|_| SimError::InvalidVariance(variance))?;
    Ok((0..n).map(|_| normal.sample(rng)).collect())
}
