use std::f64::consts::TAU;

use rand::Rng;

// ---------------------------------------------------------------------------
// Procedural cave profile
// ---------------------------------------------------------------------------

/// Number of sinusoidal modes summed for the corridor centre line.
const CENTRE_MODES: usize = 4;

/// Narrowest corridor half-width, as a fraction of `scale`.
const MIN_HALF_WIDTH: f64 = 0.15;

/// Generate `(reference, cave_height, cave_depth)` for `duration` steps.
///
/// The centre line is a sum of low-frequency sinusoids with random amplitude
/// and phase, shifted so that it starts at depth 0 where the vehicle starts.
/// The corridor half-width varies slowly and never drops below
/// `MIN_HALF_WIDTH * scale`. The reference follows the centre line, so
/// `cave_depth <= reference <= cave_height` holds at every step.
pub fn generate_reference_and_limits<R: Rng + ?Sized>(
    duration: usize,
    scale: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    if duration == 0 {
        return (vec![], vec![], vec![]);
    }

    let span = duration as f64;
    let modes: Vec<(f64, f64, f64)> = (0..CENTRE_MODES)
        .map(|k| {
            // Mode k completes between k+1 and k+2 periods over the mission.
            let cycles = (k + 1) as f64 + rng.gen::<f64>();
            let amplitude = scale * rng.gen::<f64>() / (k + 1) as f64;
            let phase = rng.gen::<f64>() * TAU;
            (cycles, amplitude, phase)
        })
        .collect();
    let width_phase = rng.gen::<f64>() * TAU;
    let width_cycles = 1.0 + 2.0 * rng.gen::<f64>();

    let centre_at = |t: f64| -> f64 {
        modes
            .iter()
            .map(|&(cycles, amplitude, phase)| amplitude * (TAU * cycles * t / span + phase).sin())
            .sum()
    };
    let offset = centre_at(0.0);

    let mut reference = Vec::with_capacity(duration);
    let mut cave_height = Vec::with_capacity(duration);
    let mut cave_depth = Vec::with_capacity(duration);

    for i in 0..duration {
        let t = i as f64;
        let centre = centre_at(t) - offset;
        let wobble = 0.5 * (1.0 + (TAU * width_cycles * t / span + width_phase).sin());
        let half_width = scale * (MIN_HALF_WIDTH + 0.35 * wobble);

        reference.push(centre);
        cave_height.push(centre + half_width);
        cave_depth.push(centre - half_width);
    }

    (reference, cave_height, cave_depth)
}
