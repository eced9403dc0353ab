use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::error::SimError;
use super::trajectory::Trajectory;
use crate::mission::Mission;

/// Relative half-width of the settling band.
pub const SETTLING_TOLERANCE: f64 = 0.02;

// ---------------------------------------------------------------------------
// Performance summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Peak depth error as a percentage of peak reference magnitude.
    /// `None` when the reference is zero everywhere.
    pub overshoot_pct: Option<f64>,
    pub steady_state_error: f64,
    /// Step index of the last excursion outside the band (see `settling_index`).
    pub settling_index: usize,
    pub settling_time: f64,
}

impl fmt::Display for PerformanceMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.overshoot_pct {
            Some(pct) => writeln!(f, "Overshoot: {:.2}%", pct)?,
            None => writeln!(f, "Overshoot: undefined (zero reference)")?,
        }
        writeln!(f, "Steady-State Error: {:.2}", self.steady_state_error)?;
        write!(f, "Settling Time: {:.2} seconds", self.settling_time)
    }
}

// ---------------------------------------------------------------------------
// Pure metric functions
// ---------------------------------------------------------------------------

/// `100 * max|y - r| / max|r|`, or `None` if every reference sample is 0.
pub fn overshoot_pct(depths: &[f64], reference: &[f64]) -> Option<f64> {
    let peak_reference = reference.iter().map(|r| r.abs()).fold(0.0_f64, f64::max);
    if peak_reference == 0.0 {
        return None;
    }
    let peak_deviation = depths
        .iter()
        .zip(reference)
        .map(|(y, r)| (y - r).abs())
        .fold(0.0_f64, f64::max);
    Some(100.0 * peak_deviation / peak_reference)
}

/// Whether `depth` lies strictly inside the settling band around `reference`.
/// A zero reference has a zero-width band, so only an exact match counts.
pub fn within_tolerance(depth: f64, reference: f64) -> bool {
    let error = (depth - reference).abs();
    if reference == 0.0 {
        error == 0.0
    } else {
        error < SETTLING_TOLERANCE * reference.abs()
    }
}

/// Index of the latest step that is outside the settling band.
///
/// Scans backward from `T-1` to `1`; the first miss found is returned. Step 0
/// is never inspected. When every step from 1 onward is inside the band (or
/// `T <= 1`) the result defaults to `T-1`, so a run is never reported as having
/// settled before its final sample.
pub fn settling_index(depths: &[f64], reference: &[f64]) -> usize {
    let horizon = depths.len().min(reference.len());
    let default = horizon.saturating_sub(1);

    for t in (1..horizon).rev() {
        if !within_tolerance(depths[t], reference[t]) {
            return t;
        }
    }
    default
}

/// Evaluate a finished run against its mission. `dt` converts steps to seconds.
pub fn calculate_performance_metrics(
    trajectory: &Trajectory,
    mission: &Mission,
    dt: f64,
) -> Result<PerformanceMetrics, SimError> {
    if mission.is_empty() {
        return Err(SimError::EmptyMission);
    }
    if trajectory.len() != mission.duration() {
        return Err(SimError::LengthMismatch {
            trajectory: trajectory.len(),
            mission: mission.duration(),
        });
    }

    let depths = trajectory.depths();
    let reference = mission.reference();
    let last = reference.len() - 1;

    let overshoot_pct = overshoot_pct(&depths, reference);
    if overshoot_pct.is_none() {
        warn!("reference is zero at every step, overshoot is undefined");
    }

    let settling_index = settling_index(&depths, reference);

    Ok(PerformanceMetrics {
        overshoot_pct,
        steady_state_error: (depths[last] - reference[last]).abs(),
        settling_index,
        settling_time: (settling_index + 1) as f64 * dt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::presets;

    #[test]
    fn overshoot_relative_to_peak_reference() {
        let pct = overshoot_pct(&[0.0, 2.5, 4.0], &[2.0, 2.0, 4.0]).unwrap();
        // peak deviation 2.0, peak reference 4.0
        assert!((pct - 50.0).abs() < 1e-12);
    }

    #[test]
    fn overshoot_undefined_for_zero_reference() {
        assert_eq!(overshoot_pct(&[0.1, -0.2], &[0.0, 0.0]), None);
    }

    #[test]
    fn zero_reference_band_requires_exact_match() {
        assert!(within_tolerance(0.0, 0.0));
        assert!(!within_tolerance(1e-9, 0.0));
        assert!(within_tolerance(-10.1, -10.0));
        assert!(!within_tolerance(-10.2, -10.0));
    }

    #[test]
    fn settling_finds_latest_excursion_not_first_entry() {
        let reference = [10.0; 8];
        // in, out, in, in, out, in, in, in
        let depths = [10.0, 0.0, 10.0, 10.0, 11.0, 10.0, 10.0, 10.0];
        assert_eq!(settling_index(&depths, &reference), 4);
    }

    #[test]
    fn settling_defaults_to_last_index_when_only_first_step_misses() {
        let reference = [5.0; 6];
        let depths = [0.0, 5.0, 5.0, 5.0, 5.0, 5.0];
        assert_eq!(settling_index(&depths, &reference), 5);
    }

    #[test]
    fn settling_reports_final_step_excursion() {
        let reference = [5.0; 4];
        let depths = [5.0, 5.0, 5.0, 7.0];
        assert_eq!(settling_index(&depths, &reference), 3);
    }

    #[test]
    fn settling_short_horizons() {
        assert_eq!(settling_index(&[], &[]), 0);
        assert_eq!(settling_index(&[3.0], &[1.0]), 0);
        assert_eq!(settling_index(&[1.0, 3.0], &[1.0, 1.0]), 1);
    }

    #[test]
    fn metrics_on_hand_built_run() {
        let mission = presets::constant(5, 10.0, 2.0);
        let trajectory = Trajectory::from_depths(&[0.0, 6.0, 12.0, 10.1, 9.9]);
        let m = calculate_performance_metrics(&trajectory, &mission, 0.5).unwrap();

        assert!((m.overshoot_pct.unwrap() - 100.0).abs() < 1e-12);
        assert!((m.steady_state_error - 0.1).abs() < 1e-9);
        assert_eq!(m.settling_index, 2);
        assert!((m.settling_time - 1.5).abs() < 1e-12);
    }

    #[test]
    fn single_mid_run_excursion_settles_after_it() {
        let mission = presets::constant(5, 10.0, 2.0);
        let trajectory = Trajectory::from_depths(&[10.0, 10.0, 13.0, 10.0, 10.0]);
        let m = calculate_performance_metrics(&trajectory, &mission, 1.0).unwrap();

        assert_eq!(m.settling_index, 2);
        assert!((m.settling_time - 3.0).abs() < 1e-12);
    }

    #[test]
    fn metrics_reject_empty_and_mismatched() {
        let empty = presets::constant(0, 1.0, 1.0);
        assert_eq!(
            calculate_performance_metrics(&Trajectory::default(), &empty, 1.0),
            Err(SimError::EmptyMission)
        );

        let mission = presets::constant(3, 1.0, 1.0);
        let short = Trajectory::from_depths(&[1.0, 1.0]);
        assert_eq!(
            calculate_performance_metrics(&short, &mission, 1.0),
            Err(SimError::LengthMismatch { trajectory: 2, mission: 3 })
        );
    }

    #[test]
    fn display_uses_two_decimals() {
        let m = PerformanceMetrics {
            overshoot_pct: Some(12.345),
            steady_state_error: 0.5,
            settling_index: 9,
            settling_time: 10.0,
        };
        let text = m.to_string();
        assert!(text.contains("Overshoot: 12.35%") || text.contains("Overshoot: 12.34%"));
        assert!(text.contains("Steady-State Error: 0.50"));
        assert!(text.contains("Settling Time: 10.00 seconds"));
    }
}
