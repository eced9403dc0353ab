use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::gnc::PdGains;
use crate::mission::Mission;
use crate::sim::PerformanceMetrics;

/// Summary of one closed-loop run, as written to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub mission: MissionSummary,
    pub controller: PdGains,
    pub dt: f64,
    pub performance: PerformanceMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct MissionSummary {
    pub steps: usize,
    pub min_reference: f64,
    pub max_reference: f64,
}

impl MissionSummary {
    pub fn from_mission(mission: &Mission) -> Self {
        let reference = mission.reference();
        Self {
            steps: reference.len(),
            min_reference: reference.iter().copied().fold(f64::INFINITY, f64::min),
            max_reference: reference.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl RunSummary {
    pub fn new(mission: &Mission, gains: PdGains, dt: f64, performance: PerformanceMetrics) -> Self {
        Self { mission: MissionSummary::from_mission(mission), controller: gains, dt, performance }
    }
}

/// Write run summary as pretty-printed JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &RunSummary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer)
}

/// Write run summary JSON to a file.
pub fn write_summary_file<P: AsRef<Path>>(path: P, summary: &RunSummary) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_summary(&mut file, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::presets;

    #[test]
    fn json_output_is_valid() {
        let mission = presets::step(10, 3, -2.0);
        let metrics = PerformanceMetrics {
            overshoot_pct: None,
            steady_state_error: 0.25,
            settling_index: 7,
            settling_time: 8.0,
        };
        let summary = RunSummary::new(&mission, PdGains::default(), 1.0, metrics);

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["mission"]["steps"], 10);
        assert_eq!(value["mission"]["min_reference"], -2.0);
        assert_eq!(value["controller"]["kp"], 0.15);
        assert!(value["performance"]["overshoot_pct"].is_null());
        assert_eq!(value["performance"]["settling_time"], 8.0);
    }
}
