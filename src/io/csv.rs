use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mission::{Mission, MissionBuilder, MissionError};
use crate::sim::Trajectory;

// ---------------------------------------------------------------------------
// Mission tables
// ---------------------------------------------------------------------------

/// One row of a mission table. Columns other than these three are ignored.
#[derive(Debug, Serialize, Deserialize)]
struct MissionRecord {
    reference: f64,
    cave_height: f64,
    cave_depth: f64,
}

/// Read a mission from CSV with a header naming the `reference`,
/// `cave_height` and `cave_depth` columns (in any order).
pub fn read_mission<R: Read>(reader: R) -> Result<Mission, MissionError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut builder = MissionBuilder::new();
    for record in rdr.deserialize() {
        let row: MissionRecord = record?;
        builder.push(row.reference, row.cave_height, row.cave_depth);
    }
    Ok(builder.build())
}

pub fn read_mission_file<P: AsRef<Path>>(path: P) -> Result<Mission, MissionError> {
    let file = File::open(path)?;
    read_mission(file)
}

/// Write a mission in the same three-column format `read_mission` accepts.
pub fn write_mission<W: Write>(writer: &mut W, mission: &Mission) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (reference, cave_height, cave_depth) in mission.samples() {
        wtr.serialize(MissionRecord { reference, cave_height, cave_depth })?;
    }
    wtr.flush()
}

pub fn write_mission_file<P: AsRef<Path>>(path: P, mission: &Mission) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_mission(&mut file, mission)
}

// ---------------------------------------------------------------------------
// Trajectory export
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct TrajectoryRecord {
    step: usize,
    time: f64,
    pos_x: f64,
    pos_y: f64,
    action: f64,
    reference: f64,
}

/// Write trajectory data to CSV format.
///
/// Columns: step, time, pos_x, pos_y, action, reference
pub fn write_trajectory<W: Write>(
    writer: &mut W,
    trajectory: &Trajectory,
    mission: &Mission,
    dt: f64,
) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let rows = trajectory
        .positions()
        .iter()
        .zip(trajectory.actions())
        .zip(mission.reference());
    for (step, ((pos, &action), &reference)) in rows.enumerate() {
        wtr.serialize(TrajectoryRecord {
            step,
            time: step as f64 * dt,
            pos_x: pos.x,
            pos_y: pos.y,
            action,
            reference,
        })?;
    }
    wtr.flush()
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file<P: AsRef<Path>>(
    path: P,
    trajectory: &Trajectory,
    mission: &Mission,
    dt: f64,
) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_trajectory(&mut file, trajectory, mission, dt)
}
