use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;

use uuv_sim::config::SimConfig;
use uuv_sim::io::csv;
use uuv_sim::io::json::{self, RunSummary};
use uuv_sim::mission::{Mission, MissionError};

#[test]
fn mission_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mission.csv");

    let mission = Mission::random(120, 3.0, &mut StdRng::seed_from_u64(21));
    csv::write_mission_file(&path, &mission).unwrap();
    let loaded = csv::read_mission_file(&path).unwrap();
    assert_eq!(loaded, mission);
}

#[test]
fn missing_mission_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = csv::read_mission_file(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, MissionError::Io(_)));
}

#[test]
fn full_run_from_config_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("run.toml");
    fs::write(
        &config_path,
        "[controller]\nkp = 0.2\n\n[disturbance]\nvariance = 0.05\nseed = 8\n",
    )
    .unwrap();
    let mission_path = dir.path().join("mission.csv");
    fs::write(
        &mission_path,
        "reference,cave_height,cave_depth\n\
         0.0,1.0,-1.0\n\
         -1.0,0.0,-2.0\n\
         -2.0,-1.0,-3.0\n\
         -2.0,-1.0,-3.0\n\
         -2.0,-1.0,-3.0\n",
    )
    .unwrap();

    let cfg = SimConfig::load(&config_path).unwrap();
    let mission = csv::read_mission_file(&mission_path).unwrap();
    let mut cl = cfg.closed_loop();
    let mut rng = StdRng::seed_from_u64(cfg.disturbance.seed.unwrap());
    let traj = cl.simulate_with_rng(&mission, cfg.disturbance.variance, &mut rng).unwrap();
    let metrics = cl.calculate_performance_metrics(&traj, &mission).unwrap();
    assert_eq!(traj.len(), 5);
    assert!(metrics.overshoot_pct.is_some());

    let traj_path = dir.path().join("trajectory.csv");
    csv::write_trajectory_file(&traj_path, &traj, &mission, cfg.vehicle.dt).unwrap();
    let text = fs::read_to_string(&traj_path).unwrap();
    assert_eq!(text.lines().count(), 6);

    let summary_path = dir.path().join("summary.json");
    let summary = RunSummary::new(&mission, cfg.controller.gains(), cfg.vehicle.dt, metrics);
    json::write_summary_file(&summary_path, &summary).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(value["controller"]["kp"], 0.2);
    assert_eq!(value["mission"]["steps"], 5);
}
