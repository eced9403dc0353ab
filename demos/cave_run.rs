use rand::rngs::StdRng;
use rand::SeedableRng;

use uuv_sim::io::csv;
use uuv_sim::io::json::{self, RunSummary};
use uuv_sim::mission::Mission;
use uuv_sim::sim::ClosedLoop;

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut rng = StdRng::seed_from_u64(2024);
    let mission = Mission::random(200, 4.0, &mut rng);

    println!("Simulating {} step cave mission ...", mission.duration());
    let mut closed_loop: ClosedLoop = ClosedLoop::default();
    let trajectory = closed_loop
        .simulate_with_rng(&mission, 0.5, &mut rng)
        .expect("Simulation failed");
    let metrics = closed_loop
        .calculate_performance_metrics(&trajectory, &mission)
        .expect("Metrics failed");
    println!("{}", metrics);

    let dt = closed_loop.plant.dt();
    csv::write_mission_file("cave_mission.csv", &mission).expect("Failed to write mission CSV");
    csv::write_trajectory_file("cave_trajectory.csv", &trajectory, &mission, dt)
        .expect("Failed to write trajectory CSV");
    let summary = RunSummary::new(&mission, closed_loop.controller.gains(), dt, metrics);
    json::write_summary_file("cave_summary.json", &summary).expect("Failed to write JSON");

    println!("Exported: cave_mission.csv, cave_trajectory.csv, cave_summary.json");
}
