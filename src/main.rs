use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use uuv_sim::config::SimConfig;
use uuv_sim::io::csv;
use uuv_sim::io::json::{self, RunSummary};
use uuv_sim::mission::Mission;
use uuv_sim::sim::{gaussian_disturbances, Trajectory};

/// Closed-loop depth control of a UUV through a cave cross-section.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML file with vehicle, controller, disturbance and mission parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mission CSV with `reference`, `cave_height` and `cave_depth` columns.
    /// A random cave is generated when omitted.
    #[arg(short, long)]
    mission: Option<PathBuf>,

    /// Steps in a generated mission (overrides the config)
    #[arg(long)]
    duration: Option<usize>,

    /// Terrain scale of a generated mission (overrides the config)
    #[arg(long)]
    scale: Option<f64>,

    /// Disturbance variance (overrides the config)
    #[arg(long)]
    variance: Option<f64>,

    /// RNG seed for the mission generator and disturbances
    #[arg(long)]
    seed: Option<u64>,

    /// Write the recorded trajectory to this CSV file
    #[arg(long)]
    trajectory_out: Option<PathBuf>,

    /// Write a JSON run summary to this file
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Save the mission that was flown to this CSV file
    #[arg(long)]
    save_mission: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cfg = SimConfig::load_or_default(args.config.as_deref())
        .context("loading config")?;
    if let Some(d) = args.duration {
        cfg.mission.duration = d;
    }
    if let Some(s) = args.scale {
        cfg.mission.scale = s;
    }
    if let Some(v) = args.variance {
        cfg.disturbance.variance = v;
    }
    if args.seed.is_some() {
        cfg.disturbance.seed = args.seed;
    }
    info!(?cfg, "Simulation config loaded");

    let mut rng = cfg.rng();

    // -----------------------------------------------------------------------
    // Mission
    // -----------------------------------------------------------------------
    let mission = cfg
        .mission(args.mission.as_deref(), &mut rng)
        .context("preparing mission")?;
    info!(steps = mission.duration(), "Mission ready");

    if let Some(path) = &args.save_mission {
        csv::write_mission_file(path, &mission)
            .with_context(|| format!("writing mission {}", path.display()))?;
    }

    // -----------------------------------------------------------------------
    // Run closed loop
    // -----------------------------------------------------------------------
    let mut closed_loop = cfg.closed_loop();
    let disturbances =
        gaussian_disturbances(mission.duration(), cfg.disturbance.variance, &mut rng)?;
    let trajectory = closed_loop.simulate(&mission, &disturbances)?;
    let metrics = closed_loop.calculate_performance_metrics(&trajectory, &mission)?;

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  UUV DEPTH CONTROL: {} steps, dt={} s", mission.duration(), cfg.vehicle.dt);
    println!("====================================================================");
    println!();
    println!("  Vehicle / Controller");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:        {:>8.3}       Drag:         {:>8.3}",
        cfg.vehicle.mass, cfg.vehicle.drag
    );
    println!(
        "  Act. gain:   {:>8.3}       Kp / Kd:      {:>6.3} / {:.3}",
        cfg.vehicle.actuator_gain, cfg.controller.kp, cfg.controller.kd
    );
    println!(
        "  Disturbance variance: {:.3}   Controller reset: {:?}",
        cfg.disturbance.variance, cfg.controller.reset
    );
    println!();
    println!("  Performance");
    println!("  ──────────────────────────────────────────────────────────────────");
    for line in metrics.to_string().lines() {
        println!("  {}", line);
    }
    if let Some(last) = trajectory.last() {
        println!("  Final depth: {:.2} m at x = {:.1} m", last.y, last.x);
    }
    println!("  Cave contacts: {}", count_contacts(&trajectory, &mission));
    println!();

    if let Some(path) = &args.trajectory_out {
        csv::write_trajectory_file(path, &trajectory, &mission, cfg.vehicle.dt)
            .with_context(|| format!("writing trajectory {}", path.display()))?;
        println!("  Exported trajectory: {}", path.display());
    }
    if let Some(path) = &args.summary_out {
        let summary = RunSummary::new(&mission, cfg.controller.gains(), cfg.vehicle.dt, metrics);
        json::write_summary_file(path, &summary)
            .with_context(|| format!("writing summary {}", path.display()))?;
        println!("  Exported summary: {}", path.display());
    }
    println!("====================================================================");
    println!();

    Ok(())
}

/// Steps at which the recorded depth is outside the cave corridor.
fn count_contacts(trajectory: &Trajectory, mission: &Mission) -> usize {
    trajectory
        .positions()
        .iter()
        .zip(mission.samples())
        .filter(|(p, (_, ceiling, floor))| p.y > *ceiling || p.y < *floor)
        .count()
}
