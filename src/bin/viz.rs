use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use uuv_sim::config::SimConfig;
use uuv_sim::mission::Mission;
use uuv_sim::sim::{PerformanceMetrics, Trajectory};

/// Plot one closed-loop run through a cave mission.
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

    /// RNG seed for the mission generator and disturbances (overrides the config)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let app = match run(&Args::parse()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("simulation failed: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("UUV Cave Mission", options, Box::new(|_| Ok(Box::new(app))))
}

fn run(args: &Args) -> Result<MissionViz> {
    let mut cfg = SimConfig::load_or_default(args.config.as_deref())
        .context("loading config")?;
    if args.seed.is_some() {
        cfg.disturbance.seed = args.seed;
    }

    let mut rng = cfg.rng();
    let mission = cfg.mission(args.mission.as_deref(), &mut rng).context("preparing mission")?;

    let mut closed_loop = cfg.closed_loop();
    let trajectory = closed_loop.simulate_with_rng(&mission, cfg.disturbance.variance, &mut rng)?;
    let metrics = closed_loop.calculate_performance_metrics(&trajectory, &mission)?;
    Ok(MissionViz { trajectory, mission, metrics })
}

/// Per-step series plotted against the step index.
fn series(values: &[f64]) -> PlotPoints {
    values.iter().enumerate().map(|(t, &v)| [t as f64, v]).collect()
}

struct MissionViz {
    trajectory: Trajectory,
    mission: Mission,
    metrics: PerformanceMetrics,
}

impl eframe::App for MissionViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Mission: {} steps", self.mission.duration()));
            let overshoot = self
                .metrics
                .overshoot_pct
                .map_or_else(|| "undefined".to_owned(), |p| format!("{p:.2}%"));
            ui.label(format!(
                "Overshoot: {}  |  Steady-state error: {:.2}  |  Settling time: {:.2} s",
                overshoot, self.metrics.steady_state_error, self.metrics.settling_time,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let top_h = available.y * 0.65;
            let bottom_h = available.y - top_h - 16.0;

            // Cave corridor, reference and trajectory
            ui.label("Depth profile");
            let path: PlotPoints =
                self.trajectory.positions().iter().map(|p| [p.x, p.y]).collect();
            Plot::new("profile")
                .height(top_h)
                .x_axis_label("Step")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Cave ceiling", series(self.mission.cave_height())));
                    plot_ui.line(Line::new("Cave floor", series(self.mission.cave_depth())));
                    plot_ui.line(Line::new("Reference", series(self.mission.reference())));
                    plot_ui.line(Line::new("Trajectory", path));
                });

            // Tracking error and control effort
            ui.label("Tracking error / action");
            let error: Vec<f64> = self
                .trajectory
                .depths()
                .iter()
                .zip(self.mission.reference())
                .map(|(y, r)| r - y)
                .collect();
            Plot::new("error")
                .height(bottom_h)
                .x_axis_label("Step")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Error", series(&error)));
                    plot_ui.line(Line::new("Action", series(self.trajectory.actions())));
                });
        });
    }
}
