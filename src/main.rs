use pendsim::{Scenario, ScenarioConfig, Controller, Command};
use pendsim::run_2d;
use pendsim::{bench_rk4, bench_chain_curve, bench_drift_curve};

use clap::{Parser, Subcommand};
use anyhow::{Context, Result};
use tracing::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file inside the `scenarios` directory
    #[arg(short, default_value = "double.yaml")]
    file_name: String,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Interactive window (default)
    View,
    /// Run without a window and print the energy drift once per simulated second
    Run {
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,
    },
    /// Integrator timings and energy drift against step size
    Bench,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn run_headless(mut controller: Controller, seconds: f64) {
    let frame_dt = controller.parameters().frame_dt;
    let frames = (seconds / frame_dt).round() as usize;
    let frames_per_report = (1.0 / frame_dt).round().max(1.0) as usize;

    info!(frames, frame_dt, speedup = controller.speedup(), "headless run");
    println!("t,energy,drift_percent");

    controller.tick(frame_dt, &[Command::ToggleRun]);
    for frame in 1..frames {
        controller.tick(frame_dt, &[]);
        if frame % frames_per_report == 0 {
            let drift = controller.energy_drift_percent().unwrap_or(f64::NAN);
            println!("{:.3},{:.3},{:.6}", controller.time(), controller.energy(), drift);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.mode.unwrap_or(Mode::View) {
        Mode::View => {
            let scenario = Scenario::build_scenario(load_scenario_from_yaml(&args.file_name)?)?;
            run_2d(scenario.into_controller());
        }
        Mode::Run { seconds } => {
            tracing_subscriber::fmt::init();
            let scenario = Scenario::build_scenario(load_scenario_from_yaml(&args.file_name)?)?;
            run_headless(scenario.into_controller(), seconds);
        }
        Mode::Bench => {
            tracing_subscriber::fmt::init();
            bench_rk4();
            bench_chain_curve();
            bench_drift_curve();
        }
    }

    Ok(())
}
