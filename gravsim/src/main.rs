use gravsim::{ScenarioConfig, Scenario};
use gravsim::run_viewer;
use gravsim::{bench_gravity, bench_steps};

use clap::Parser;
use anyhow::{Context, Result};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Barnes-Hut octree gravity simulation")]
struct Args {
    /// Scenario file, relative to the crate's `scenarios` directory
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run without a window and log a summary per step
    #[arg(long)]
    headless: bool,

    /// Override the scenario's headless step count
    #[arg(long)]
    steps: Option<usize>,

    /// Time tree build and force evaluation instead of simulating
    #[arg(long)]
    bench: bool,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    if args.bench {
        bench_gravity(8);
        bench_steps(2500, 5);
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    if args.headless {
        let mut scenario = Scenario::build_scenario(scenario_cfg)?;
        let steps = args.steps.unwrap_or(scenario.simulation.parameters.steps);
        scenario.simulation.run(steps, 1);
        log::info!(
            "done: {} bodies after {} steps, t = {:.3e}",
            scenario.simulation.collect_bodies().len(),
            steps,
            scenario.simulation.system.t
        );
    } else {
        let scenario = Scenario::build_scenario(scenario_cfg)?;
        run_viewer(scenario);
    }

    Ok(())
}
