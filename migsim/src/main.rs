use migsim::{Controller, RunIdentity, RunOutcome, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

/// Convergent migration of the TRAPPIST-1 planets
#[derive(Parser, Debug)]
#[command(name = "migsim")]
struct Args {
    /// Job number; names the run `run<N>`
    #[arg(short = 'n', long = "njob", default_value_t = 1)]
    job_number: u64,

    /// Print one progress line per output step
    #[arg(short, long)]
    verbose: bool,

    /// Scenario YAML; the embedded TRAPPIST-1 scenario when omitted
    #[arg(short = 'f', long = "file")]
    file_name: Option<PathBuf>,

    /// Base seed; the run uses `seed + njob`. Unseeded when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for the snapshot archive
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let cfg = match &args.file_name {
        Some(path) => ScenarioConfig::from_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => ScenarioConfig::trappist1().context("embedded scenario is invalid")?,
    };
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let run = RunIdentity::new(args.job_number);
    let artifact = run
        .prepare(&args.output_dir)
        .with_context(|| format!("cannot clear previous artifact for {}", run.name))?;

    let cfg = load_scenario(&args)?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(args.job_number)),
        None => ChaCha8Rng::from_os_rng(),
    };

    let scenario = Scenario::build_scenario(&cfg, &mut rng)?;
    let mut engine = scenario.build_engine().context("failed to set up engine")?;

    info!(
        run = %run.name,
        planets = scenario.params.np(),
        outputs = scenario.times.len(),
        dt = scenario.dt,
        "starting integration"
    );

    let controller = Controller::new(&scenario, artifact, args.verbose);
    let summary = controller
        .run(&mut engine, |line| println!("{line}"))
        .with_context(|| format!("{} aborted", run.name))?;

    match summary.outcome {
        RunOutcome::Completed => info!(steps = summary.steps, amd_ratio = summary.amd_ratio, "finished"),
        outcome => info!(%outcome, steps = summary.steps, amd_ratio = summary.amd_ratio, "stopped early"),
    }

    Ok(())
}
