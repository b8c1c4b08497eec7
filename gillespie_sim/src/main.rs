//! Gillespie Ensemble Simulator CLI
//!
//! Run repeated stochastic simulations of a reaction network scenario.

use clap::Parser;
use gillespie_core::Method;
use gillespie_sim::scenarios::ScenarioId;
use gillespie_sim::{EnsembleRunner, EnsembleSummary, SimConfig, SimError, SimExport};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Gillespie stochastic simulation CLI
#[derive(Parser, Debug)]
#[command(name = "gillespie-sim")]
#[command(about = "Run repeated Gillespie simulations of a reaction network", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Event selection method (direct, first_reaction)
    #[arg(short, long)]
    method: Option<Method>,

    /// Scenario to run (gibson_bruck, decomposition, catalysis, dormant)
    #[arg(short = 'S', long)]
    scenario: Option<ScenarioId>,

    /// Number of independent trials
    #[arg(short = 'n', long)]
    trials: Option<usize>,

    /// Number of windowing checkpoints
    #[arg(short, long)]
    checkpoints: Option<usize>,

    /// Simulation start time
    #[arg(long)]
    t_start: Option<f64>,

    /// Simulation horizon
    #[arg(long)]
    t_end: Option<f64>,

    /// Worker threads for parallel trials (sequential if omitted)
    #[arg(short, long)]
    threads: Option<usize>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<String>,

    /// Print the state active at this time for trial 0
    #[arg(long)]
    query_time: Option<f64>,

    /// Export trial 0 and the ensemble summary to a JSON file
    #[arg(long)]
    export: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for scripting
    #[arg(long)]
    json: bool,
}

/// Merges the config file (if any) with command-line overrides.
fn build_config(args: &Args) -> Result<SimConfig, SimError> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = SimConfig::from_json_file(path)?;
            if let Some(scenario) = args.scenario {
                config.scenario = scenario;
            }
            config
        }
        None => SimConfig::for_scenario(args.scenario.unwrap_or(ScenarioId::GibsonBruck)),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(method) = args.method {
        config.method = method;
    }
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(checkpoints) = args.checkpoints {
        config.checkpoints = checkpoints;
    }
    if let Some(t_start) = args.t_start {
        config.t_start = t_start;
    }
    if let Some(t_end) = args.t_end {
        config.t_end = t_end;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }

    // Determine base seed
    if config.seed == 0 {
        config.seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
    }

    config.validate()?;
    Ok(config)
}

/// Runs the ensemble. Returns false when every trial failed.
fn run(args: &Args) -> Result<bool, SimError> {
    let config = build_config(args)?;
    let runner = EnsembleRunner::new(config)?;
    let config = runner.config();

    if !args.json {
        info!("Scenario: {} - {}", config.scenario, config.scenario.description());
        info!(
            "Method: {} | trials: {} | t: [{}, {}] | checkpoints: {}",
            config.method, config.trials, config.t_start, config.t_end, config.checkpoints
        );
    }

    if let Some(time) = args.query_time {
        let outcome = runner.simulate(0)?;
        match outcome.trajectory.describe_at(time) {
            Ok(line) => info!("{}", line),
            Err(e) => warn!("{}", e),
        }
    }

    let report = runner.run()?;
    let summary = EnsembleSummary::from_report(&report);

    if let Some(path) = &args.export {
        let outcome = runner.simulate(0)?;
        let mut export = SimExport::new(
            config.scenario.name(),
            config.method.name(),
            runner.trial_seed(0),
            report.species.clone(),
        );
        export.add_outcome(&outcome);
        export.finalize(Some(summary.clone()));
        export.write_to_file(path)?;
        info!("Exported {} points to {}", export.points.len(), path);
    }

    if args.json {
        let output = serde_json::json!({
            "scenario": config.scenario.name(),
            "method": config.method.name(),
            "seed": config.seed,
            "trials": report.attempted(),
            "succeeded": report.trials.len(),
            "failed": report.failures.len(),
            "summary": summary,
            "failures": report.failures,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        info!("");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!(
            "{}/{} trials succeeded, {:.1}% reached equilibrium",
            summary.trials,
            report.attempted(),
            summary.equilibrium_fraction * 100.0
        );
        if let Some(t) = summary.mean_equilibrium_time {
            info!("Mean time to equilibrium: {:.4}", t);
        }
        info!("Mean firings per trial: {:.1}", summary.mean_steps);
        if let Some(means) = summary.final_means() {
            let pairs: Vec<String> = summary
                .species
                .iter()
                .zip(means)
                .map(|(name, mean)| format!("{}={:.2}", name, mean))
                .collect();
            info!("Mean state at last window: {}", pairs.join(" "));
        }
        for failure in &report.failures {
            error!("  - trial {} seed={}: {}", failure.trial, failure.seed, failure.reason);
        }
    }

    Ok(!report.all_failed())
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if !args.json {
        info!("Gillespie Ensemble Simulator v0.1.0");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    match run(&args) {
        Ok(true) => {}
        Ok(false) => {
            error!("Every trial failed");
            std::process::exit(1);
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
