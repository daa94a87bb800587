//! flavorjet driver
//!
//! Reads an event as `px py pz E label` lines (stdin or a file), clusters it
//! with the configured measure, and prints the inclusive jets sorted by
//! descending pt as `pt eta phi e label`.
//!
//! Exit codes: 0 on success, 2 on corrupt input data, 1 on any other error.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use flavorjet_core::{
    AntiKtMeasure, CaMeasure, DistanceMeasure, EventHistory, FilterPolicy, FlavorAwareClusterer,
    FlavorFilteredMeasure, KtMeasure,
};

mod error;
mod event;

pub use error::{exit_code_for_error, CliError};

/// Which distance measure to cluster with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MeasureKind {
    /// kt: soft objects cluster first
    Kt,
    /// anti-kt: hard objects accrete their neighborhood first
    Antikt,
    /// Cambridge/Aachen: purely angular ordering
    Ca,
}

/// Flavor-aware sequential recombination jet clustering
#[derive(Parser)]
#[command(name = "flavorjet")]
#[command(version = "0.1.0")]
#[command(about = "Cluster a particle event with flavor-aware kt-family measures")]
struct Cli {
    /// Event file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Clustering radius R
    #[arg(short, long, default_value_t = 0.4)]
    radius: f64,

    /// Distance measure
    #[arg(short, long, value_enum, default_value_t = MeasureKind::Antikt)]
    measure: MeasureKind,

    /// Cluster on geometry alone, without the flavor compatibility gate
    #[arg(long)]
    no_flavor_filter: bool,

    /// Use the non-canonical finite incompatibility penalty with this scale
    /// (penalty = scale x beam distance) instead of the infinite sentinel
    #[arg(long, value_name = "SCALE", conflicts_with = "no_flavor_filter")]
    finite_penalty: Option<f64>,

    /// Abort on labeling faults instead of assigning the invalid sentinel
    #[arg(long)]
    strict_labels: bool,

    /// Emit jets and the full merge-step record as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_clusterer(cli: &Cli) -> Result<FlavorAwareClusterer, CliError> {
    let policy = match cli.finite_penalty {
        Some(scale) => FilterPolicy::FinitePenalty { scale },
        None => FilterPolicy::default(),
    };

    fn assemble(
        measure: impl DistanceMeasure + 'static,
        unfiltered: bool,
        policy: FilterPolicy,
    ) -> Result<FlavorAwareClusterer, CliError> {
        if unfiltered {
            Ok(FlavorAwareClusterer::new(measure))
        } else {
            Ok(FlavorAwareClusterer::new(
                FlavorFilteredMeasure::with_policy(measure, policy)?,
            ))
        }
    }

    let clusterer = match cli.measure {
        MeasureKind::Kt => assemble(KtMeasure::new(cli.radius)?, cli.no_flavor_filter, policy)?,
        MeasureKind::Antikt => assemble(
            AntiKtMeasure::new(cli.radius)?,
            cli.no_flavor_filter,
            policy,
        )?,
        MeasureKind::Ca => assemble(CaMeasure::new(cli.radius)?, cli.no_flavor_filter, policy)?,
    };

    Ok(clusterer.with_strict_labels(cli.strict_labels))
}

fn run_driver(cli: &Cli) -> Result<(), CliError> {
    let particles = match &cli.input {
        Some(path) => event::read_event(BufReader::new(File::open(path)?))?,
        None => event::read_event(io::stdin().lock())?,
    };
    tracing::info!(particles = particles.len(), "read event");

    let clusterer = build_clusterer(cli)?;
    tracing::info!("{}", clusterer.description());

    let mut history = EventHistory::new(particles);
    clusterer.run(&mut history)?;

    let mut jets = history.inclusive_jets();
    jets.sort_by(|a, b| b.pt().total_cmp(&a.pt()));

    if cli.json {
        let report = serde_json::json!({
            "description": clusterer.description(),
            "r": clusterer.r(),
            "jets": jets,
            "steps": history.steps(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("# {}", clusterer.description());
        println!("# {} jets: pt eta phi e label", jets.len());
        for jet in &jets {
            println!(
                "{} {} {} {} {}",
                jet.pt(),
                jet.eta(),
                jet.phi(),
                jet.e,
                jet.label()
            );
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run_driver(&cli) {
        tracing::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(exit_code_for_error(&err));
    }
}
