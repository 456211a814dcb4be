//! Conflux query tool
//!
//! Loads a JSON process-data dataset into the in-memory engine and runs
//! incident or process-instance queries against it from the command line.
//! Query parameters are passed exactly as a service boundary would receive
//! them, so the tool exercises the full binding and execution path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tracing::info;

use conflux_engine::backends::memory::MemoryEngine;
use conflux_engine::history::HistoricIncident;
use conflux_engine::runtime::ProcessInstance;
use conflux_query::{PageSpec, QueryService, QueryServiceConfig, RequestParams};

/// Command line query tool for Conflux process engine datasets.
#[derive(Debug, Parser)]
#[command(name = "conflux")]
#[command(about = "Query historic incidents and process instances from a dataset")]
struct Cli {
    /// Path to the JSON dataset to load.
    #[arg(long, env = "CONFLUX_DATA_FILE")]
    data: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "CONFLUX_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Reject list requests without a maxResults at or below this value.
    #[arg(long, env = "CONFLUX_QUERY_MAX_RESULTS")]
    max_results_limit: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search historic incidents.
    Incidents(QueryArgs),
    /// Search running process instances.
    Instances(QueryArgs),
}

#[derive(Debug, Args)]
struct QueryArgs {
    /// Query parameter as NAME=VALUE; repeatable, including sortBy/sortOrder.
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
    params: Vec<String>,

    /// Index of the first result to return.
    #[arg(long)]
    first_result: Option<u32>,

    /// Maximum number of results to return.
    #[arg(long)]
    max_results: Option<u32>,

    /// Print only the number of matches.
    #[arg(long)]
    count: bool,
}

/// A process-data dataset: the record sets the engine is seeded with.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Dataset {
    incidents: Vec<HistoricIncident>,
    process_instances: Vec<ProcessInstance>,
}

fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read dataset {}: {e}", path.display()))?;
    let dataset: Dataset = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("cannot parse dataset {}: {e}", path.display()))?;
    Ok(dataset)
}

/// Builds the raw parameter map from repeated `NAME=VALUE` arguments.
fn request_params(raw: &[String]) -> anyhow::Result<RequestParams> {
    let mut params = RequestParams::new();
    for entry in raw {
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("invalid --param '{entry}': expected NAME=VALUE"))?;
        params.append(name, value);
    }
    Ok(params)
}

fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("conflux_query={level},conflux_cli={level}")));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn run_query(service: &QueryService<MemoryEngine>, command: &Command) -> anyhow::Result<String> {
    let (args, label) = match command {
        Command::Incidents(args) => (args, "incidents"),
        Command::Instances(args) => (args, "process instances"),
    };
    let params = request_params(&args.params)?;
    let page = PageSpec::new(args.first_result, args.max_results);

    let output = match command {
        Command::Incidents(_) if args.count => {
            let total = service.historic_incident_count(&params)?;
            total.to_string()
        }
        Command::Incidents(_) => {
            let incidents = service.historic_incidents(&params, &page)?;
            info!(matches = incidents.len(), "Listed {label}");
            serde_json::to_string_pretty(&incidents)?
        }
        Command::Instances(_) if args.count => {
            let total = service.process_instance_count(&params)?;
            total.to_string()
        }
        Command::Instances(_) => {
            let instances = service.process_instances(&params, &page)?;
            info!(matches = instances.len(), "Listed {label}");
            serde_json::to_string_pretty(&instances)?
        }
    };
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let dataset = load_dataset(&cli.data)?;
    info!(
        incidents = dataset.incidents.len(),
        process_instances = dataset.process_instances.len(),
        dataset = %cli.data.display(),
        "Loaded dataset"
    );

    let engine = MemoryEngine::new()
        .with_incidents(dataset.incidents)
        .with_process_instances(dataset.process_instances);
    let service = QueryService::with_config(
        Arc::new(engine),
        QueryServiceConfig {
            max_results_limit: cli.max_results_limit,
        },
    );

    let output = run_query(&service, &cli.command)?;
    println!("{output}");
    Ok(())
}
