use crate::config::app_config::{load_config, AppConfig, AppConfigBuilder};
use clap::{Args as ClapArgs, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use socialgraph::{
    algorithms::metrics::stats::GlobalStats,
    core::{entities::NodeId, utils::errors::GraphError},
    db::graph::snapshot::GraphSnapshot,
    graph_loader::{GraphFormat, LoadReport},
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(thiserror::Error, Debug)]
pub(crate) enum CliError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Failed to load config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(about = "Load a social graph and query its statistics")]
struct Args {
    #[arg(long, env = "SOCIALGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Log level, `INFO` unless set here or in the config file
    #[arg(long, env = "SOCIALGRAPH_LOG_LEVEL")]
    log_level: Option<String>,

    #[arg(long, env = "SOCIALGRAPH_CLUSTERING_SAMPLE_CAP")]
    clustering_sample_cap: Option<usize>,

    #[arg(long, env = "SOCIALGRAPH_DEFAULT_SAMPLE_SIZE")]
    default_sample_size: Option<usize>,

    #[arg(long, env = "SOCIALGRAPH_NEIGHBOR_LIST_CAP")]
    neighbor_list_cap: Option<usize>,

    #[arg(long, env = "SOCIALGRAPH_TOP_NODES")]
    top_nodes: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
struct Input {
    /// Graph file to read; `.gz` files are decompressed
    input: PathBuf,

    /// Input format, guessed from the file extension when omitted
    #[arg(long)]
    format: Option<GraphFormat>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    #[command(about = "Parse a graph and write it as a nodes/links JSON document")]
    Convert {
        #[command(flatten)]
        input: Input,

        #[arg(long, short, default_value = "graph_data.json")]
        output: PathBuf,
    },
    #[command(about = "Print the global statistics of a graph")]
    Stats {
        #[command(flatten)]
        input: Input,
    },
    #[command(about = "Print degree, neighbours and clustering coefficient of one node")]
    Node {
        #[command(flatten)]
        input: Input,

        #[arg(long, allow_negative_numbers = true)]
        id: NodeId,
    },
    #[command(about = "Print node count and average degree per community")]
    Communities {
        #[command(flatten)]
        input: Input,
    },
    #[command(about = "Print a degree-biased sample of the graph")]
    Sample {
        #[command(flatten)]
        input: Input,

        /// Number of nodes to keep. 0 or less keeps the whole graph
        #[arg(long, allow_negative_numbers = true)]
        size: Option<i64>,

        /// Seed for the random part of the sample
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// What `convert` prints once the snapshot is written.
#[derive(Serialize)]
struct ConvertSummary<'a> {
    output: &'a Path,
    report: &'a LoadReport,
    stats: GlobalStats,
}

impl Input {
    fn format(&self) -> GraphFormat {
        self.format.unwrap_or_else(|| infer_format(&self.input))
    }

    fn load(&self, app_config: &AppConfig) -> Result<GraphSnapshot, CliError> {
        let format = self.format();
        let graph = GraphSnapshot::load_from_path(&self.input, format)?
            .with_config(app_config.analytics);
        let report = graph.load_report();
        info!(
            "Loaded {} as {format}: {} records, {} errors, {:.2}% success rate",
            self.input.display(),
            report.data_lines,
            report.errors,
            report.success_rate()
        );
        Ok(graph)
    }
}

/// Format implied by the file name, ignoring a trailing `.gz`. Defaults to an edge list.
pub(crate) fn infer_format(path: &Path) -> GraphFormat {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let name = name.strip_suffix(".gz").unwrap_or(name.as_str());
    if name.ends_with(".csv") {
        GraphFormat::Csv
    } else if name.ends_with(".json") {
        GraphFormat::JsonNodesLinks
    } else {
        GraphFormat::EdgeList
    }
}

/// Negative sizes mean no sampling, same as 0.
pub(crate) fn clamp_sample_size(size: i64) -> usize {
    usize::try_from(size.max(0)).unwrap_or(usize::MAX)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn build_config(args: &Args) -> Result<AppConfig, CliError> {
    let loaded = load_config(None, args.config.clone())?;
    let mut builder = AppConfigBuilder::from(loaded);
    if let Some(log_level) = &args.log_level {
        builder = builder.with_log_level(log_level.clone());
    }
    if let Some(cap) = args.clustering_sample_cap {
        builder = builder.with_clustering_sample_cap(cap);
    }
    if let Some(size) = args.default_sample_size {
        builder = builder.with_default_sample_size(size);
    }
    if let Some(cap) = args.neighbor_list_cap {
        builder = builder.with_neighbor_list_cap(cap);
    }
    if let Some(top) = args.top_nodes {
        builder = builder.with_top_nodes(top);
    }
    Ok(builder.build())
}

fn run(command: Commands, app_config: &AppConfig) -> Result<(), CliError> {
    match command {
        Commands::Convert { input, output } => {
            let graph = input.load(app_config)?;
            graph.save_to_file(&output)?;
            info!("Wrote {}", output.display());
            print_json(&ConvertSummary {
                output: &output,
                report: graph.load_report(),
                stats: graph.global_stats(),
            })
        }
        Commands::Stats { input } => print_json(&input.load(app_config)?.global_stats()),
        Commands::Node { input, id } => print_json(&input.load(app_config)?.node_detail(id)?),
        Commands::Communities { input } => {
            print_json(&input.load(app_config)?.community_stats())
        }
        Commands::Sample { input, size, seed } => {
            let graph = input.load(app_config)?;
            let size = size
                .map(clamp_sample_size)
                .unwrap_or(app_config.analytics.default_sample_size);
            let sample = match seed {
                Some(seed) => graph.sample_with_rng(size, &mut StdRng::seed_from_u64(seed)),
                None => graph.sample(size),
            };
            print_json(&sample)
        }
    }
}

pub(crate) fn cli() -> Result<(), CliError> {
    let args = Args::parse();
    let app_config = build_config(&args)?;
    app_config.logging.init();
    run(args.command, &app_config)
}
