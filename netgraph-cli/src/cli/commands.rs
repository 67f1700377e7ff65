//! Command implementations and argument parsing for the netgraph CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use netgraph_core::{Network, NetworkError, NetworkParams};
use thiserror::Error;
use tracing::{info, instrument};

const DEFAULT_NODES: usize = 100;
const DEFAULT_MEAN_DEGREE: f64 = 4.0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "netgraph", about = "Build and inspect random valued networks.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build a network with normally distributed values and random links.
    Generate(GenerateCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes to create.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Target mean degree of the random wiring.
    #[arg(long = "mean-degree", default_value_t = DEFAULT_MEAN_DEGREE)]
    pub mean_degree: f64,

    /// Seed for reproducible values and links (defaults to OS entropy).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print one row per node with its value, degree, and neighbours.
    #[arg(long = "show-nodes")]
    pub show_nodes: bool,

    /// Print the node values in descending order.
    #[arg(long = "sorted-values")]
    pub sorted_values: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Network construction failed.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Per-node detail reported when `--show-nodes` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    /// Node index.
    pub index: usize,
    /// Value stored at the node.
    pub value: f64,
    /// Linked nodes in link order.
    pub neighbours: Vec<usize>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Number of nodes in the generated network.
    pub nodes: usize,
    /// Number of undirected links created.
    pub links: usize,
    /// Node rows, populated only when requested.
    pub rows: Vec<NodeRow>,
    /// Values in descending order, populated only when requested.
    pub sorted_values: Option<Vec<f64>>,
}

impl ExecutionSummary {
    /// Returns the realised mean degree, or zero for an empty network.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "link and node counts are reported as an approximate ratio"
    )]
    #[expect(clippy::float_arithmetic, reason = "mean degree is a ratio")]
    pub fn mean_degree(&self) -> f64 {
        if self.nodes == 0 {
            return 0.0;
        }
        2.0 * self.links as f64 / self.nodes as f64
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the network cannot be built.
///
/// # Examples
/// ```
/// use netgraph_cli::cli::{Cli, Command, GenerateCommand, run_cli};
///
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         nodes: 10,
///         mean_degree: 0.0,
///         seed: Some(1),
///         show_nodes: false,
///         sorted_values: false,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.nodes, 10);
/// assert_eq!(summary.links, 0);
/// # Ok::<(), netgraph_cli::cli::CliError>(())
/// ```
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(generate) => generate_command(&generate),
    }
}

#[instrument(
    name = "generate",
    skip(command),
    fields(nodes = command.nodes, mean_degree = command.mean_degree, seed = ?command.seed),
)]
pub(super) fn generate_command(command: &GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let params = command
        .seed
        .map_or_else(NetworkParams::new, |seed| {
            NetworkParams::new().with_rng_seed(seed)
        });
    let mut network = Network::with_params(params);
    network.resize(command.nodes);
    let links = network.random_connect(command.mean_degree)?;
    info!(links, "network generated");

    let rows = if command.show_nodes {
        node_rows(&network)?
    } else {
        Vec::new()
    };
    let sorted_values = command.sorted_values.then(|| network.sorted_values());

    Ok(ExecutionSummary {
        nodes: network.size(),
        links,
        rows,
        sorted_values,
    })
}

fn node_rows(network: &Network) -> Result<Vec<NodeRow>, NetworkError> {
    (0..network.size())
        .map(|index| {
            Ok(NodeRow {
                index,
                value: network.value(index)?,
                neighbours: network.neighbours(index)?.to_vec(),
            })
        })
        .collect()
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use netgraph_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     nodes: 4,
///     links: 2,
///     rows: Vec::new(),
///     sorted_values: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "nodes: 4\nlinks: 2\nmean degree: 1.000\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "links: {}", summary.links)?;
    writeln!(writer, "mean degree: {:.3}", summary.mean_degree())?;
    for row in &summary.rows {
        let neighbours = row
            .neighbours
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(
            writer,
            "{}\t{:.6}\t{}\t{neighbours}",
            row.index,
            row.value,
            row.neighbours.len()
        )?;
    }
    if let Some(values) = &summary.sorted_values {
        let rendered = values
            .iter()
            .map(|value| format!("{value:.6}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "sorted values: {rendered}")?;
    }
    Ok(())
}
