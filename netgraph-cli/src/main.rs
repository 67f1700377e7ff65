//! `netgraph` binary.
//!
//! Builds a random network from the `generate` arguments and prints its node
//! count, link count and realised mean degree on stdout. Diagnostics go to
//! stderr through the global subscriber; a failed run logs the stable network
//! error code, when there is one, and exits with a failing status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, field::DisplayValue};

use netgraph_cli::{
    cli::{Cli, CliError, ExecutionSummary, render_summary, run_cli},
    logging::{self, LoggingError},
};

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match generate(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, code = network_code(&err), "netgraph run failed");
            ExitCode::FAILURE
        }
    }
}

fn generate(cli: Cli) -> Result<()> {
    let summary = run_cli(cli).context("failed to build network")?;
    print_summary(&summary)
}

fn print_summary(summary: &ExecutionSummary) -> Result<()> {
    let mut stdout = BufWriter::new(io::stdout().lock());
    render_summary(summary, &mut stdout).context("failed to write network summary")?;
    stdout.flush().context("failed to flush stdout")
}

/// Stable code of the network error behind `err`, if any.
fn network_code(err: &anyhow::Error) -> Option<DisplayValue<&'static str>> {
    err.downcast_ref::<CliError>()
        .map(|CliError::Network(network)| tracing::field::display(network.code().as_str()))
}

#[expect(
    clippy::print_stderr,
    reason = "the subscriber failed to install, so stderr is the only channel"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("netgraph: could not initialise logging: {err}");
}
