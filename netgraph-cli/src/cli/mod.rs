//! Command-line interface orchestration for netgraph.
//!
//! The CLI offers a single `generate` command that builds a network with
//! normally distributed node values, wires it towards a target mean degree,
//! and reports the result.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, NodeRow, render_summary, run_cli,
};
