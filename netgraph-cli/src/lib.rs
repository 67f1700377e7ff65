//! Support library for the netgraph CLI binary.
//!
//! Exposes the command and logging modules so doctests and unit tests can
//! drive the command pipeline without spawning a subprocess.

pub mod cli;
pub mod logging;
