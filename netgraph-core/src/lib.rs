//! Netgraph core library.
//!
//! Provides [`Network`], an in-memory undirected graph whose nodes carry a
//! scalar value and whose links are symmetric and duplicate-free. Networks can
//! be resized, re-valued, linked by hand, or wired at random towards a target
//! mean degree.

mod error;
mod network;
mod params;
mod sampling;

pub use crate::{
    error::{NetworkError, NetworkErrorCode, Result},
    network::{LinkInvariantViolation, Network},
    params::NetworkParams,
};
