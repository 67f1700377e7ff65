//! Structural invariant checks for the link relation.
//!
//! Surfaced via [`super::Network::check_invariants`] so tests can assert the
//! relation stays symmetric, loop-free, duplicate-free, and in range after
//! each operation without reimplementing the traversal.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{Level, debug, trace};

use super::adjacency::Adjacency;

/// Reports the first broken invariant found in a network's link relation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LinkInvariantViolation {
    /// A node is linked to itself.
    #[error("node {node} is linked to itself")]
    SelfLoop {
        /// Node carrying the reflexive entry.
        node: usize,
    },
    /// A link references a node slot that does not exist.
    #[error("link {origin}->{target} references a node outside 0..{len}")]
    DanglingLink {
        /// Node exposing the entry.
        origin: usize,
        /// Referenced node index.
        target: usize,
        /// Number of node slots.
        len: usize,
    },
    /// The same directed entry is stored more than once.
    #[error("link {origin}->{target} is stored more than once")]
    DuplicateLink {
        /// Node exposing the repeated entry.
        origin: usize,
        /// Target of the repeated entry.
        target: usize,
    },
    /// A directed entry has no matching reverse entry.
    #[error("link {origin}->{target} is missing the reverse link")]
    MissingBacklink {
        /// Node exposing the one-way entry.
        origin: usize,
        /// Node lacking the reverse entry.
        target: usize,
    },
    /// A directed entry is absent from the pair index.
    #[error("link {origin}->{target} is not recorded in the pair index")]
    UntrackedLink {
        /// Node exposing the entry.
        origin: usize,
        /// Target of the entry.
        target: usize,
    },
    /// The pair index holds a link no neighbour list carries.
    #[error("pair index records {low}-{high} but no neighbour list does")]
    StalePair {
        /// Lower endpoint of the recorded pair.
        low: usize,
        /// Higher endpoint of the recorded pair.
        high: usize,
    },
}

pub(super) fn check_links(adjacency: &Adjacency) -> Result<(), LinkInvariantViolation> {
    let len = adjacency.node_count();
    if tracing::enabled!(Level::TRACE) {
        trace!(
            nodes = len,
            links = adjacency.link_count(),
            "checking link invariants"
        );
    }

    let mut seen = HashSet::new();
    for (origin, target) in adjacency.directed_entries() {
        check_entry(adjacency, &mut seen, origin, target).inspect_err(|violation| {
            debug!(origin, target, %violation, "link invariant violated");
        })?;
    }

    for (low, high) in adjacency.pairs() {
        let carried = adjacency
            .neighbours(low)
            .is_some_and(|list| list.contains(&high));
        if !carried {
            debug!(low, high, "stale pair in index");
            return Err(LinkInvariantViolation::StalePair { low, high });
        }
    }
    Ok(())
}

fn check_entry(
    adjacency: &Adjacency,
    seen: &mut HashSet<(usize, usize)>,
    origin: usize,
    target: usize,
) -> Result<(), LinkInvariantViolation> {
    let len = adjacency.node_count();
    if origin == target {
        return Err(LinkInvariantViolation::SelfLoop { node: origin });
    }
    if target >= len {
        return Err(LinkInvariantViolation::DanglingLink {
            origin,
            target,
            len,
        });
    }
    if !seen.insert((origin, target)) {
        return Err(LinkInvariantViolation::DuplicateLink { origin, target });
    }
    let has_backlink = adjacency
        .neighbours(target)
        .is_some_and(|list| list.contains(&origin));
    if !has_backlink {
        return Err(LinkInvariantViolation::MissingBacklink { origin, target });
    }
    if !adjacency.contains(origin, target) {
        return Err(LinkInvariantViolation::UntrackedLink { origin, target });
    }
    Ok(())
}
