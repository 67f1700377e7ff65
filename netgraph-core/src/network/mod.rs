//! The [`Network`] container: valued nodes joined by undirected links.

mod adjacency;
mod invariants;
#[cfg(test)]
mod tests;

use rand::Rng;
use tracing::{debug, instrument, trace};

use crate::{
    error::{NetworkError, Result},
    params::NetworkParams,
    sampling::{poisson, standard_normal},
};

use self::adjacency::Adjacency;
pub use self::invariants::LinkInvariantViolation;

/// An undirected graph of valued nodes.
///
/// Nodes are addressed by contiguous `usize` indices starting at zero and
/// each carries an `f64` value. Links are symmetric, never reflexive, and at
/// most one link joins any pair of nodes. Indices are unsigned, so only the
/// upper bound of an index is ever checked.
///
/// # Examples
/// ```
/// use netgraph_core::Network;
///
/// let mut network = Network::new();
/// assert_eq!(network.set_values(&[3.0, 1.0, 2.0]), 3);
/// assert!(network.add_link(0, 2));
/// assert!(!network.add_link(2, 0));
/// assert_eq!(network.neighbours(2)?, &[0]);
/// assert_eq!(network.sorted_values(), vec![3.0, 2.0, 1.0]);
/// # Ok::<(), netgraph_core::NetworkError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Network {
    values: Vec<f64>,
    links: Adjacency,
    params: NetworkParams,
    random_calls: u64,
}

impl Network {
    /// Creates an empty network whose random draws are seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty network using `params`.
    ///
    /// # Examples
    /// ```
    /// use netgraph_core::{Network, NetworkParams};
    ///
    /// let mut left = Network::with_params(NetworkParams::new().with_rng_seed(5));
    /// let mut right = Network::with_params(NetworkParams::new().with_rng_seed(5));
    /// left.resize(4);
    /// right.resize(4);
    /// assert_eq!(left.values(), right.values());
    /// ```
    #[must_use]
    pub fn with_params(params: NetworkParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Returns the parameters this network was built with.
    #[must_use]
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// Sets the node count to exactly `n` and redraws every node value.
    ///
    /// When shrinking, every link touching a dropped node is removed first.
    /// New slots start at zero. Afterwards all `n` values are replaced with
    /// independent standard normal draws, including when `n` equals the
    /// current size.
    #[instrument(level = "debug", skip(self), fields(previous = self.values.len()))]
    pub fn resize(&mut self, n: usize) {
        let removed = self.links.resize(n);
        if removed > 0 {
            debug!(removed, "dropped links of removed nodes");
        }
        self.values.resize(n, 0.0);

        let mut rng = self.next_rng();
        for value in &mut self.values {
            *value = standard_normal(&mut rng);
        }
    }

    /// Links `a` and `b`.
    ///
    /// Returns `false`, leaving the network untouched, when `a == b`, when
    /// either index is not below [`Network::size`], or when the pair is
    /// already linked.
    pub fn add_link(&mut self, a: usize, b: usize) -> bool {
        self.links.insert(a, b)
    }

    /// Discards all links and rewires the network towards `mean_degree`.
    ///
    /// Each node in index order draws a target degree from a Poisson
    /// distribution with mean `mean_degree`, capped at `size() - 1`, and
    /// makes as many new links as it still lacks. Each missing link is tried
    /// against uniformly random partners until one is accepted or `size() - 1`
    /// partners have been refused.
    ///
    /// Returns the number of undirected links in the rewired network.
    ///
    /// # Errors
    /// Returns [`NetworkError::InvalidMeanDegree`] when `mean_degree` is
    /// negative or not finite. The existing links are kept in that case.
    ///
    /// # Examples
    /// ```
    /// use netgraph_core::{Network, NetworkParams};
    ///
    /// let mut network = Network::with_params(NetworkParams::new().with_rng_seed(1));
    /// network.resize(50);
    /// let links = network.random_connect(4.0)?;
    /// assert_eq!(links, network.link_count());
    /// # Ok::<(), netgraph_core::NetworkError>(())
    /// ```
    #[instrument(level = "debug", skip(self), fields(nodes = self.values.len()))]
    pub fn random_connect(&mut self, mean_degree: f64) -> Result<usize> {
        if !mean_degree.is_finite() || mean_degree < 0.0 {
            return Err(NetworkError::InvalidMeanDegree { mean: mean_degree });
        }
        self.links.clear_links();

        let nodes = self.values.len();
        let max_partners = nodes.saturating_sub(1);
        let mut rng = self.next_rng();
        for node in 0..nodes {
            let target = poisson(&mut rng, mean_degree, max_partners);
            let current = self.links.degree(node).unwrap_or_default();
            let missing = target.saturating_sub(current);
            trace!(node, target, current, "wiring node");
            for _ in 0..missing {
                if !self.link_to_random_partner(&mut rng, node, max_partners) {
                    trace!(node, attempts = max_partners, "no partner accepted link");
                }
            }
        }

        let links = self.links.link_count();
        debug!(links, "random wiring complete");
        Ok(links)
    }

    fn link_to_random_partner<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        node: usize,
        max_attempts: usize,
    ) -> bool {
        let nodes = self.values.len();
        for _ in 0..max_attempts {
            let partner = rng.gen_range(0..nodes);
            if self.add_link(node, partner) {
                return true;
            }
        }
        false
    }

    /// Replaces every node with `new_values`, dropping all links.
    ///
    /// Returns the resulting node count.
    #[instrument(level = "debug", skip(self, new_values), fields(len = new_values.len()))]
    pub fn set_values(&mut self, new_values: &[f64]) -> usize {
        self.links.reset(new_values.len());
        self.values.clear();
        self.values.extend_from_slice(new_values);
        self.values.len()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Returns the number of links incident to `node`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeOutOfBounds`] when `node >= size()`.
    pub fn degree(&self, node: usize) -> Result<usize> {
        self.links
            .degree(node)
            .ok_or_else(|| self.out_of_bounds(node))
    }

    /// Returns the value stored at `node`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeOutOfBounds`] when `node >= size()`.
    pub fn value(&self, node: usize) -> Result<f64> {
        self.values
            .get(node)
            .copied()
            .ok_or_else(|| self.out_of_bounds(node))
    }

    /// Returns all node values, indexed by node.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns a copy of the node values in descending order.
    ///
    /// The order among equal values is unspecified.
    #[must_use]
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_unstable_by(|left, right| right.total_cmp(left));
        sorted
    }

    /// Returns the nodes linked to `node`, in the order the links were made.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeOutOfBounds`] when `node >= size()`.
    pub fn neighbours(&self, node: usize) -> Result<&[usize]> {
        self.links
            .neighbours(node)
            .ok_or_else(|| self.out_of_bounds(node))
    }

    /// Returns the number of undirected links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.link_count()
    }

    /// Reports whether `a` and `b` are linked. Out-of-range indices are
    /// never linked.
    #[must_use]
    pub fn has_link(&self, a: usize, b: usize) -> bool {
        self.links.contains(a, b)
    }

    /// Iterates every link once as `(low, high)`, grouped by the lower index.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links.links()
    }

    /// Verifies the link relation is symmetric, loop-free, duplicate-free,
    /// and references only existing nodes.
    ///
    /// # Errors
    /// Returns the first [`LinkInvariantViolation`] encountered.
    pub fn check_invariants(&self) -> core::result::Result<(), LinkInvariantViolation> {
        invariants::check_links(&self.links)
    }

    fn next_rng(&mut self) -> rand::rngs::SmallRng {
        let rng = self.params.rng_for(self.random_calls);
        self.random_calls = self.random_calls.wrapping_add(1);
        rng
    }

    fn out_of_bounds(&self, index: usize) -> NetworkError {
        NetworkError::NodeOutOfBounds {
            index,
            len: self.values.len(),
        }
    }
}
