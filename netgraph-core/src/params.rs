//! Parameter handling for [`crate::Network`].

use rand::{SeedableRng, rngs::SmallRng};

/// Configuration parameters for a [`crate::Network`].
///
/// By default every randomised operation seeds a fresh generator from OS
/// entropy. Supplying a seed makes whole runs reproducible.
///
/// # Examples
/// ```
/// use netgraph_core::NetworkParams;
///
/// let params = NetworkParams::new().with_rng_seed(42);
/// assert_eq!(params.rng_seed(), Some(42));
/// assert_eq!(NetworkParams::default().rng_seed(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkParams {
    rng_seed: Option<u64>,
}

impl NetworkParams {
    /// Creates a parameter set that seeds every operation from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the per-operation generators to make the network deterministic.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Returns the deterministic seed override, if any.
    #[must_use]
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Builds the generator for the `call`-th randomised operation.
    ///
    /// Seeded parameters mix the call index into the seed so consecutive
    /// operations on one network draw distinct streams.
    pub(crate) fn rng_for(&self, call: u64) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(mix_seed(seed, call)),
            None => SmallRng::from_entropy(),
        }
    }
}

// SplitMix64 finaliser over the seed/call pair.
fn mix_seed(seed: u64, call: u64) -> u64 {
    let mut z = seed ^ call.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
