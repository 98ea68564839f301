//! Seedable random source for swarm runs.

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Default generator threaded through the swarm.
pub type SwarmRng = ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> SwarmRng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Seeded when `seed` is given, otherwise drawn from OS entropy.
pub fn rng_for(seed: Option<u64>) -> SwarmRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => ChaCha12Rng::from_entropy(),
    }
}
