//! Seeded random number generation.
//!
//! The optimizer draws every random value (initial shuffles, roulette
//! spins, crossover cuts, mutation swaps) from one generator owned by the
//! runner. Seeding it once makes a run reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// The generator type owned by [`Evolver`](crate::ga::Evolver).
pub type TourRng = StdRng;

/// Creates a deterministic generator from a `u64` seed.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_tour::random::create_rng;
///
/// let mut a = create_rng(7);
/// let mut b = create_rng(7);
/// assert_eq!(a.random::<u64>(), b.random::<u64>());
/// ```
pub fn create_rng(seed: u64) -> TourRng {
    StdRng::seed_from_u64(seed)
}
