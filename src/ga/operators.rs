//! Permutation-preserving genetic operators for tours.
//!
//! Both operators work on `&[NodeId]` orderings and keep them valid
//! permutations by construction.
//!
//! # Crossover
//!
//! - [`order_crossover`] (OX): copies a contiguous segment from one parent
//!   and fills the remaining slots in the other parent's relative order.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: every position independently swaps with a random
//!   position with probability `rate`.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"

use rand::Rng;

use crate::node::NodeId;

use super::types::Tour;

// ============================================================================
// Crossover
// ============================================================================

/// Order crossover (OX) producing a single child.
///
/// Two cut indices are drawn independently from `0..n` and sorted into
/// `lo <= hi`; see [`order_crossover_with_cuts`] for how the child is built.
///
/// # Panics
/// Panics if the parents have different lengths or are not permutations
/// of `0..n`.
pub fn order_crossover<R: Rng>(
    parent_a: &[NodeId],
    parent_b: &[NodeId],
    rng: &mut R,
) -> Vec<NodeId> {
    let n = parent_a.len();
    assert_eq!(n, parent_b.len(), "parents must have equal length");
    if n == 0 {
        return Vec::new();
    }
    let (lo, hi) = random_cuts(n, rng);
    order_crossover_with_cuts(parent_a, parent_b, lo, hi)
}

/// Order crossover with explicit cut indices.
///
/// 1. Child positions `lo..hi` are copied verbatim from `parent_a`.
/// 2. The other positions, left to right, receive the nodes of `parent_b`
///    that are not in the copied segment, in `parent_b`'s order.
///
/// `lo == hi` copies nothing and reproduces `parent_b`; `lo == 0, hi == n`
/// reproduces `parent_a`.
///
/// # Examples
///
/// ```
/// use u_tour::ga::operators::order_crossover_with_cuts;
///
/// let a = [0, 1, 2, 3, 4, 5];
/// let b = [5, 4, 3, 2, 1, 0];
/// assert_eq!(order_crossover_with_cuts(&a, &b, 2, 4), vec![5, 4, 2, 3, 1, 0]);
/// ```
///
/// # Panics
/// Panics if the parents have different lengths, `lo > hi`, `hi > n`, or
/// the parents are not permutations of `0..n`.
pub fn order_crossover_with_cuts(
    parent_a: &[NodeId],
    parent_b: &[NodeId],
    lo: usize,
    hi: usize,
) -> Vec<NodeId> {
    let n = parent_a.len();
    assert_eq!(n, parent_b.len(), "parents must have equal length");
    assert!(lo <= hi && hi <= n, "invalid cut range {lo}..{hi} for length {n}");

    let mut child = vec![usize::MAX; n];
    let mut in_segment = vec![false; n];

    child[lo..hi].copy_from_slice(&parent_a[lo..hi]);
    for &id in &parent_a[lo..hi] {
        in_segment[id] = true;
    }

    let free_slots = (0..lo).chain(hi..n);
    let donors = parent_b.iter().copied().filter(|&id| !in_segment[id]);
    for (slot, id) in free_slots.zip(donors) {
        child[slot] = id;
    }

    debug_assert!(
        child.iter().all(|&id| id != usize::MAX),
        "parents are not permutations of the same node set"
    );
    child
}

/// OX on whole tours. The child carries no memoized distance.
pub fn crossover<R: Rng>(parent_a: &Tour, parent_b: &Tour, rng: &mut R) -> Tour {
    Tour::new(order_crossover(parent_a.order(), parent_b.order(), rng))
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation in place.
///
/// Each position `i` swaps, with probability `rate`, with a uniformly
/// drawn position `j` (possibly `i` itself). Returns the number of swaps
/// performed, including no-op self swaps.
///
/// A `rate` of 0 leaves `perm` untouched and draws a single uniform value
/// per position; a `rate` of 1 swaps every position.
///
/// # Panics
/// Panics in debug builds if `rate` is outside `[0, 1]` or NaN.
pub fn swap_mutation<R: Rng>(perm: &mut [NodeId], rate: f64, rng: &mut R) -> usize {
    debug_assert!(
        (0.0..=1.0).contains(&rate),
        "mutation rate must be within [0, 1], got {rate}"
    );
    let n = perm.len();
    let mut swaps = 0;
    for i in 0..n {
        if rng.random::<f64>() < rate {
            let j = rng.random_range(0..n);
            perm.swap(i, j);
            swaps += 1;
        }
    }
    swaps
}

/// Swap mutation on a copy of `tour`.
///
/// # Panics
/// Panics in debug builds if `rate` is outside `[0, 1]` or NaN.
pub fn mutate<R: Rng>(tour: &Tour, rate: f64, rng: &mut R) -> Tour {
    let mut child = tour.clone();
    mutate_in_place(&mut child, rate, rng);
    child
}

/// Swap mutation applied to `tour` directly.
///
/// The memoized distance is only cleared when a swap actually happened.
pub(crate) fn mutate_in_place<R: Rng>(tour: &mut Tour, rate: f64, rng: &mut R) {
    let mut order = tour.order().to_vec();
    if swap_mutation(&mut order, rate, rng) > 0 && order.as_slice() != tour.order() {
        tour.order_mut().copy_from_slice(&order);
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Two independent cut indices in `0..n`, returned as `(lo, hi)` with `lo <= hi`.
fn random_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::types::is_permutation;
    use crate::random::create_rng;

    // ---- OX Crossover ----

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let a = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let b = vec![3, 7, 5, 1, 6, 0, 2, 4];
        for _ in 0..200 {
            let child = order_crossover(&a, &b, &mut rng);
            assert!(is_permutation(&child, 8), "OX child not valid: {child:?}");
        }
    }

    #[test]
    fn test_ox_keeps_segment_positions() {
        let a = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let b = vec![7, 6, 5, 4, 3, 2, 1, 0];
        let child = order_crossover_with_cuts(&a, &b, 2, 5);
        assert_eq!(&child[2..5], &[2, 3, 4]);
        assert_eq!(child, vec![7, 6, 2, 3, 4, 5, 1, 0]);
    }

    #[test]
    fn test_ox_empty_segment_reproduces_parent_b() {
        let a = vec![0, 1, 2, 3, 4];
        let b = vec![3, 1, 4, 0, 2];
        for cut in 0..=5 {
            assert_eq!(order_crossover_with_cuts(&a, &b, cut, cut), b);
        }
    }

    #[test]
    fn test_ox_full_segment_reproduces_parent_a() {
        let a = vec![0, 1, 2, 3, 4];
        let b = vec![3, 1, 4, 0, 2];
        assert_eq!(order_crossover_with_cuts(&a, &b, 0, 5), a);
    }

    #[test]
    fn test_ox_all_cut_pairs_valid() {
        let a = vec![4, 2, 0, 5, 1, 3];
        let b = vec![1, 5, 3, 0, 4, 2];
        for lo in 0..=6 {
            for hi in lo..=6 {
                let child = order_crossover_with_cuts(&a, &b, lo, hi);
                assert!(is_permutation(&child, 6), "cuts {lo}..{hi}: {child:?}");
            }
        }
    }

    #[test]
    fn test_ox_identical_parents() {
        let mut rng = create_rng(9);
        let p = vec![2, 0, 3, 1];
        for _ in 0..20 {
            assert_eq!(order_crossover(&p, &p, &mut rng), p);
        }
    }

    #[test]
    fn test_ox_tours() {
        let mut rng = create_rng(42);
        let a = Tour::new(vec![0, 1, 2, 3]);
        let b = Tour::new(vec![3, 2, 1, 0]);
        let child = crossover(&a, &b, &mut rng);
        assert!(child.is_permutation_of(4));
        assert!(!child.has_cached_distance());
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_ox_length_mismatch_panics() {
        let mut rng = create_rng(42);
        order_crossover(&[0, 1, 2], &[0, 1], &mut rng);
    }

    // ---- Swap Mutation ----

    #[test]
    fn test_swap_rate_zero_is_noop() {
        let mut rng = create_rng(42);
        let original: Vec<usize> = (0..10).collect();
        let mut perm = original.clone();
        for _ in 0..100 {
            assert_eq!(swap_mutation(&mut perm, 0.0, &mut rng), 0);
        }
        assert_eq!(perm, original);
    }

    #[test]
    fn test_swap_rate_one_touches_every_position() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..10).collect();
        assert_eq!(swap_mutation(&mut perm, 1.0, &mut rng), 10);
        assert!(is_permutation(&perm, 10));
    }

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut perm: Vec<usize> = (0..12).collect();
            swap_mutation(&mut perm, 0.3, &mut rng);
            assert!(is_permutation(&perm, 12));
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "mutation rate must be within [0, 1]")]
    fn test_swap_rate_above_one_panics() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..4).collect();
        swap_mutation(&mut perm, 2.0, &mut rng);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "mutation rate must be within [0, 1]")]
    fn test_mutate_nan_rate_panics() {
        let mut rng = create_rng(42);
        mutate(&Tour::new(vec![0, 1, 2]), f64::NAN, &mut rng);
    }

    #[test]
    fn test_mutate_returns_copy() {
        let mut rng = create_rng(42);
        let tour = Tour::new((0..8).collect());
        let mutated = mutate(&tour, 1.0, &mut rng);
        assert_eq!(tour.order(), &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert!(mutated.is_permutation_of(8));
    }

    #[test]
    fn test_mutate_in_place_keeps_cache_when_unchanged() {
        let mut rng = create_rng(42);
        let mut tour = Tour::new(vec![0, 1, 2]);
        tour.cache_distance(1, 3.0);
        mutate_in_place(&mut tour, 0.0, &mut rng);
        assert_eq!(tour.cached_distance(1), Some(3.0));
    }

    // ---- Helpers ----

    #[test]
    fn test_random_cuts_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (lo, hi) = random_cuts(10, &mut rng);
            assert!(lo <= hi);
            assert!(hi < 10);
        }
    }
}
