//! Generation-zero population.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::instrument;

use crate::error::{Result, TourError};
use crate::node::{Node, NodeId};

use super::types::{Population, Tour};

/// Creates `size` independent uniformly random permutations of `nodes`.
///
/// Each tour is its own shuffle of `0..nodes.len()`, so two tours may
/// coincide by chance but are never correlated.
///
/// Fails with [`TourError::InvalidConfiguration`] if `size < 1` or fewer
/// than two nodes are given.
///
/// # Examples
///
/// ```
/// use u_tour::ga::initial_population;
/// use u_tour::node::nodes_from_coords;
/// use u_tour::random::create_rng;
///
/// let nodes = nodes_from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
/// let mut rng = create_rng(42);
/// let population = initial_population(&nodes, 10, &mut rng).unwrap();
/// assert_eq!(population.len(), 10);
/// assert!(population.iter().all(|t| t.is_permutation_of(3)));
/// ```
#[instrument(level = "debug", skip(nodes, rng), fields(node_count = nodes.len()))]
pub fn initial_population<R: Rng>(nodes: &[Node], size: usize, rng: &mut R) -> Result<Population> {
    if size < 1 {
        return Err(TourError::invalid("population_size must be at least 1"));
    }
    if nodes.len() < 2 {
        return Err(TourError::invalid(format!(
            "at least 2 nodes are required, got {}",
            nodes.len()
        )));
    }

    let identity: Vec<NodeId> = (0..nodes.len()).collect();
    let population = (0..size)
        .map(|_| {
            let mut order = identity.clone();
            order.shuffle(rng);
            Tour::new(order)
        })
        .collect();
    Ok(population)
}
