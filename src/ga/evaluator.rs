//! Tour length and fitness evaluation.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, TourError};
use crate::node::{validate_nodes, Node, NodeId};

use super::types::Tour;

/// Evaluates tours against a fixed node table.
///
/// `distance` is the closed-cycle length; `fitness` is its inverse.
/// Distances are memoized on the [`Tour`] itself, so ranking the same
/// tour twice within a generation computes its length once. Each
/// evaluator tags its memo with its own key; a tour measured by another
/// evaluator is measured again.
///
/// # Examples
///
/// ```
/// use u_tour::ga::{Tour, TourEvaluator};
/// use u_tour::node::Node;
///
/// let nodes = vec![
///     Node::new(0.0, 0.0),
///     Node::new(3.0, 0.0),
///     Node::new(3.0, 4.0),
/// ];
/// let evaluator = TourEvaluator::new(nodes).unwrap();
/// let tour = Tour::new(vec![0, 1, 2]);
/// assert!((evaluator.distance(&tour) - 12.0).abs() < 1e-10);
/// assert!((evaluator.fitness(&tour).unwrap() - 1.0 / 12.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TourEvaluator {
    nodes: Vec<Node>,
    key: u64,
}

static NEXT_EVALUATOR_KEY: AtomicU64 = AtomicU64::new(1);

impl TourEvaluator {
    /// Creates an evaluator over `nodes`.
    ///
    /// Fails with [`TourError::InvalidConfiguration`] if fewer than two
    /// nodes are given or a coordinate is not finite.
    pub fn new(nodes: Vec<Node>) -> Result<Self> {
        validate_nodes(&nodes)?;
        let key = NEXT_EVALUATOR_KEY.fetch_add(1, Ordering::Relaxed);
        Ok(Self { nodes, key })
    }

    /// The node table.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes in the table.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total cyclic distance of `tour`, memoized on the tour.
    pub fn distance(&self, tour: &Tour) -> f64 {
        if let Some(d) = tour.cached_distance(self.key) {
            return d;
        }
        let d = self.path_distance(tour.order());
        tour.cache_distance(self.key, d);
        d
    }

    /// Total cyclic distance of a raw node-id ordering.
    ///
    /// Sums consecutive legs and the closing leg back to the first node.
    /// An ordering of length 0 or 1 has distance 0.
    ///
    /// # Panics
    /// Panics if an id is out of range for the node table.
    pub fn path_distance(&self, order: &[NodeId]) -> f64 {
        let n = order.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| {
                let from = &self.nodes[order[i]];
                let to = &self.nodes[order[(i + 1) % n]];
                from.distance_to(to)
            })
            .sum()
    }

    /// Fitness of `tour`: `1 / distance`.
    ///
    /// A zero-length tour yields [`TourError::DegenerateTour`] instead of
    /// an infinite fitness.
    pub fn fitness(&self, tour: &Tour) -> Result<f64> {
        fitness_from_distance(self.distance(tour), None)
    }

    pub(crate) fn fitness_at(&self, tour: &Tour, tour_index: usize) -> Result<f64> {
        fitness_from_distance(self.distance(tour), Some(tour_index))
    }
}

fn fitness_from_distance(distance: f64, tour_index: Option<usize>) -> Result<f64> {
    if distance > 0.0 && distance.is_finite() {
        Ok(1.0 / distance)
    } else {
        Err(TourError::DegenerateTour {
            tour_index,
            distance,
        })
    }
}
