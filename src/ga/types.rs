//! Core data types for the tour GA.
//!
//! A [`Tour`] is a permutation of node ids interpreted as a closed cycle.
//! Ranking a population produces a [`RankedPopulation`]: one
//! [`FitnessRecord`] per tour, best first.

use std::cell::Cell;

use crate::node::NodeId;

/// A candidate solution: every node id exactly once, cyclic.
///
/// The tour memoizes its total distance the first time it is evaluated,
/// tagged with the evaluator that computed it. Any mutable access to the
/// order clears the memo.
///
/// # Examples
///
/// ```
/// use u_tour::ga::Tour;
///
/// let tour = Tour::new(vec![2, 0, 1]);
/// assert_eq!(tour.order(), &[2, 0, 1]);
/// assert!(tour.is_permutation_of(3));
/// ```
#[derive(Debug, Clone)]
pub struct Tour {
    order: Vec<NodeId>,
    distance: Cell<Option<(u64, f64)>>,
}

impl Tour {
    /// Creates a tour from a node-id ordering.
    pub fn new(order: Vec<NodeId>) -> Self {
        Self {
            order,
            distance: Cell::new(None),
        }
    }

    /// The visiting order.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Mutable access to the visiting order. Clears the memoized distance.
    pub fn order_mut(&mut self) -> &mut [NodeId] {
        self.distance.set(None);
        &mut self.order
    }

    /// Number of nodes in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the tour has no nodes.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Memoized distance, if evaluator `key` measured the tour since its last change.
    pub(crate) fn cached_distance(&self, key: u64) -> Option<f64> {
        match self.distance.get() {
            Some((k, d)) if k == key => Some(d),
            _ => None,
        }
    }

    pub(crate) fn cache_distance(&self, key: u64, distance: f64) {
        self.distance.set(Some((key, distance)));
    }

    #[cfg(test)]
    pub(crate) fn has_cached_distance(&self) -> bool {
        self.distance.get().is_some()
    }

    /// Returns true if the tour contains each of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        is_permutation(&self.order, n)
    }
}

impl PartialEq for Tour {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for Tour {}

/// A generation's worth of tours. Its length is fixed for the whole run.
pub type Population = Vec<Tour>;

/// Fitness of one population member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessRecord {
    /// Index of the tour in the population that was ranked.
    pub tour_index: usize,
    /// `1 / distance`; higher is better.
    pub fitness: f64,
}

impl FitnessRecord {
    /// Distance of the ranked tour, recovered from its fitness.
    pub fn distance(&self) -> f64 {
        1.0 / self.fitness
    }
}

/// Fitness records sorted by fitness descending.
///
/// Ties keep their original population order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPopulation {
    records: Vec<FitnessRecord>,
}

impl RankedPopulation {
    pub(crate) fn from_sorted(records: Vec<FitnessRecord>) -> Self {
        Self { records }
    }

    /// Records in rank order, best first.
    pub fn records(&self) -> &[FitnessRecord] {
        &self.records
    }

    /// The best-ranked record.
    ///
    /// Returns `None` for an empty ranking.
    pub fn best(&self) -> Option<&FitnessRecord> {
        self.records.first()
    }

    /// Population indices in rank order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.records.iter().map(|r| r.tour_index)
    }

    /// Number of ranked tours.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Returns true if `order` contains each of `0..n` exactly once.
pub fn is_permutation(order: &[NodeId], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &id in order {
        if id >= n || seen[id] {
            return false;
        }
        seen[id] = true;
    }
    true
}
