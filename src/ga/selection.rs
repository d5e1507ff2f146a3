//! Ranking and parent selection.
//!
//! Selection combines elitism with fitness-proportional (roulette wheel)
//! sampling. The top `elite_count` ranked tours are taken unconditionally;
//! every remaining slot is filled by a roulette spin over the ranked order,
//! with replacement, so strong tours can be picked several times.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - De Jong (1975), elitist strategy

use rand::Rng;
use tracing::instrument;

use crate::error::{Result, TourError};

use super::evaluator::TourEvaluator;
use super::types::{FitnessRecord, RankedPopulation, Tour};

/// Evaluates every tour and sorts by fitness, best first.
///
/// The sort is stable: tours with equal fitness keep their population
/// order, so selection stays deterministic for a seeded generator.
///
/// Fails with [`TourError::DegenerateTour`] on the first zero-length tour.
///
/// # Examples
///
/// ```
/// use u_tour::ga::{rank, Tour, TourEvaluator};
/// use u_tour::node::nodes_from_coords;
///
/// let nodes = nodes_from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let evaluator = TourEvaluator::new(nodes).unwrap();
/// let population = vec![Tour::new(vec![0, 2, 1, 3]), Tour::new(vec![0, 1, 2, 3])];
///
/// let ranked = rank(&evaluator, &population).unwrap();
/// assert_eq!(ranked.best().unwrap().tour_index, 1);
/// ```
#[instrument(level = "trace", skip_all, fields(population_size = population.len()))]
pub fn rank(evaluator: &TourEvaluator, population: &[Tour]) -> Result<RankedPopulation> {
    let mut records = population
        .iter()
        .enumerate()
        .map(|(tour_index, tour)| {
            evaluator
                .fitness_at(tour, tour_index)
                .map(|fitness| FitnessRecord {
                    tour_index,
                    fitness,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    records.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    Ok(RankedPopulation::from_sorted(records))
}

/// Chooses breeding candidates from a ranked population.
///
/// Returns population indices: first the top `elite_count` in rank order,
/// then `len - elite_count` roulette draws. The output always has the same
/// length as the ranking.
///
/// With `elite_count == len` no spin happens and the result is just the
/// ranking; this is valid but leaves no room for selection pressure.
///
/// Fails with [`TourError::InvalidConfiguration`] if `elite_count`
/// exceeds the population size.
pub fn select<R: Rng>(
    ranked: &RankedPopulation,
    elite_count: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let n = ranked.len();
    if elite_count > n {
        return Err(TourError::invalid(format!(
            "elite_count ({elite_count}) exceeds population size ({n})"
        )));
    }

    let records = ranked.records();
    let mut selected: Vec<usize> = Vec::with_capacity(n);
    selected.extend(records[..elite_count].iter().map(|r| r.tour_index));

    if elite_count == n {
        return Ok(selected);
    }

    let cumulative: Vec<f64> = records
        .iter()
        .scan(0.0, |acc, r| {
            *acc += r.fitness;
            Some(*acc)
        })
        .collect();
    let total_fitness = cumulative.last().copied().unwrap_or(0.0);

    for _ in elite_count..n {
        let pos = spin_roulette(&cumulative, total_fitness, rng)?;
        selected.push(records[pos].tour_index);
    }

    Ok(selected)
}

/// One roulette spin: the first rank whose cumulative fitness reaches the draw.
fn spin_roulette<R: Rng>(cumulative: &[f64], total_fitness: f64, rng: &mut R) -> Result<usize> {
    if !(total_fitness > 0.0 && total_fitness.is_finite()) {
        return Err(TourError::RouletteSelectionFailed { total_fitness });
    }

    let spin = rng.random_range(0.0..total_fitness);
    let pos = cumulative.partition_point(|&c| c < spin);
    if pos < cumulative.len() {
        Ok(pos)
    } else {
        Err(TourError::RouletteSelectionFailed { total_fitness })
    }
}
