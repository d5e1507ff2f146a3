//! GA evolutionary loop execution.
//!
//! [`Evolver`] owns one run: the node table, the population, the random
//! generator and the best tour seen so far. Each call to
//! [`Evolver::advance`] performs one generation:
//! rank → select → mate → mutate → re-rank.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, TourError};
use crate::node::Node;
use crate::random::{create_rng, TourRng};

use super::config::TourGaConfig;
use super::evaluator::TourEvaluator;
use super::operators::{crossover, mutate_in_place};
use super::population::initial_population;
use super::selection::{rank, select};
use super::types::{Population, RankedPopulation, Tour};

/// Lifecycle of an [`Evolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolverState {
    /// Generation zero has been created and ranked.
    Initialized,
    /// At least one generation has run and the budget is not exhausted.
    Evolving,
    /// The configured number of generations has run. Further calls to
    /// [`Evolver::advance`] do nothing.
    Terminated,
}

/// Result of a GA run.
///
/// Contains the best tour found, along with statistics about the run.
#[derive(Debug, Clone)]
pub struct TourResult {
    /// The best tour found during the entire run.
    pub best: Tour,

    /// Total cyclic distance of `best`.
    pub best_distance: f64,

    /// Best distance in generation zero.
    pub initial_distance: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-so-far distance after each generation; index 0 is generation zero.
    pub distance_history: Vec<f64>,

    /// Seed the generator was created from.
    pub seed: u64,
}

impl TourResult {
    /// Coordinates of the best tour in visiting order, closed back to the start.
    ///
    /// # Panics
    /// Panics if `nodes` is not the node table the run was started with.
    pub fn route(&self, nodes: &[Node]) -> Vec<Node> {
        let order = self.best.order();
        order
            .iter()
            .chain(order.first())
            .map(|&id| nodes[id])
            .collect()
    }
}

/// Generational state machine for one optimization run.
///
/// # Usage
///
/// ```
/// use u_tour::ga::{Evolver, EvolverState, TourGaConfig};
/// use u_tour::node::nodes_from_coords;
///
/// let nodes = nodes_from_coords(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (1.0, 3.0)]);
/// let config = TourGaConfig::default()
///     .with_population_size(30)
///     .with_elite_count(5)
///     .with_generations(20)
///     .with_seed(42);
///
/// let mut evolver = Evolver::new(nodes, config).unwrap();
/// assert_eq!(evolver.state(), EvolverState::Initialized);
///
/// evolver.advance().unwrap();
/// assert_eq!(evolver.generation(), 1);
///
/// let result = evolver.run().unwrap();
/// assert_eq!(result.generations, 20);
/// assert!(result.best_distance <= result.initial_distance);
/// ```
#[derive(Debug)]
pub struct Evolver {
    evaluator: TourEvaluator,
    config: TourGaConfig,
    rng: TourRng,
    seed: u64,
    population: Population,
    best: Tour,
    best_distance: f64,
    initial_distance: f64,
    generation: usize,
    distance_history: Vec<f64>,
}

impl Evolver {
    /// Validates the configuration, seeds the generator and ranks generation zero.
    ///
    /// # Errors
    /// - [`TourError::InvalidConfiguration`] for a bad config or fewer than two nodes.
    /// - [`TourError::DegenerateTour`] if a generation-zero tour has zero length.
    pub fn new(nodes: Vec<Node>, config: TourGaConfig) -> Result<Self> {
        config.validate()?;
        let evaluator = TourEvaluator::new(nodes)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);

        let population =
            initial_population(evaluator.nodes(), config.population_size, &mut rng)?;
        let ranked = rank(&evaluator, &population)?;
        let (best, best_distance) = best_of(&evaluator, &population, &ranked)?;

        if config.elite_count == config.population_size {
            warn!(
                elite_count = config.elite_count,
                "elites fill the whole population; offspring will never be bred"
            );
        }
        info!(
            node_count = evaluator.node_count(),
            population_size = config.population_size,
            elite_count = config.elite_count,
            mutation_rate = config.mutation_rate,
            generations = config.generations,
            seed,
            initial_distance = best_distance,
            "tour GA initialized"
        );

        let mut distance_history = Vec::with_capacity(config.generations + 1);
        distance_history.push(best_distance);

        Ok(Self {
            evaluator,
            config,
            rng,
            seed,
            population,
            best,
            best_distance,
            initial_distance: best_distance,
            generation: 0,
            distance_history,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EvolverState {
        if self.generation >= self.config.generations {
            EvolverState::Terminated
        } else if self.generation == 0 {
            EvolverState::Initialized
        } else {
            EvolverState::Evolving
        }
    }

    /// Number of generations run so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current population.
    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// Best tour seen so far.
    pub fn best(&self) -> &Tour {
        &self.best
    }

    /// Distance of the best tour seen so far.
    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    /// Runs one generation.
    ///
    /// Once the generation budget is spent the evolver is
    /// [`Terminated`](EvolverState::Terminated) and `advance` returns
    /// `Ok(())` without touching the population.
    ///
    /// # Errors
    /// [`TourError::DegenerateTour`] if ranking meets a zero-length tour.
    /// The population is left untouched in that case.
    #[instrument(level = "debug", skip(self), fields(generation = self.generation + 1))]
    pub fn advance(&mut self) -> Result<()> {
        if self.state() == EvolverState::Terminated {
            return Ok(());
        }
        let elite_count = self.config.elite_count;

        let ranked = rank(&self.evaluator, &self.population)?;
        let selected = select(&ranked, elite_count, &mut self.rng)?;
        let mating_pool: Population = selected
            .iter()
            .map(|&idx| self.population[idx].clone())
            .collect();

        let mut next = breed(&mating_pool, elite_count, &mut self.rng);

        let rate = self.config.mutation_rate;
        let skip = if self.config.mutate_elites { 0 } else { elite_count };
        for tour in next.iter_mut().skip(skip) {
            mutate_in_place(tour, rate, &mut self.rng);
        }

        let next_ranked = rank(&self.evaluator, &next)?;
        let (gen_best, gen_best_distance) = best_of(&self.evaluator, &next, &next_ranked)?;

        self.population = next;
        self.generation += 1;
        if gen_best_distance < self.best_distance {
            self.best = gen_best;
            self.best_distance = gen_best_distance;
        }
        self.distance_history.push(self.best_distance);

        debug!(
            generation = self.generation,
            generation_best = gen_best_distance,
            best_distance = self.best_distance,
            "generation complete"
        );
        Ok(())
    }

    /// Runs the remaining generation budget.
    pub fn run(&mut self) -> Result<TourResult> {
        self.run_inner(&mut |_, _| {}, None)
    }

    /// Runs the remaining budget, calling `progress(generation, best_distance)`
    /// after every generation.
    pub fn run_with_progress<F>(&mut self, mut progress: F) -> Result<TourResult>
    where
        F: FnMut(usize, f64),
    {
        self.run_inner(&mut progress, None)
    }

    /// Runs the remaining budget with a cancellation flag.
    ///
    /// The flag is checked before every generation; once it is set the run
    /// stops and the result is marked `cancelled`.
    pub fn run_with_cancel(&mut self, cancel: Arc<AtomicBool>) -> Result<TourResult> {
        self.run_inner(&mut |_, _| {}, Some(&cancel))
    }

    fn run_inner(
        &mut self,
        progress: &mut dyn FnMut(usize, f64),
        cancel: Option<&AtomicBool>,
    ) -> Result<TourResult> {
        let mut cancelled = false;

        while self.generation < self.config.generations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            self.advance()?;
            progress(self.generation, self.best_distance);
        }

        info!(
            generations = self.generation,
            initial_distance = self.initial_distance,
            best_distance = self.best_distance,
            cancelled,
            "tour GA finished"
        );

        let mut result = self.result();
        result.cancelled = cancelled;
        Ok(result)
    }

    /// Snapshot of the run so far.
    pub fn result(&self) -> TourResult {
        TourResult {
            best: self.best.clone(),
            best_distance: self.best_distance,
            initial_distance: self.initial_distance,
            generations: self.generation,
            cancelled: false,
            distance_history: self.distance_history.clone(),
            seed: self.seed,
        }
    }
}

/// One-shot entry point.
///
/// # Usage
///
/// ```
/// use u_tour::ga::{TourGa, TourGaConfig};
/// use u_tour::node::nodes_from_coords;
///
/// let nodes = nodes_from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let config = TourGaConfig::fast().with_seed(1);
/// let result = TourGa::run(nodes, config).unwrap();
/// assert!(result.best.is_permutation_of(4));
/// ```
pub struct TourGa;

impl TourGa {
    /// Builds an [`Evolver`] and runs the full generation budget.
    pub fn run(nodes: Vec<Node>, config: TourGaConfig) -> Result<TourResult> {
        Evolver::new(nodes, config)?.run()
    }

    /// Like [`run`](Self::run), reporting progress after every generation.
    pub fn run_with_progress<F>(
        nodes: Vec<Node>,
        config: TourGaConfig,
        progress: F,
    ) -> Result<TourResult>
    where
        F: FnMut(usize, f64),
    {
        Evolver::new(nodes, config)?.run_with_progress(progress)
    }
}

/// Builds the next generation from a mating pool.
///
/// The first `elite_count` pool members pass through unchanged. The rest
/// are bred from a shuffled copy of the pool, pairing member `i` with
/// member `len - i - 1`.
fn breed(mating_pool: &[Tour], elite_count: usize, rng: &mut TourRng) -> Population {
    let n = mating_pool.len();
    let mut shuffled: Vec<&Tour> = mating_pool.iter().collect();
    shuffled.shuffle(rng);

    let mut next: Population = Vec::with_capacity(n);
    next.extend_from_slice(&mating_pool[..elite_count]);
    for i in 0..n - elite_count {
        next.push(crossover(shuffled[i], shuffled[n - i - 1], rng));
    }
    next
}

/// Clones the top-ranked tour and returns it with its distance.
fn best_of(
    evaluator: &TourEvaluator,
    population: &[Tour],
    ranked: &RankedPopulation,
) -> Result<(Tour, f64)> {
    let record = ranked
        .best()
        .ok_or_else(|| TourError::invalid("cannot rank an empty population"))?;
    let tour = population[record.tour_index].clone();
    let distance = evaluator.distance(&tour);
    Ok((tour, distance))
}

// ============================================================================
// Tests
// ============================================================================
