//! Genetic algorithm for the closed-tour problem.
//!
//! A tour is a permutation of node ids. Each generation ranks the
//! population by fitness (`1 / distance`), keeps the elites, fills the
//! rest by roulette wheel sampling, recombines with ordered crossover and
//! perturbs with swap mutation.
//!
//! # Key Types
//!
//! - [`TourGaConfig`]: Algorithm parameters (population, elites, mutation, budget)
//! - [`Evolver`]: Executes the generational loop one [`advance`](Evolver::advance) at a time
//! - [`TourGa`]: One-shot convenience wrapper around [`Evolver`]
//! - [`TourResult`]: Best tour and run statistics
//! - [`TourEvaluator`]: Cyclic distance and fitness of a [`Tour`]
//!
//! # Stages
//!
//! - [`initial_population`]: independent random shuffles
//! - [`rank`] / [`select`]: stable fitness ranking, elitism + roulette
//! - [`operators`]: ordered crossover (OX) and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod evaluator;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::TourGaConfig;
pub use evaluator::TourEvaluator;
pub use population::initial_population;
pub use runner::{Evolver, EvolverState, TourGa, TourResult};
pub use selection::{rank, select};
pub use types::{is_permutation, FitnessRecord, Population, RankedPopulation, Tour};
