//! Genetic-algorithm tour optimizer.
//!
//! Finds a short closed tour through a set of 2D nodes: every node is
//! visited exactly once and the tour returns to its origin. Intended for
//! small to moderate node counts where a near-optimal tour within a fixed
//! generation budget is good enough.
//!
//! - [`node`]: Points and node tables; tours refer to nodes by index
//! - [`ga`]: Evaluation, selection, crossover, mutation and the
//!   generational loop
//! - [`random`]: Seeded generators for reproducible runs
//! - [`error`]: The crate-wide [`TourError`](error::TourError)
//!
//! # Example
//!
//! ```
//! use u_tour::ga::{TourGa, TourGaConfig};
//! use u_tour::node::nodes_from_coords;
//!
//! let nodes = nodes_from_coords(&[
//!     (40.4168, -3.7038),
//!     (41.3784, 2.1925),
//!     (39.4699, -0.3763),
//!     (37.3891, -5.9845),
//!     (41.6488, -0.8891),
//!     (43.3623, -5.8450),
//! ]);
//! let config = TourGaConfig::default().with_generations(100).with_seed(42);
//!
//! let result = TourGa::run(nodes, config).unwrap();
//! assert!(result.best_distance <= result.initial_distance);
//! assert!(result.best.is_permutation_of(6));
//! ```
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod error;
pub mod ga;
pub mod node;
pub mod random;

pub use error::{Result, TourError};
