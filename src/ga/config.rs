//! GA configuration.
//!
//! [`TourGaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{Result, TourError};

/// Configuration for the tour GA.
///
/// Controls population size, elitism, mutation, the generation budget,
/// and seeding.
///
/// # Defaults
///
/// ```
/// use u_tour::ga::TourGaConfig;
///
/// let config = TourGaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.elite_count, 20);
/// assert_eq!(config.generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tour::ga::TourGaConfig;
///
/// let config = TourGaConfig::default()
///     .with_population_size(200)
///     .with_elite_count(10)
///     .with_mutation_rate(0.02)
///     .with_mutate_elites(false)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TourGaConfig {
    /// Number of tours in every generation. Fixed for the whole run.
    pub population_size: usize,

    /// Number of top-ranked tours carried over unconditionally.
    ///
    /// Must not exceed `population_size`. Equal to it is valid but the
    /// population then collapses to clones of the elites.
    pub elite_count: usize,

    /// Per-position probability of a swap during mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of generations to run. There is no early stopping.
    pub generations: usize,

    /// Whether carried-over elites are mutated like every other tour.
    ///
    /// `true` (the default) gives extra exploration at the cost of
    /// possibly perturbing last generation's best; the best-so-far tour
    /// is tracked separately and never degrades either way.
    pub mutate_elites: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a random seed once at start-up.
    pub seed: Option<u64>,
}

impl Default for TourGaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            elite_count: 20,
            mutation_rate: 0.01,
            generations: 500,
            mutate_elites: true,
            seed: None,
        }
    }
}

impl TourGaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the per-position mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the generation budget.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Enables or disables mutation of carried-over elites.
    pub fn with_mutate_elites(mut self, mutate: bool) -> Self {
        self.mutate_elites = mutate;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for small node sets: 50 tours, 10 elites, 200 generations.
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            elite_count: 10,
            generations: 200,
            ..Self::default()
        }
    }

    /// Preset for moderate node sets: 100 tours, 20 elites, 500 generations.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for larger node sets: 200 tours, 30 elites, 1000 generations.
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            elite_count: 30,
            generations: 1000,
            ..Self::default()
        }
    }

    /// Automatically selects a preset based on the number of nodes.
    ///
    /// - `node_count < 10` → [`fast()`](Self::fast)
    /// - `10 ≤ node_count < 50` → [`balanced()`](Self::balanced)
    /// - `node_count ≥ 50` → [`quality()`](Self::quality)
    pub fn auto_select(node_count: usize) -> Self {
        if node_count < 10 {
            Self::fast()
        } else if node_count < 50 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`TourError::InvalidConfiguration`] describing the first
    /// parameter out of range.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 1 {
            return Err(TourError::invalid("population_size must be at least 1"));
        }
        if self.elite_count > self.population_size {
            return Err(TourError::invalid(format!(
                "elite_count ({}) exceeds population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TourError::invalid(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TourGaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.elite_count, 20);
        assert!((config.mutation_rate - 0.01).abs() < 1e-12);
        assert_eq!(config.generations, 500);
        assert!(config.mutate_elites);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TourGaConfig::default()
            .with_population_size(40)
            .with_elite_count(4)
            .with_mutation_rate(0.05)
            .with_generations(25)
            .with_mutate_elites(false)
            .with_seed(7);

        assert_eq!(config.population_size, 40);
        assert_eq!(config.elite_count, 4);
        assert!((config.mutation_rate - 0.05).abs() < 1e-12);
        assert_eq!(config.generations, 25);
        assert!(!config.mutate_elites);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_ok() {
        assert!(TourGaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = TourGaConfig::default()
            .with_population_size(0)
            .with_elite_count(0);
        assert!(matches!(
            config.validate(),
            Err(TourError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_elite_bounds() {
        let ok = TourGaConfig::default()
            .with_population_size(10)
            .with_elite_count(10);
        assert!(ok.validate().is_ok());

        let too_many = ok.with_elite_count(11);
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_validate_mutation_rate() {
        for rate in [-0.1, 1.5, f64::NAN] {
            let config = TourGaConfig::default().with_mutation_rate(rate);
            assert!(config.validate().is_err(), "rate {rate} accepted");
        }
        for rate in [0.0, 1.0] {
            let config = TourGaConfig::default().with_mutation_rate(rate);
            assert!(config.validate().is_ok(), "rate {rate} rejected");
        }
    }

    #[test]
    fn test_zero_generations_is_valid() {
        let config = TourGaConfig::default().with_generations(0);
        assert!(config.validate().is_ok());
    }

    // ---- Presets ----

    #[test]
    fn test_presets_validate() {
        for config in [
            TourGaConfig::fast(),
            TourGaConfig::balanced(),
            TourGaConfig::quality(),
        ] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_auto_select_boundaries() {
        assert_eq!(TourGaConfig::auto_select(9), TourGaConfig::fast());
        assert_eq!(TourGaConfig::auto_select(10), TourGaConfig::balanced());
        assert_eq!(TourGaConfig::auto_select(49), TourGaConfig::balanced());
        assert_eq!(TourGaConfig::auto_select(50), TourGaConfig::quality());
    }

    #[test]
    fn test_preset_chainable() {
        let config = TourGaConfig::fast().with_seed(42).with_generations(10);
        assert_eq!(config.population_size, 50);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.generations, 10);
    }
}
