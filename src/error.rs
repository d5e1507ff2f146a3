//! Error types shared by every stage of the optimizer.

/// Errors raised while configuring or running the tour optimizer.
///
/// None of these are transient: a failure is either a bad configuration
/// or degenerate node data, and is reported once without retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TourError {
    /// A configuration value or the node set is out of range.
    #[error("InvalidConfiguration: {0}")]
    InvalidConfiguration(String),

    /// A tour has zero total length, so its fitness (`1 / distance`) is undefined.
    ///
    /// `tour_index` is the population index when the tour was found while
    /// ranking, and `None` when a standalone tour was evaluated.
    #[error("DegenerateTour: tour_index={tour_index:?}, distance={distance}")]
    DegenerateTour {
        tour_index: Option<usize>,
        distance: f64,
    },

    /// The cumulative fitness distribution could not be walked.
    #[error("Roulette selection failed: total_fitness={total_fitness}")]
    RouletteSelectionFailed { total_fitness: f64 },
}

impl TourError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TourError::InvalidConfiguration(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TourError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_degenerate_tour() {
        let err = TourError::DegenerateTour {
            tour_index: Some(3),
            distance: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "DegenerateTour: tour_index=Some(3), distance=0"
        );
    }

    #[test]
    fn test_display_invalid_configuration() {
        let err = TourError::invalid("population_size must be at least 1");
        assert_eq!(
            err.to_string(),
            "InvalidConfiguration: population_size must be at least 1"
        );
    }
}
