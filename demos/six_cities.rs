//! # Six-city tour
//!
//! Runs the GA on six Spanish cities and prints the best route.
//!
//! ```text
//! cargo run --example six_cities
//! ```

use tracing::Level;
use u_tour::ga::{TourGa, TourGaConfig};
use u_tour::node::nodes_from_coords;

const CITIES: [(&str, f64, f64); 6] = [
    ("Madrid", 40.4168, -3.7038),
    ("Barcelona", 41.3784, 2.1925),
    ("Valencia", 39.4699, -0.3763),
    ("Sevilla", 37.3891, -5.9845),
    ("Zaragoza", 41.6488, -0.8891),
    ("Oviedo", 43.3623, -5.8450),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let coords: Vec<(f64, f64)> = CITIES.iter().map(|&(_, x, y)| (x, y)).collect();
    let nodes = nodes_from_coords(&coords);

    let config = TourGaConfig::default()
        .with_population_size(100)
        .with_elite_count(20)
        .with_mutation_rate(0.01)
        .with_generations(500)
        .with_seed(42);

    let result = TourGa::run_with_progress(nodes.clone(), config, |generation, best| {
        if generation == 1 || generation % 50 == 0 {
            tracing::info!(generation, best_distance = best, "progress");
        }
    })?;

    tracing::info!(
        initial_distance = result.initial_distance,
        best_distance = result.best_distance,
        "done"
    );

    let names: Vec<&str> = result
        .best
        .order()
        .iter()
        .chain(result.best.order().first())
        .map(|&id| CITIES[id].0)
        .collect();
    println!("Best route: {}", names.join(" -> "));
    for node in result.route(&nodes) {
        println!("  ({:.4}, {:.4})", node.x(), node.y());
    }
    Ok(())
}
