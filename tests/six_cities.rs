//! End-to-end runs on the six-city instance.

use u_tour::ga::{Evolver, TourEvaluator, TourGa, TourGaConfig};
use u_tour::node::{nodes_from_coords, Node};

fn six_cities() -> Vec<Node> {
    nodes_from_coords(&[
        (40.4168, -3.7038), // Madrid
        (41.3784, 2.1925),  // Barcelona
        (39.4699, -0.3763), // Valencia
        (37.3891, -5.9845), // Sevilla
        (41.6488, -0.8891), // Zaragoza
        (43.3623, -5.8450), // Oviedo
    ])
}

fn config() -> TourGaConfig {
    TourGaConfig::default()
        .with_population_size(100)
        .with_elite_count(20)
        .with_mutation_rate(0.01)
        .with_generations(500)
        .with_seed(2024)
}

/// Exhaustive optimum over tours starting at node 0.
fn brute_force_optimum(nodes: &[Node]) -> f64 {
    fn permute(rest: &mut Vec<usize>, k: usize, out: &mut Vec<Vec<usize>>) {
        if k == rest.len() {
            out.push(rest.clone());
            return;
        }
        for i in k..rest.len() {
            rest.swap(k, i);
            permute(rest, k + 1, out);
            rest.swap(k, i);
        }
    }

    let evaluator = TourEvaluator::new(nodes.to_vec()).unwrap();
    let mut tails: Vec<usize> = (1..nodes.len()).collect();
    let mut all = Vec::new();
    permute(&mut tails, 0, &mut all);
    all.into_iter()
        .map(|tail| {
            let mut order = vec![0];
            order.extend(tail);
            evaluator.path_distance(&order)
        })
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn six_cities_improves_on_generation_zero() {
    let result = TourGa::run(six_cities(), config()).unwrap();

    assert_eq!(result.generations, 500);
    assert!(result.best_distance <= result.initial_distance);
    assert!(result.best.is_permutation_of(6));
    assert_eq!(result.distance_history.len(), 501);
}

#[test]
fn six_cities_reaches_optimum() {
    let nodes = six_cities();
    let optimum = brute_force_optimum(&nodes);
    let result = TourGa::run(nodes, config()).unwrap();
    assert!(
        (result.best_distance - optimum).abs() < 1e-9,
        "expected optimum {optimum}, got {}",
        result.best_distance
    );
}

#[test]
fn same_seed_same_run() {
    let mut a = Evolver::new(six_cities(), config().with_generations(50)).unwrap();
    let mut b = Evolver::new(six_cities(), config().with_generations(50)).unwrap();
    assert_eq!(a.population(), b.population());

    for _ in 0..50 {
        a.advance().unwrap();
        b.advance().unwrap();
        assert_eq!(a.population(), b.population());
    }
    assert_eq!(a.best(), b.best());
    assert_eq!(a.best_distance(), b.best_distance());
}

#[test]
fn elite_mutation_policy_keeps_best_so_far_monotonic() {
    for mutate_elites in [true, false] {
        let result = TourGa::run(
            six_cities(),
            config()
                .with_generations(100)
                .with_mutation_rate(0.2)
                .with_mutate_elites(mutate_elites),
        )
        .unwrap();
        for w in result.distance_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }
}

#[test]
fn route_visits_every_city_once() {
    let nodes = six_cities();
    let result = TourGa::run(nodes.clone(), config().with_generations(20)).unwrap();
    let route = result.route(&nodes);
    assert_eq!(route.len(), 7);
    assert_eq!(route[0], route[6]);
    for node in &nodes {
        assert_eq!(route[..6].iter().filter(|n| *n == node).count(), 1);
    }
}
