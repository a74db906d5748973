use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::debug;

use crate::{
    pareto::{front::ParetoFront, objectives::Objectives, solution::Solution},
    problem::{
        graph::RouteGraph,
        node::{HUB, NodeIdx},
    },
    solver::evolutionary::{
        operators::{mutate, order_crossover, repair},
        ranking::{assign_crowding, assign_ranks},
    },
};

#[derive(Clone, Debug)]
pub struct NsgaParams {
    pub population_size: usize,
    pub generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub seed: u64,
}

impl Default for NsgaParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 200,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            seed: 42,
        }
    }
}

/// NSGA-II over circuit permutations: elitist (μ + λ) survival with
/// non-dominated ranks and crowding pressure.
pub struct NsgaSolver<'a> {
    graph: &'a RouteGraph,
    params: NsgaParams,
}

impl<'a> NsgaSolver<'a> {
    pub fn new(graph: &'a RouteGraph, params: NsgaParams) -> Self {
        NsgaSolver { graph, params }
    }

    pub fn solve(&self) -> ParetoFront {
        let mut front = ParetoFront::new();

        if self.graph.num_nodes() == 1 {
            front.add(Solution::new(vec![HUB], Objectives::zero(), true));
            return front;
        }

        let mut rng = SmallRng::seed_from_u64(self.params.seed);
        let mut population = self.initial_population(&mut rng);

        for _generation in 0..self.params.generations {
            assign_ranks(&mut population);
            assign_crowding(&mut population);

            let offspring = self.breed(&population, &mut rng);
            population.extend(offspring);

            assign_ranks(&mut population);
            assign_crowding(&mut population);

            population.sort_by(|a, b| {
                a.rank
                    .cmp(&b.rank)
                    .then_with(|| b.crowding_distance.total_cmp(&a.crowding_distance))
            });
            population.truncate(self.params.population_size);
        }

        assign_ranks(&mut population);

        for solution in &population {
            if solution.rank() == 0 {
                front.add(solution.clone());
            }
        }
        if front.is_empty() {
            for solution in &population {
                front.add(solution.clone());
            }
        }

        debug!(
            generations = self.params.generations,
            population = self.params.population_size,
            front_size = front.len(),
            "evolutionary search finished"
        );

        front
    }

    fn initial_population(&self, rng: &mut SmallRng) -> Vec<Solution> {
        (0..self.params.population_size)
            .map(|_| {
                let mut interior: Vec<NodeIdx> =
                    (1..self.graph.num_nodes()).map(NodeIdx::new).collect();
                interior.shuffle(rng);
                Solution::evaluated(self.graph, Self::close_route(interior))
            })
            .collect()
    }

    fn close_route(interior: Vec<NodeIdx>) -> Vec<NodeIdx> {
        let mut route = Vec::with_capacity(interior.len() + 2);
        route.push(HUB);
        route.extend(interior);
        route.push(HUB);
        route
    }

    fn interior(solution: &Solution) -> &[NodeIdx] {
        let route = solution.route();
        &route[1..route.len() - 1]
    }

    fn breed(&self, population: &[Solution], rng: &mut SmallRng) -> Vec<Solution> {
        let mut offspring = Vec::with_capacity(self.params.population_size);

        while offspring.len() < self.params.population_size {
            let parent1 = self.tournament(population, rng);
            let parent2 = self.tournament(population, rng);

            let mut child = if rng.random_bool(self.params.crossover_rate) {
                order_crossover(Self::interior(parent1), Self::interior(parent2), rng)
            } else {
                Self::interior(parent1).to_vec()
            };

            if rng.random_bool(self.params.mutation_rate) {
                mutate(&mut child, rng);
            }

            let interior = repair(child, self.graph.num_nodes());
            offspring.push(Solution::evaluated(self.graph, Self::close_route(interior)));
        }

        offspring
    }

    /// Binary tournament: lower rank wins, equal ranks go to the larger
    /// crowding distance.
    fn tournament<'p>(&self, population: &'p [Solution], rng: &mut impl Rng) -> &'p Solution {
        let first = &population[rng.random_range(0..population.len())];
        let second = &population[rng.random_range(0..population.len())];

        if first.rank != second.rank {
            if first.rank < second.rank { first } else { second }
        } else if first.crowding_distance >= second.crowding_distance {
            first
        } else {
            second
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    fn small_params(seed: u64) -> NsgaParams {
        NsgaParams {
            population_size: 30,
            generations: 40,
            seed,
            ..NsgaParams::default()
        }
    }

    #[test]
    fn test_finds_square_optimum() {
        let graph = test_utils::square_instance();
        let front = NsgaSolver::new(&graph, small_params(1)).solve();

        assert!(!front.is_empty());
        let best = front
            .iter()
            .map(|solution| solution.objectives().distance)
            .fold(f64::INFINITY, f64::min);
        assert!((best - test_utils::square_tour_distance()).abs() < 1e-9);
    }

    #[test]
    fn test_front_members_are_feasible_and_non_dominated() {
        let graph = test_utils::create_graph(
            &[
                (50.0, 50.0),
                (10.0, 10.0),
                (90.0, 20.0),
                (80.0, 80.0),
                (20.0, 90.0),
                (30.0, 60.0),
            ],
            &[],
            vec![test_utils::polygon(vec![
                (60.0, 10.0),
                (80.0, 10.0),
                (80.0, 30.0),
                (60.0, 30.0),
            ])],
            100.0,
        );

        let front = NsgaSolver::new(&graph, small_params(5)).solve();
        for a in front.iter() {
            assert!(a.is_feasible());
            for b in front.iter() {
                if !std::ptr::eq(a, b) {
                    assert!(!a.dominates(b));
                }
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_the_front() {
        let graph = test_utils::square_instance();

        let first = NsgaSolver::new(&graph, small_params(9)).solve();
        let second = NsgaSolver::new(&graph, small_params(9)).solve();

        let routes = |front: &ParetoFront| -> Vec<Vec<usize>> {
            front
                .iter()
                .map(|s| s.route().iter().map(|idx| idx.get()).collect())
                .collect()
        };
        assert_eq!(routes(&first), routes(&second));
    }

    #[test]
    fn test_blocked_pair_yields_empty_front() {
        let graph = test_utils::blocked_pair_instance();
        let front = NsgaSolver::new(&graph, small_params(3)).solve();
        assert!(front.is_empty());
    }

    #[test]
    fn test_two_node_instance() {
        let graph = test_utils::delivery_line(10.0);
        let front = NsgaSolver::new(
            &graph,
            NsgaParams {
                population_size: 4,
                generations: 2,
                ..NsgaParams::default()
            },
        )
        .solve();

        assert_eq!(front.len(), 1);
        assert_eq!(
            front.solutions()[0].route(),
            &test_utils::route(&[0, 1, 0])[..]
        );
    }
}
