//! End-to-end scenarios exercising all three solvers through the public API.

use aquila_core::{Point, Polygon};
use aquila_optimizer::{
    json::instance::InstanceFile,
    pareto::{front::ParetoFront, metrics::hypervolume},
    problem::{
        graph::{RouteGraph, RouteGraphBuilder},
        node::{Node, NodeIdx},
    },
    solver::{
        evolutionary::{NsgaParams, NsgaSolver},
        exact::{BranchAndBound, ExactParams},
        heuristic::HeuristicSolver,
    },
};

fn build_graph(positions: &[(f64, f64)], zones: Vec<Polygon>, map_size: f64) -> RouteGraph {
    let nodes = positions
        .iter()
        .enumerate()
        .map(|(id, &(x, y))| {
            if id == 0 {
                Node::hub(Point::new(x, y))
            } else {
                Node::delivery(NodeIdx::new(id), Point::new(x, y))
            }
        })
        .collect();

    let mut builder = RouteGraphBuilder::default();
    builder.set_nodes(nodes);
    builder.set_no_fly_zones(zones);
    builder.set_map_size(map_size);
    builder.build()
}

fn corner_square() -> RouteGraph {
    build_graph(
        &[
            (50.0, 50.0),
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 100.0),
            (0.0, 100.0),
        ],
        Vec::new(),
        100.0,
    )
}

fn corner_tour_distance() -> f64 {
    300.0 + 100.0 * std::f64::consts::SQRT_2
}

fn assert_mutually_non_dominated(front: &ParetoFront) {
    for a in front.iter() {
        for b in front.iter() {
            if !std::ptr::eq(a, b) {
                assert!(!a.dominates(b));
            }
        }
    }
}

#[test]
fn all_three_solvers_agree_on_the_corner_square() {
    let graph = corner_square();

    let exact = BranchAndBound::new(&graph, ExactParams::default()).solve();
    let heuristic = HeuristicSolver::new(&graph).solve();
    let meta = NsgaSolver::new(
        &graph,
        NsgaParams {
            population_size: 30,
            generations: 40,
            seed: 1,
            ..NsgaParams::default()
        },
    )
    .solve();

    assert_eq!(exact.front.len(), 1);
    let optimum = exact.front.solutions()[0].objectives();
    assert!((optimum.distance - corner_tour_distance()).abs() < 1e-9);
    assert_eq!(optimum.risk, 0.0);
    assert_eq!(optimum.recharges, 0);

    for front in [&heuristic, &meta] {
        let best = front
            .iter()
            .map(|solution| solution.objectives().distance)
            .fold(f64::INFINITY, f64::min);
        assert!((best - optimum.distance).abs() < 1e-9);
    }
}

#[test]
fn merged_fronts_stay_consistent() {
    let graph = build_graph(
        &[
            (50.0, 50.0),
            (10.0, 10.0),
            (90.0, 20.0),
            (80.0, 80.0),
            (20.0, 90.0),
            (30.0, 60.0),
        ],
        vec![Polygon::new(vec![
            Point::new(60.0, 10.0),
            Point::new(80.0, 10.0),
            Point::new(80.0, 30.0),
            Point::new(60.0, 30.0),
        ])],
        100.0,
    );

    let exact = BranchAndBound::new(&graph, ExactParams::default()).solve();
    let heuristic = HeuristicSolver::new(&graph).solve();
    let meta = NsgaSolver::new(
        &graph,
        NsgaParams {
            population_size: 30,
            generations: 30,
            seed: 3,
            ..NsgaParams::default()
        },
    )
    .solve();

    let merged = exact.front.merge(&heuristic).merge(&meta);
    assert!(!merged.is_empty());
    assert_mutually_non_dominated(&merged);

    // heuristic and evolutionary results never beat the exact front
    for solution in merged.iter() {
        assert!(
            !exact
                .front
                .iter()
                .any(|exact_member| exact_member.objectives().dominates(solution.objectives()))
        );
    }
}

#[test]
fn blocked_pair_gives_every_solver_an_empty_front() {
    let graph = build_graph(
        &[(20.0, 50.0), (80.0, 50.0)],
        vec![Polygon::new(vec![
            Point::new(40.0, 40.0),
            Point::new(60.0, 40.0),
            Point::new(60.0, 60.0),
            Point::new(40.0, 60.0),
        ])],
        100.0,
    );

    assert!(
        BranchAndBound::new(&graph, ExactParams::default())
            .solve()
            .front
            .is_empty()
    );
    assert!(HeuristicSolver::new(&graph).solve().is_empty());
    assert!(
        NsgaSolver::new(
            &graph,
            NsgaParams {
                population_size: 8,
                generations: 5,
                seed: 2,
                ..NsgaParams::default()
            }
        )
        .solve()
        .is_empty()
    );
}

#[test]
fn polygon_blocking_the_hub_leaves_the_front_empty() {
    // the hub sits inside a zone: every edge out of it is invalid
    let graph = build_graph(
        &[(50.0, 50.0), (10.0, 10.0), (90.0, 90.0)],
        vec![Polygon::new(vec![
            Point::new(40.0, 40.0),
            Point::new(60.0, 40.0),
            Point::new(60.0, 60.0),
            Point::new(40.0, 60.0),
        ])],
        100.0,
    );

    assert!(
        BranchAndBound::new(&graph, ExactParams::default())
            .solve()
            .front
            .is_empty()
    );
    assert!(HeuristicSolver::new(&graph).solve().is_empty());
}

#[test]
fn instance_round_trip_keeps_solver_results_identical() {
    let graph = corner_square();
    let rebuilt = InstanceFile::from_graph(&graph)
        .to_json()
        .and_then(|json| InstanceFile::from_json(&json))
        .unwrap()
        .build_graph()
        .unwrap();

    let before = BranchAndBound::new(&graph, ExactParams::default()).solve();
    let after = BranchAndBound::new(&rebuilt, ExactParams::default()).solve();

    assert_eq!(before.front.len(), after.front.len());
    assert_eq!(
        before.front.solutions()[0].objectives(),
        after.front.solutions()[0].objectives()
    );
}

#[test]
fn empty_polygon_list_means_zero_risk_everywhere() {
    let graph = corner_square();

    let front = HeuristicSolver::new(&graph).solve();
    for solution in front.iter() {
        assert_eq!(solution.objectives().risk, 0.0);
    }
}

#[test]
fn hypervolume_of_known_front() {
    let graph = corner_square();
    let exact = BranchAndBound::new(&graph, ExactParams::default()).solve();

    // singleton front at (441.42…, 0): rectangle up to the reference point
    let expected = (1000.0 - corner_tour_distance()) * 100.0;
    assert!((hypervolume(&exact.front, (1000.0, 100.0)) - expected).abs() < 1e-6);
}
