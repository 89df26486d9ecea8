use rand::SeedableRng;

use crate::{
    Fingerprint, ScoreHeuristic, SearchConfig, SearchError, SearchGraph, SearchPhase,
    SearchProgress, SearchRng,
    graph::tests::fixtures::{
        Bump, CounterFeatures, CounterModel, CounterState, RingFeatures, RingModel, RingState,
        StuckModel, explore_counter, search,
    },
};

#[test]
fn first_descent_adds_exactly_one_node() {
    let mut graph = SearchGraph::new(&CounterFeatures, CounterState::new(4), 0);
    let mut rng = SearchRng::seed_from_u64(3);
    let mut progress = SearchProgress::start();

    let result = graph
        .graph_policy(
            &CounterModel,
            &CounterFeatures,
            &SearchConfig::default(),
            &mut rng,
            &mut progress,
        )
        .expect("graph policy should succeed");

    assert_eq!(graph.node_count(), 2);
    assert_eq!(result.trajectory.len(), 1);
    assert!(result.expanded_new_node);
    assert!(graph.edges(result.frontier).is_empty());
    assert_eq!(graph.edges(graph.root_id()).len(), 2);
    assert_eq!(progress.forward_model_calls(), 1);

    let resolved: Vec<_> = graph
        .edges(graph.root_id())
        .iter()
        .filter_map(|edge| edge.destination())
        .collect();
    assert_eq!(resolved, vec![result.frontier]);
}

#[test]
fn transposed_paths_share_one_node() {
    let (graph, _) = explore_counter(2, 60, 11);

    // (0,0) (1,0) (0,1) (2,0) (1,1) (0,2)
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.transpositions().len(), 6);

    let meeting = graph
        .node_for(&Fingerprint::from_features(&[1.0, 1.0]))
        .expect("(1,1) should be in the graph");
    let after_a = graph
        .node_for(&Fingerprint::from_features(&[1.0, 0.0]))
        .expect("(1,0) should be in the graph");
    let after_b = graph
        .node_for(&Fingerprint::from_features(&[0.0, 1.0]))
        .expect("(0,1) should be in the graph");

    let via_a = graph
        .edge_table()
        .edge(after_a, &Bump::B)
        .and_then(|edge| edge.destination());
    let via_b = graph
        .edge_table()
        .edge(after_b, &Bump::A)
        .and_then(|edge| edge.destination());
    assert_eq!(via_a, Some(meeting));
    assert_eq!(via_b, Some(meeting));
}

#[test]
fn recurring_states_never_close_a_cycle() {
    let root = RingState {
        position: 0,
        steps: 0,
        max_steps: 6,
    };
    let (graph, _) = search(&RingModel, &RingFeatures, &ScoreHeuristic, root, 150, 5)
        .expect("ring search should succeed");

    for (node_id, edges) in graph.edge_table().iter() {
        for destination in edges.iter().filter_map(|edge| edge.destination()) {
            assert!(
                !graph.edge_table().path_exists(destination, node_id),
                "edge {node_id} -> {destination} closes a cycle"
            );
        }
    }

    assert_eq!(graph.transpositions().len(), 3);
    assert!(graph.node_count() > 3);
    assert!(graph.nodes().any(|(_, node)| !node.is_canonical()));
}

#[test]
fn unshared_nodes_are_reused_across_iterations() {
    let max_steps = 6;
    let root = RingState {
        position: 0,
        steps: 0,
        max_steps,
    };
    let (graph, _) = search(&RingModel, &RingFeatures, &ScoreHeuristic, root, 1000, 5)
        .expect("ring search should succeed");

    // Two actions per step and depth at most `max_steps`.
    let tree_size = (1usize << (max_steps + 1)) - 1;
    assert!(graph.node_count() <= tree_size);

    let root_id = graph.root_id();
    for (node_id, _) in graph.nodes() {
        assert!(
            graph.edge_table().path_exists(root_id, node_id),
            "node {node_id} is unreachable from the root"
        );
    }
    assert_eq!(graph.total_visits(root_id), 1000);
}

#[test]
fn opponent_nodes_prefer_the_minimising_action() {
    let (graph, _) = search(
        &CounterModel,
        &CounterFeatures,
        &ScoreHeuristic,
        CounterState::new(2),
        300,
        17,
    )
    .expect("counter search should succeed");

    // Player 1 moves at (1,0): A leads to +2 for player 0, B to 0.
    let opponent = graph
        .node_for(&Fingerprint::from_features(&[1.0, 0.0]))
        .expect("(1,0) should be expanded");
    let visits = |action: Bump| {
        graph
            .edge_table()
            .edge(opponent, &action)
            .map(|edge| edge.visits())
            .unwrap_or(0)
    };
    assert!(visits(Bump::B) > visits(Bump::A));
}

#[test]
fn empty_action_set_in_live_state_fails_fast() {
    let err = search(
        &StuckModel,
        &CounterFeatures,
        &ScoreHeuristic,
        CounterState::new(3),
        1,
        0,
    )
    .expect_err("a stuck forward model must be reported");

    assert_eq!(
        err,
        SearchError::NoAvailableActions {
            phase: SearchPhase::Selection,
            depth: 0,
        }
    );
}

#[test]
fn depth_reached_tracks_longest_trajectory() {
    let (graph, _) = explore_counter(3, 40, 2);
    assert!(graph.depth_reached() >= 2);
    assert!(graph.depth_reached() <= 3);
}
