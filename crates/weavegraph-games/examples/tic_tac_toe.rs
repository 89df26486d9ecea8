use tracing_subscriber::EnvFilter;
use weavegraph_core::{ForwardModel, GameState, GraphSearchPlayer, SearchConfig};
use weavegraph_games::{OpenLinesHeuristic, TicTacToe, TicTacToeFeatures, TicTacToeState};

fn main() {
    // Set RUST_LOG=weavegraph_core=debug to see one summary line per decision.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Step 1: Load the search settings shipped with the core crate.
    let config = SearchConfig::from_default_yaml()
        .expect("default config should parse")
        .with_iterations(2000)
        .with_seed(7);

    // Step 2: One player per side, each with its own seeded generator.
    let mut players = [0u64, 1].map(|offset| {
        GraphSearchPlayer::new(
            TicTacToe,
            TicTacToeFeatures,
            config.clone().with_seed(config.seed + offset),
        )
        .expect("config should be valid")
        .with_heuristic(OpenLinesHeuristic)
    });

    // Step 3: Alternate decisions until the board is decided.
    let mut state = TicTacToeState::new();
    println!("Start position:\n{state}\n");

    while !state.is_terminal() {
        let mover = state.current_player();
        let action = players[mover]
            .decide(&state, mover)
            .expect("decision should succeed");

        TicTacToe.apply(&mut state, &action);
        println!(
            "Player {mover} marks cell {action} (row {}, col {})",
            action / 3,
            action % 3
        );
        println!("{state}\n");
    }

    match state.winner() {
        Some(mark) => println!("Winner: {mark:?}"),
        None => println!("Draw"),
    }
}
