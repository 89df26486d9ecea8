use std::path::PathBuf;

use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use weavegraph_core::{GraphSearchPlayer, SearchConfig, SearchRng};
use weavegraph_games::{TableFeatures, TableGame, compile_yaml};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crates/weavegraph-games/demos/push_your_luck.game.yaml"));

    let compiled = compile_yaml(&path).expect("failed to compile game YAML");
    let model = TableGame::new(compiled, 12345);
    let start = model.start_state();

    let config = SearchConfig::default().with_iterations(500);
    let mut player =
        GraphSearchPlayer::new(model, TableFeatures, config).expect("config should be valid");

    let (graph, metrics) = player.search(&start, 0).expect("search should succeed");
    let mut rng = SearchRng::seed_from_u64(0);
    let action = graph
        .best_action(player.config().epsilon, &mut rng)
        .expect("root should have actions");

    println!("Game: {}", path.display());
    println!(
        "MCGS completed {} iterations with {} forward model calls",
        metrics.iterations_completed, metrics.forward_model_calls
    );
    println!("Graph: {}", graph.statistics());
    for edge in graph.edges(graph.root_id()) {
        println!(
            "  {:<10} visits {:>4}  mean {:.3}",
            edge.action(),
            edge.visits(),
            edge.stats().mean()
        );
    }
    println!("Best action from '{}': {action}", start.id());
}
