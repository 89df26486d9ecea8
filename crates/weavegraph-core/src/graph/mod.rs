mod arena;
pub mod budget;
pub mod edge_table;
pub mod edges;
pub mod error;
pub mod fingerprint;
pub mod game;
pub mod ids;
pub mod mcgs;
pub mod node;
pub mod player;
pub mod rollout;
pub mod search_graph;
pub mod snapshot;
pub mod statistics;
pub mod stats;
pub mod transposition;

#[cfg(test)]
mod tests;
