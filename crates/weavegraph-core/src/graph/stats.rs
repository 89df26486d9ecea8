use serde::Serialize;

/// Stores the numbers MCGS updates constantly for one `(state, action)` edge.
/// Accumulates only; never reset within one decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActionStats {
    visits: u64,
    total_value: f64,
}

impl ActionStats {
    pub fn new() -> Self {
        ActionStats {
            visits: 0,
            total_value: 0.0,
        }
    }

    /// Retrieve the amount of visits to this edge
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Retrieve the summed return of this edge.
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Function to be used for backpropagation.
    /// Immediately records the rollout return and increments the visits.
    pub fn record(&mut self, reward: f64) {
        self.visits += 1;
        self.total_value += reward;
    }

    /// Helper function just to check if the edge has been visisted or not
    pub fn is_unvisited(&self) -> bool {
        self.visits == 0
    }

    /// Mean return, 0 when unvisited.
    pub fn mean(&self) -> f64 {
        if self.is_unvisited() {
            0.0
        } else {
            self.total_value / self.visits as f64
        }
    }
}
