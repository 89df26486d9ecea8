use std::time::{Duration, Instant};

/// Stopping rule for one decision. Exactly one variant is active per search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Stop once the remaining wall-clock time drops below the safety margin
    /// or below twice the average iteration duration.
    Time {
        limit: Duration,
        safety_margin: Duration,
    },
    /// Stop after exactly this many iterations.
    Iterations(u64),
    /// Stop once this many forward model invocations have been made.
    ForwardModelCalls(u64),
}

impl Budget {
    /// Evaluate the stopping rule against the progress made so far.
    pub fn is_exhausted(&self, progress: &SearchProgress) -> bool {
        match *self {
            Budget::Time {
                limit,
                safety_margin,
            } => {
                let remaining = limit.saturating_sub(progress.elapsed());
                remaining <= progress.average_iteration() * 2 || remaining <= safety_margin
            }
            Budget::Iterations(max) => progress.iterations() >= max,
            Budget::ForwardModelCalls(max) => progress.forward_model_calls() >= max,
        }
    }
}

/// Counters the budget is evaluated against.
#[derive(Debug, Clone)]
pub struct SearchProgress {
    iterations: u64,
    forward_model_calls: u64,
    started: Instant,
    iteration_time: Duration,
}

impl SearchProgress {
    /// Start counting now.
    pub fn start() -> Self {
        SearchProgress {
            iterations: 0,
            forward_model_calls: 0,
            started: Instant::now(),
            iteration_time: Duration::ZERO,
        }
    }

    /// Completed iterations.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Forward model `apply` calls made so far, rollouts included.
    pub fn forward_model_calls(&self) -> u64 {
        self.forward_model_calls
    }

    /// Wall-clock time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Running average duration of one iteration.
    pub fn average_iteration(&self) -> Duration {
        if self.iterations == 0 {
            Duration::ZERO
        } else {
            let nanos = self.iteration_time.as_nanos() / u128::from(self.iterations);
            Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
        }
    }

    pub(crate) fn count_forward_model_call(&mut self) {
        self.forward_model_calls += 1;
    }

    pub(crate) fn finish_iteration(&mut self, took: Duration) {
        self.iterations += 1;
        self.iteration_time += took;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_budget_is_exact() {
        let budget = Budget::Iterations(3);
        let mut progress = SearchProgress::start();
        for _ in 0..2 {
            progress.finish_iteration(Duration::ZERO);
            assert!(!budget.is_exhausted(&progress));
        }
        progress.finish_iteration(Duration::ZERO);
        assert!(budget.is_exhausted(&progress));
    }

    #[test]
    fn forward_model_budget_counts_calls() {
        let budget = Budget::ForwardModelCalls(2);
        let mut progress = SearchProgress::start();
        progress.count_forward_model_call();
        assert!(!budget.is_exhausted(&progress));
        progress.count_forward_model_call();
        assert!(budget.is_exhausted(&progress));
    }

    #[test]
    fn time_budget_respects_safety_margin() {
        let progress = SearchProgress::start();
        let generous = Budget::Time {
            limit: Duration::from_secs(60),
            safety_margin: Duration::from_millis(1),
        };
        assert!(!generous.is_exhausted(&progress));

        let inside_margin = Budget::Time {
            limit: Duration::from_secs(60),
            safety_margin: Duration::from_secs(120),
        };
        assert!(inside_margin.is_exhausted(&progress));
    }

    #[test]
    fn average_iteration_survives_counts_beyond_u32() {
        let mut progress = SearchProgress::start();
        progress.iterations = 1 << 32;
        progress.iteration_time = Duration::from_secs(1 << 33);
        assert_eq!(progress.average_iteration(), Duration::from_secs(2));

        let budget = Budget::Time {
            limit: Duration::from_secs(60),
            safety_margin: Duration::ZERO,
        };
        assert!(!budget.is_exhausted(&progress));
    }

    #[test]
    fn time_budget_stops_before_a_slow_final_iteration() {
        let mut progress = SearchProgress::start();
        progress.finish_iteration(Duration::from_secs(40));
        let budget = Budget::Time {
            limit: Duration::from_secs(60),
            safety_margin: Duration::ZERO,
        };
        assert!(budget.is_exhausted(&progress));
    }
}
