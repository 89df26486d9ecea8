use crate::graph::{
    budget::SearchProgress,
    error::{SearchError, SearchPhase},
    game::{ForwardModel, GameState, Heuristic, RolloutPolicy, SearchRng},
    ids::PlayerId,
    node::advance,
};

/// Rollout parameters controlling length and point of view.
#[derive(Debug, Clone, Copy)]
pub struct RolloutParams {
    /// Maximum simulated steps; 0 evaluates the start state directly.
    pub max_steps: usize,
    /// Player whose return is estimated.
    pub perspective: PlayerId,
}

/// Run a default-policy rollout from a private copy of `start`.
///
/// Steps until `max_steps` is reached or the copy becomes terminal, then
/// scores the final state with `heuristic`. Every step counts as one forward
/// model call in `progress`.
pub fn rollout<M, P, H>(
    start: &M::State,
    model: &M,
    policy: &mut P,
    heuristic: &H,
    params: RolloutParams,
    rng: &mut SearchRng,
    progress: &mut SearchProgress,
) -> Result<f64, SearchError>
where
    M: ForwardModel,
    P: RolloutPolicy<M::State, M::Action> + ?Sized,
    H: Heuristic<M::State> + ?Sized,
{
    let mut state = start.clone();

    for depth in 0..params.max_steps {
        if state.is_terminal() {
            break;
        }

        let actions = model.available_actions(&state);
        if actions.is_empty() {
            return Err(SearchError::NoAvailableActions {
                phase: SearchPhase::Rollout,
                depth,
            });
        }

        let index = policy.choose_action(&state, &actions, rng);
        let action = actions
            .get(index)
            .ok_or(SearchError::InvalidRolloutAction {
                index,
                num_actions: actions.len(),
            })?;
        advance(model, &mut state, action, progress);
    }

    let value = heuristic.evaluate(&state, params.perspective);
    if !value.is_finite() {
        return Err(SearchError::NonFiniteHeuristic { value });
    }
    Ok(value)
}
