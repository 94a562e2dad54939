//! Agent API for action selection

use azul_engine::{index_to_action, legal_ids, valid_action_mask, Action, ActionId, GameState};
use rand::{Rng, RngCore};
use thiserror::Error;

use crate::features::{BasicFeatureExtractor, FeatureExtractor};
use crate::mcts::{Mcts, SearchError};
use crate::MctsConfig;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("no legal actions available")]
    NoLegalActions,

    /// Interactive input ended or could not be read
    #[error("input error: {0}")]
    Input(String),
}

/// Trait for anything that can choose actions in a game: uniform random,
/// tree search, an external move scorer, or human input.
pub trait Agent {
    /// Short label used in logs and match records.
    fn name(&self) -> &str;

    /// Choose an action for `state.current_player`.
    ///
    /// Requirement: the returned action must be legal in `state`.
    fn select_action(
        &mut self,
        state: &GameState,
        rng: &mut dyn RngCore,
    ) -> Result<Action, AgentError>;
}

/// Random agent that uniformly samples from legal actions
#[derive(Clone, Debug, Default)]
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_action(
        &mut self,
        state: &GameState,
        rng: &mut dyn RngCore,
    ) -> Result<Action, AgentError> {
        let mask = valid_action_mask(state);
        let ids: Vec<ActionId> = legal_ids(&mask).collect();
        if ids.is_empty() {
            return Err(AgentError::NoLegalActions);
        }
        let id = ids[rng.random_range(0..ids.len())];
        index_to_action(id).ok_or(AgentError::NoLegalActions)
    }
}

/// Agent that runs a fresh tree search for every move
#[derive(Clone, Debug, Default)]
pub struct MctsAgent {
    mcts: Mcts,
}

impl MctsAgent {
    pub fn new(config: MctsConfig) -> Self {
        Self {
            mcts: Mcts::new(config),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.mcts.config
    }
}

impl Agent for MctsAgent {
    fn name(&self) -> &str {
        "mcts"
    }

    fn select_action(
        &mut self,
        state: &GameState,
        rng: &mut dyn RngCore,
    ) -> Result<Action, AgentError> {
        Ok(self.mcts.search(state, rng)?.action)
    }
}

/// Scores every action id for an observation; higher is better.
///
/// Implemented by whatever model drives a [`ScoredAgent`]. Closures of the
/// right shape work too.
pub trait MoveScorer {
    /// One logit per action id, `ACTION_SPACE_SIZE` entries. Ids past the
    /// end of a shorter vector are treated as unscored.
    fn score(&mut self, observation: &[f32]) -> Vec<f32>;
}

impl<F> MoveScorer for F
where
    F: FnMut(&[f32]) -> Vec<f32>,
{
    fn score(&mut self, observation: &[f32]) -> Vec<f32> {
        self(observation)
    }
}

/// How a [`ScoredAgent`] turns logits into a move
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Selection {
    /// Sample from the softmax over legal actions
    #[default]
    Sample,
    /// Take the highest-scoring legal action
    Greedy,
}

/// Agent driven by an external move scorer, masked to legal actions
pub struct ScoredAgent<S, F = BasicFeatureExtractor> {
    scorer: S,
    features: F,
    selection: Selection,
}

impl<S: MoveScorer> ScoredAgent<S> {
    pub fn new(scorer: S, selection: Selection) -> Self {
        Self {
            scorer,
            features: BasicFeatureExtractor,
            selection,
        }
    }
}

impl<S: MoveScorer, F: FeatureExtractor> ScoredAgent<S, F> {
    pub fn with_features(scorer: S, features: F, selection: Selection) -> Self {
        Self {
            scorer,
            features,
            selection,
        }
    }
}

impl<S: MoveScorer, F: FeatureExtractor> Agent for ScoredAgent<S, F> {
    fn name(&self) -> &str {
        "scored"
    }

    fn select_action(
        &mut self,
        state: &GameState,
        rng: &mut dyn RngCore,
    ) -> Result<Action, AgentError> {
        let mask = valid_action_mask(state);
        let obs = self.features.encode(state, state.current_player);
        let logits = self.scorer.score(&obs);

        // Missing or NaN logits count as very unlikely rather than illegal
        let legal: Vec<(ActionId, f32)> = legal_ids(&mask)
            .map(|id| {
                let logit = logits.get(id).copied().unwrap_or(f32::NEG_INFINITY);
                (id, if logit.is_nan() { f32::NEG_INFINITY } else { logit })
            })
            .collect();

        let id = match self.selection {
            Selection::Greedy => argmax(&legal),
            Selection::Sample => sample_softmax(&legal, rng),
        }
        .ok_or(AgentError::NoLegalActions)?;
        index_to_action(id).ok_or(AgentError::NoLegalActions)
    }
}

/// Highest logit; the first maximum wins.
fn argmax(logits: &[(ActionId, f32)]) -> Option<ActionId> {
    let mut best: Option<(ActionId, f32)> = None;
    for &(id, logit) in logits {
        if best.is_none_or(|(_, b)| logit > b) {
            best = Some((id, logit));
        }
    }
    best.map(|(id, _)| id)
}

/// Softmax over the given logits, then one draw from it.
fn sample_softmax<R: Rng + ?Sized>(logits: &[(ActionId, f32)], rng: &mut R) -> Option<ActionId> {
    let max_logit = logits
        .iter()
        .map(|&(_, l)| l)
        .fold(f32::NEG_INFINITY, f32::max);
    if max_logit == f32::NEG_INFINITY {
        // Nothing scored: fall back to uniform over legal actions
        if logits.is_empty() {
            return None;
        }
        return Some(logits[rng.random_range(0..logits.len())].0);
    }

    let exps: Vec<f32> = logits.iter().map(|&(_, l)| (l - max_logit).exp()).collect();
    let sum: f32 = exps.iter().sum();
    let r: f32 = rng.random::<f32>() * sum;
    let mut cumsum = 0.0;
    for (&(id, _), &e) in logits.iter().zip(&exps) {
        cumsum += e;
        if r < cumsum {
            return Some(id);
        }
    }
    // Rounding fallback: last action with non-zero weight
    logits
        .iter()
        .zip(&exps)
        .rev()
        .find(|(_, &e)| e > 0.0)
        .map(|(&(id, _), _)| id)
}
