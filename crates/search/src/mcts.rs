//! UCB1 Monte Carlo Tree Search over the Azul rules engine.
//!
//! Each iteration runs the four classic phases against an arena tree rooted
//! at a clone of the live state:
//! - select: follow the best UCB1 child while a node is fully expanded
//! - expand: turn one random untried action into a new child
//! - simulate: uniformly random playout from that child to game end
//! - backpropagate: add the outcome to every node on the path, each node
//!   scoring it for the player whose action produced it

use std::collections::HashMap;
use std::time::Instant;

use azul_engine::{
    action_to_index, apply_action, legal_actions, Action, ActionId, GameState, Outcome,
    RulesError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::{NodeId, SearchTree};

/// Errors that can occur during MCTS search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A live node was picked for expansion with nothing left to expand.
    #[error("node has no untried actions and no children")]
    ExhaustedActionSpace,

    #[error("no legal actions at the root")]
    NoLegalActions,

    #[error("rules engine error: {0}")]
    Rules(#[from] RulesError),
}

/// Aggregated statistics for one root action.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionStats {
    pub action: Action,
    pub visits: u32,
    pub reward: f64,
}

impl ActionStats {
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f64
        }
    }
}

/// Result of a search: the chosen action plus what backed the choice.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub action: Action,
    /// One entry per expanded root action
    pub stats: Vec<ActionStats>,
    /// Iterations actually run, summed over workers
    pub iterations: u32,
}

/// Monte Carlo Tree Search with UCB1 selection and random rollouts.
#[derive(Clone, Debug, Default)]
pub struct Mcts {
    pub config: MctsConfig,
}

impl Mcts {
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }

    /// Pick an action for the player to move in `root_state`.
    ///
    /// With `workers > 1` the iteration budget is split across independent
    /// trees searched on the rayon pool, each seeded from `rng`.
    pub fn search<R: Rng + ?Sized>(
        &self,
        root_state: &GameState,
        rng: &mut R,
    ) -> Result<SearchResult, SearchError> {
        if legal_actions(root_state).is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let started = Instant::now();
        let result = if self.config.workers > 1 {
            self.search_parallel(root_state, rng)?
        } else {
            let (stats, iterations) =
                self.search_tree(root_state, self.config.iterations, started, rng)?;
            let action = best_action(&stats).ok_or(SearchError::ExhaustedActionSpace)?;
            SearchResult {
                action,
                stats,
                iterations,
            }
        };

        debug!(
            action = ?result.action,
            iterations = result.iterations,
            workers = self.config.workers,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search finished"
        );
        Ok(result)
    }

    fn search_parallel<R: Rng + ?Sized>(
        &self,
        root_state: &GameState,
        rng: &mut R,
    ) -> Result<SearchResult, SearchError> {
        let started = Instant::now();
        let jobs: Vec<(u64, u32)> = self
            .config
            .worker_budgets()
            .into_iter()
            .map(|budget| (rng.random(), budget))
            .collect();

        let outcomes: Vec<Result<(Vec<ActionStats>, u32), SearchError>> = jobs
            .into_par_iter()
            .map(|(seed, budget)| {
                let mut worker_rng = StdRng::seed_from_u64(seed);
                self.search_tree(root_state, budget, started, &mut worker_rng)
            })
            .collect();

        // Merge per-action statistics, keeping first-seen order
        let mut merged: Vec<ActionStats> = Vec::new();
        let mut slots: HashMap<ActionId, usize> = HashMap::new();
        let mut iterations = 0;
        for outcome in outcomes {
            let (stats, ran) = outcome?;
            iterations += ran;
            for stat in stats {
                let id = action_to_index(stat.action);
                match slots.get(&id) {
                    Some(&slot) => {
                        merged[slot].visits += stat.visits;
                        merged[slot].reward += stat.reward;
                    }
                    None => {
                        slots.insert(id, merged.len());
                        merged.push(stat);
                    }
                }
            }
        }

        let action = best_action(&merged).ok_or(SearchError::ExhaustedActionSpace)?;
        Ok(SearchResult {
            action,
            stats: merged,
            iterations,
        })
    }

    /// Build one tree and return its root-child statistics and the number
    /// of iterations run.
    fn search_tree<R: Rng + ?Sized>(
        &self,
        root_state: &GameState,
        iterations: u32,
        started: Instant,
        rng: &mut R,
    ) -> Result<(Vec<ActionStats>, u32), SearchError> {
        let mut tree = SearchTree::new(root_state.clone());
        let mut ran = 0;

        for i in 0..iterations.max(1) {
            if i > 0 && self.deadline_passed(started) {
                trace!(iterations = i, "deadline reached");
                break;
            }
            self.iterate(&mut tree, rng)?;
            ran += 1;
        }

        trace!(
            iterations = ran,
            nodes = tree.len(),
            root_visits = tree.root().visits,
            "tree built"
        );

        let stats = tree
            .root_children()
            .filter_map(|child| {
                Some(ActionStats {
                    action: child.action?,
                    visits: child.visits,
                    reward: child.reward,
                })
            })
            .collect();
        Ok((stats, ran))
    }

    fn deadline_passed(&self, started: Instant) -> bool {
        self.config
            .time_limit
            .is_some_and(|limit| started.elapsed() >= limit)
    }

    /// One select / expand / simulate / backpropagate pass.
    fn iterate<R: Rng + ?Sized>(&self, tree: &mut SearchTree, rng: &mut R) -> Result<(), SearchError> {
        let leaf = select(tree, self.config.exploration);
        let leaf = expand(tree, leaf, rng)?;
        let outcome = simulate(&tree.get(leaf).state, rng)?;
        tree.backpropagate(leaf, |player| outcome.reward_for(player));
        Ok(())
    }
}

/// Descend from the root while the node is live, fully expanded and has
/// children.
fn select(tree: &SearchTree, exploration: f64) -> NodeId {
    let mut current = NodeId::ROOT;
    loop {
        let node = tree.get(current);
        if node.is_terminal() || node.has_untried() || node.children.is_empty() {
            return current;
        }
        match tree.select_child(current, exploration) {
            Some(child) => current = child,
            None => return current,
        }
    }
}

/// Expand one random untried action of `id`. Terminal nodes are returned
/// unchanged.
fn expand<R: Rng + ?Sized>(
    tree: &mut SearchTree,
    id: NodeId,
    rng: &mut R,
) -> Result<NodeId, SearchError> {
    if tree.get(id).is_terminal() {
        return Ok(id);
    }
    let action = tree
        .get_mut(id)
        .take_untried(rng)
        .ok_or(SearchError::ExhaustedActionSpace)?;

    let mut state = tree.get(id).state.clone();
    let mover = state.current_player;
    apply_action(&mut state, action, rng)?;
    Ok(tree.add_child(id, action, mover, state))
}

/// Play uniformly random legal actions on a clone of `state` until the game
/// ends.
pub fn simulate<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Result<Outcome, SearchError> {
    let mut state = state.clone();
    while !state.game_over {
        let actions = legal_actions(&state);
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }
        let action = actions[rng.random_range(0..actions.len())];
        apply_action(&mut state, action, rng)?;
    }
    state.outcome.ok_or(SearchError::Rules(RulesError::GameOver))
}

/// Root child with the highest raw win rate; the first maximum wins.
fn best_action(stats: &[ActionStats]) -> Option<Action> {
    let mut best: Option<&ActionStats> = None;
    for stat in stats {
        if best.is_none_or(|b| stat.win_rate() > b.win_rate()) {
            best = Some(stat);
        }
    }
    best.map(|s| s.action)
}
