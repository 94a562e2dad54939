//! Monte Carlo Tree Search and decision-makers for two-player Azul
//!
//! This crate provides:
//! - `MctsConfig` and `Mcts`: UCB1 search with random rollouts, optional
//!   deadline and root parallelism
//! - `SearchTree`/`Node`: the arena the search builds
//! - `Agent` trait with random, search-driven and externally scored agents
//! - `BasicFeatureExtractor`: GameState → fixed-length observation
//! - `play_game`: runs a full match and returns a `GameRecord`

mod agent;
mod config;
mod features;
mod game;
mod mcts;
mod node;

pub use agent::{Agent, AgentError, MctsAgent, MoveScorer, RandomAgent, ScoredAgent, Selection};
pub use config::MctsConfig;
pub use features::{BasicFeatureExtractor, FeatureExtractor, Observation, OBS_SIZE};
pub use game::{play_game, GameRecord, MatchError};
pub use mcts::{simulate, ActionStats, Mcts, SearchError, SearchResult};
pub use node::{Node, NodeId, SearchTree};
