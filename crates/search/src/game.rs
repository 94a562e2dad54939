//! Match runner: plays one full game between two agents.

use azul_engine::{
    action_to_index, apply_action, setup_game, ActionId, Outcome, RulesError, Transition,
    NUM_PLAYERS,
};
use rand::RngCore;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::agent::{Agent, AgentError};

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("player {player} ({name}) failed to move: {source}")]
    Agent {
        player: usize,
        name: String,
        #[source]
        source: AgentError,
    },

    #[error("rules engine rejected a move: {0}")]
    Rules(#[from] RulesError),
}

/// Summary of a finished game
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameRecord {
    pub players: [String; NUM_PLAYERS],
    pub scores: [i32; NUM_PLAYERS],
    pub outcome: Outcome,
    /// Rounds played to completion
    pub rounds: u16,
    pub turns: u32,
    /// Every action id in the order it was played
    pub actions: Vec<ActionId>,
}

/// Play a full game from a fresh setup. `agents[p]` moves for player `p`.
pub fn play_game(
    agents: [&mut dyn Agent; NUM_PLAYERS],
    rng: &mut dyn RngCore,
) -> Result<GameRecord, MatchError> {
    let mut agents = agents;
    let mut state = setup_game(rng);
    let mut actions = Vec::new();

    loop {
        let player = state.current_player as usize;
        let agent = &mut agents[player];
        let action = agent
            .select_action(&state, rng)
            .map_err(|source| MatchError::Agent {
                player,
                name: agent.name().to_string(),
                source,
            })?;
        actions.push(action_to_index(action));

        match apply_action(&mut state, action, rng)? {
            Transition::TurnPassed => {}
            Transition::RoundEnded { next_round } => {
                debug!(next_round, scores = ?state.scores(), "round ended");
            }
            Transition::GameOver(outcome) => {
                let record = GameRecord {
                    players: [agents[0].name().to_string(), agents[1].name().to_string()],
                    scores: state.scores(),
                    outcome,
                    rounds: state.round_number - 1,
                    turns: actions.len() as u32,
                    actions,
                };
                info!(
                    scores = ?record.scores,
                    ?outcome,
                    rounds = record.rounds,
                    turns = record.turns,
                    "game finished"
                );
                return Ok(record);
            }
        }
    }
}
