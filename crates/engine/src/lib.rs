//! Azul Game Engine
//!
//! A Markov game state engine for two-player Azul, built to be cloned and
//! replayed many times per move by a tree search. The core object is a single
//! `GameState` (plain data); the free functions in `rules` are the only code
//! that moves it forward.
//!
//! Every function that needs randomness takes an explicit `Rng`, so a seeded
//! generator replays a game exactly.

mod action;
mod board;
mod error;
mod factory;
mod reservoir;
mod rules;
mod state;
mod tile;

pub use action::{
    action_to_index, index_to_action, legal_ids, Action, ActionId, ActionMask, DraftDestination,
    DraftSource, ACTION_SPACE_SIZE, LINE_SLOTS, NUM_DISPLAYS,
};
pub use board::{
    floor_penalty, score_placement, PatternLine, Placement, PlayerBoard, Wall, FLOOR_SLOT,
};
pub use error::RulesError;
pub use factory::{CentralDisplay, Draft, Factory};
pub use reservoir::Reservoir;
pub use rules::{
    apply_action, apply_turn, end_round, is_legal, is_round_over, is_terminal, legal_actions,
    other_player, outcome, setup_game, setup_game_with_bag, valid_action_mask, Transition,
};
pub use state::{GameState, Outcome};
pub use tile::{
    wall_column, Color, PlayerIdx, Token, ALL_COLORS, BOARD_SIZE, FACTORY_CAPACITY,
    FLOOR_CAPACITY, FLOOR_OVERFLOW_PENALTY, FLOOR_PENALTY, NUM_FACTORIES, NUM_PLAYERS,
    TILES_PER_COLOR, TILE_COLORS, TOTAL_TILES, WALL_PATTERN,
};
