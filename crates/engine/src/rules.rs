//! The rules engine: the only code that moves a `GameState` forward.
//!
//! One call to [`apply_action`] runs the whole turn cycle:
//! `AwaitingTurn -> TurnApplied -> (RoundContinues | RoundEnded) -> (NextTurn | GameOver)`.

use rand::Rng;
use tracing::{debug, error, warn};

use crate::{
    index_to_action, Action, ActionMask, Color, DraftSource, GameState, Outcome, PlayerIdx,
    Reservoir, RulesError, ACTION_SPACE_SIZE, ALL_COLORS, BOARD_SIZE, FACTORY_CAPACITY,
    FLOOR_SLOT, LINE_SLOTS, NUM_DISPLAYS, NUM_FACTORIES, NUM_PLAYERS, TILE_COLORS,
};

/// What a successful [`apply_action`] did to the game.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Transition {
    /// Turn applied, round continues with the other player
    TurnPassed,
    /// The round was scored and the next one dealt
    RoundEnded { next_round: u16 },
    /// Final scoring ran; no more actions are accepted
    GameOver(Outcome),
}

// =============================================================================
// Setup
// =============================================================================

/// New two-player game: shuffled bag, 4 tiles on every factory, marker in
/// the center, player 0 to move.
pub fn setup_game<R: Rng + ?Sized>(rng: &mut R) -> GameState {
    let mut state = GameState::with_reservoir(Reservoir::new(rng));
    refill_displays(&mut state, rng);
    state
}

/// New game whose bag is drawn in exactly the given order (front first).
/// The order must hold all 100 tiles.
pub fn setup_game_with_bag<R: Rng + ?Sized>(
    order: Vec<Color>,
    rng: &mut R,
) -> Result<GameState, RulesError> {
    let mut state = GameState::with_reservoir(Reservoir::from_order(order));
    state.check_conservation()?;
    for factory in state.factories.iter_mut() {
        factory.fill(state.reservoir.draw(FACTORY_CAPACITY, rng)?);
    }
    Ok(state)
}

/// Deal up to 4 tiles to every factory. Late in a game the reservoir can run
/// short, in which case later factories receive fewer tiles.
fn refill_displays<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    for (f, factory) in state.factories.iter_mut().enumerate() {
        let tiles = state.reservoir.draw_up_to(FACTORY_CAPACITY, rng);
        if tiles.len() < FACTORY_CAPACITY {
            warn!(factory = f, dealt = tiles.len(), "reservoir ran short while dealing");
        }
        factory.fill(tiles);
    }
}

// =============================================================================
// Legality
// =============================================================================

fn display_has(state: &GameState, source: DraftSource, color: Color) -> bool {
    match source {
        DraftSource::Factory(f) => state
            .factories
            .get(f as usize)
            .is_some_and(|factory| factory.contains(color)),
        DraftSource::Center => state.center.contains(color),
    }
}

/// Whether the current player may take `action` right now.
pub fn is_legal(state: &GameState, action: Action) -> bool {
    if state.game_over || !display_has(state, action.source, action.color) {
        return false;
    }
    let slot = action.dest.line_slot();
    slot == FLOOR_SLOT || state.current_board().can_accept(action.color, slot)
}

/// Mask over the 180 actions: true where the display holds the color and
/// the slot is the floor or a pattern line that can take it.
pub fn valid_action_mask(state: &GameState) -> ActionMask {
    let mut mask = [false; ACTION_SPACE_SIZE];
    if state.game_over {
        return mask;
    }

    let board = state.current_board();
    for display in 0..NUM_DISPLAYS {
        let source = if display == NUM_FACTORIES {
            DraftSource::Center
        } else {
            DraftSource::Factory(display as u8)
        };
        for color in ALL_COLORS {
            if !display_has(state, source, color) {
                continue;
            }
            let base = (display * TILE_COLORS + color.index()) * LINE_SLOTS;
            for row in 0..BOARD_SIZE {
                mask[base + row] = board.can_accept(color, row);
            }
            mask[base + FLOOR_SLOT] = true;
        }
    }
    mask
}

/// Decoded list of every legal action, in index order.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    valid_action_mask(state)
        .iter()
        .enumerate()
        .filter(|(_, &legal)| legal)
        .filter_map(|(id, _)| index_to_action(id))
        .collect()
}

// =============================================================================
// Turn cycle
// =============================================================================

/// Enact one draft for the current player and pass the turn. Does not check
/// legality; the display must hold at least one tile of `action.color`.
/// A source naming a factory that does not exist leaves the state untouched.
pub fn apply_turn(state: &mut GameState, action: Action) {
    let p = state.current_player as usize;

    let draft = match action.source {
        DraftSource::Factory(f) => {
            let Some(factory) = state.factories.get_mut(f as usize) else {
                return;
            };
            let draft = factory.take_color(action.color);
            state.center.add(factory.drain_remainder());
            draft
        }
        DraftSource::Center => state.center.take_color(action.color),
    };

    let board = &mut state.players[p];
    if draft.marker {
        board.place_marker();
    }
    board.place_in_pattern_line(
        draft.color,
        action.dest.line_slot(),
        draft.count,
        &mut state.reservoir,
    );

    state.current_player = other_player(state.current_player);
}

/// The round is over once no display holds a colored tile.
pub fn is_round_over(state: &GameState) -> bool {
    state.factories.iter().all(|f| f.is_empty()) && state.center.is_empty()
}

/// Round-end bookkeeping: wall tiling and scoring for both players, game-end
/// check, first player for the next round, fresh deal, and final scoring if
/// a wall row was completed.
pub fn end_round<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Transition {
    for p in 0..NUM_PLAYERS {
        let delta = state.players[p].end_round_score_and_move_to_wall(&mut state.reservoir);
        state.players[p].score += delta;
        debug!(
            player = p,
            round = state.round_number,
            delta,
            score = state.players[p].score,
            "round scored"
        );
    }

    state.round_number += 1;
    if state.players.iter().any(|b| b.has_completed_row()) {
        state.game_over = true;
    }

    if let Some(holder) = state.players.iter().position(|b| b.holds_marker) {
        state.current_player = holder as PlayerIdx;
    }
    for board in state.players.iter_mut() {
        board.holds_marker = false;
    }

    refill_displays(state, rng);
    state.center.reset();

    if !state.game_over {
        return Transition::RoundEnded {
            next_round: state.round_number,
        };
    }

    for board in state.players.iter_mut() {
        board.score += board.end_game_bonus();
    }
    let outcome = Outcome::from_scores(state.scores());
    state.outcome = Some(outcome);
    debug!(scores = ?state.scores(), ?outcome, rounds = state.round_number - 1, "game over");
    Transition::GameOver(outcome)
}

/// Apply `action` for the current player, running round-end and game-end
/// scoring when they are triggered.
///
/// Illegal actions and actions on a finished game are rejected without
/// touching the state.
pub fn apply_action<R: Rng + ?Sized>(
    state: &mut GameState,
    action: Action,
    rng: &mut R,
) -> Result<Transition, RulesError> {
    if state.game_over {
        return Err(RulesError::GameOver);
    }
    if !is_legal(state, action) {
        return Err(RulesError::IllegalAction(action));
    }

    apply_turn(state, action);
    let transition = if is_round_over(state) {
        end_round(state, rng)
    } else {
        Transition::TurnPassed
    };

    if let Err(err) = state.check_conservation() {
        error!(%err, ?state, "tile conservation violated");
        return Err(err);
    }
    Ok(transition)
}

pub fn is_terminal(state: &GameState) -> bool {
    state.game_over
}

/// Outcome of a finished game; None while it is still running.
pub fn outcome(state: &GameState) -> Option<Outcome> {
    state.outcome
}

pub fn other_player(player: PlayerIdx) -> PlayerIdx {
    1 - player
}
