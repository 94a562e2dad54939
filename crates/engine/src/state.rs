//! The complete game state. Plain owned data: `clone()` is a deep copy.

use serde::Serialize;

use crate::{
    CentralDisplay, Factory, PlayerBoard, PlayerIdx, Reservoir, RulesError, NUM_FACTORIES,
    NUM_PLAYERS, TOTAL_TILES,
};

/// Final result of a finished game
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(tag = "kind", content = "player", rename_all = "snake_case")]
pub enum Outcome {
    Winner(PlayerIdx),
    Draw,
}

impl Outcome {
    /// Decide the outcome from final scores: strict maximum wins.
    pub fn from_scores(scores: [i32; NUM_PLAYERS]) -> Outcome {
        match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => Outcome::Winner(0),
            std::cmp::Ordering::Less => Outcome::Winner(1),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// +1 if `player` won, -1 if they lost, 0 for a draw.
    pub fn reward_for(self, player: PlayerIdx) -> f64 {
        match self {
            Outcome::Winner(w) if w == player => 1.0,
            Outcome::Winner(_) => -1.0,
            Outcome::Draw => 0.0,
        }
    }
}

/// Complete game state - fully Markov (no history needed)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub players: [PlayerBoard; NUM_PLAYERS],
    pub factories: [Factory; NUM_FACTORIES],
    pub center: CentralDisplay,
    pub reservoir: Reservoir,

    /// Whose turn it is
    pub current_player: PlayerIdx,

    /// 1-based; incremented after every round-end scoring
    pub round_number: u16,

    pub game_over: bool,

    /// Set together with `game_over`
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Empty table around a given reservoir. Displays are not dealt yet.
    pub fn with_reservoir(reservoir: Reservoir) -> Self {
        GameState {
            players: Default::default(),
            factories: Default::default(),
            center: CentralDisplay::default(),
            reservoir,
            current_player: 0,
            round_number: 1,
            game_over: false,
            outcome: None,
        }
    }

    pub fn current_board(&self) -> &PlayerBoard {
        &self.players[self.current_player as usize]
    }

    pub fn scores(&self) -> [i32; NUM_PLAYERS] {
        [self.players[0].score, self.players[1].score]
    }

    /// Colored tiles across every location; always 100 in a sound state.
    pub fn tile_count(&self) -> usize {
        let factories: usize = self.factories.iter().map(Factory::len).sum();
        let boards: usize = self.players.iter().map(PlayerBoard::tile_count).sum();
        factories + self.center.len() + boards + self.reservoir.available()
    }

    pub fn check_conservation(&self) -> Result<(), RulesError> {
        let found = self.tile_count();
        if found == TOTAL_TILES {
            Ok(())
        } else {
            Err(RulesError::ConservationViolation {
                found,
                expected: TOTAL_TILES,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(Outcome::from_scores([10, 3]), Outcome::Winner(0));
        assert_eq!(Outcome::from_scores([-2, 0]), Outcome::Winner(1));
        assert_eq!(Outcome::from_scores([7, 7]), Outcome::Draw);
    }

    #[test]
    fn test_reward_for() {
        assert_eq!(Outcome::Winner(1).reward_for(1), 1.0);
        assert_eq!(Outcome::Winner(1).reward_for(0), -1.0);
        assert_eq!(Outcome::Draw.reward_for(0), 0.0);
    }

    #[test]
    fn test_fresh_state_conserves_tiles() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::with_reservoir(Reservoir::new(&mut rng));
        assert_eq!(state.tile_count(), 100);
        assert!(state.check_conservation().is_ok());
        assert!(state.center.has_marker());
    }

    #[test]
    fn test_missing_tile_is_reported() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::with_reservoir(Reservoir::new(&mut rng));
        state.reservoir.draw(1, &mut rng).unwrap();
        assert_eq!(
            state.check_conservation(),
            Err(RulesError::ConservationViolation {
                found: 99,
                expected: 100
            })
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut rng = StdRng::seed_from_u64(1);
        let original = GameState::with_reservoir(Reservoir::new(&mut rng));
        let mut copy = original.clone();
        copy.players[0].score = 42;
        copy.center.claim_marker();
        copy.factories[0].fill(vec![crate::Color::Red]);

        assert_eq!(original.players[0].score, 0);
        assert!(original.center.has_marker());
        assert!(original.factories[0].is_empty());
    }
}
