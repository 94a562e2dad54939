//! Feature extraction: GameState → Observation
//!
//! Converts full game state into a fixed-length vector observation from the
//! perspective of a given player, for decision-makers that score moves with
//! an external model.

use azul_engine::{
    GameState, PlayerIdx, Token, ALL_COLORS, BOARD_SIZE, FACTORY_CAPACITY, FLOOR_CAPACITY,
    NUM_FACTORIES, NUM_PLAYERS, TILES_PER_COLOR, TILE_COLORS,
};

/// Flat f32 observation vector
pub type Observation = Vec<f32>;

// Pattern lines (one-hot color + fill ratio), wall cells, floor (color
// counts + marker + fill), score
const PER_PLAYER_FEATURES: usize =
    BOARD_SIZE * (TILE_COLORS + 1) + BOARD_SIZE * BOARD_SIZE + (TILE_COLORS + 2) + 1;

/// Length of every observation produced by [`BasicFeatureExtractor`].
pub const OBS_SIZE: usize = NUM_FACTORIES * TILE_COLORS // factory color counts
    + TILE_COLORS + 1 // center counts + marker present
    + PER_PLAYER_FEATURES * NUM_PLAYERS
    + NUM_PLAYERS // player to move, one-hot
    + NUM_PLAYERS // marker on this player's floor, one-hot
    + 1; // round number

/// Converts a full GameState into a fixed-length observation from the
/// perspective of a given player.
pub trait FeatureExtractor {
    /// Length of the observation vector.
    fn obs_size(&self) -> usize;

    /// Encode state from the perspective of `player`.
    ///
    /// Deterministic given (state, player), no internal randomness.
    fn encode(&self, state: &GameState, player: PlayerIdx) -> Observation;
}

/// Basic feature extractor implementation
///
/// Encodes:
/// - Factory displays (color counts)
/// - Central display (color counts + marker present)
/// - For each player, rotated so `player` comes first:
///   - Pattern lines (5 rows, color one-hot + fill ratio)
///   - Wall (5×5 binary)
///   - Floor line (color counts, marker, fill)
///   - Score (normalized by 100)
/// - Player to move and marker holder (both one-hot, rotated)
/// - Round number
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicFeatureExtractor;

impl FeatureExtractor for BasicFeatureExtractor {
    fn obs_size(&self) -> usize {
        OBS_SIZE
    }

    fn encode(&self, state: &GameState, player: PlayerIdx) -> Observation {
        let mut features = Vec::with_capacity(OBS_SIZE);
        let flag = |b: bool| -> f32 { if b { 1.0 } else { 0.0 } };
        let rotated = |offset: usize| (player as usize + offset) % NUM_PLAYERS;

        // 1. Factories
        for factory in &state.factories {
            let mut counts = [0u8; TILE_COLORS];
            for &color in factory.tiles() {
                counts[color.index()] += 1;
            }
            features.extend(counts.iter().map(|&c| c as f32 / FACTORY_CAPACITY as f32));
        }

        // 2. Central display
        let counts = state.center.color_counts();
        features.extend(counts.iter().map(|&c| c as f32 / TILES_PER_COLOR as f32));
        features.push(flag(state.center.has_marker()));

        // 3. Players
        for offset in 0..NUM_PLAYERS {
            let board = &state.players[rotated(offset)];

            for (row, line) in board.pattern_lines.iter().enumerate() {
                for color in ALL_COLORS {
                    features.push(flag(line.color == Some(color)));
                }
                features.push(line.count as f32 / (row + 1) as f32);
            }

            for row in &board.wall {
                features.extend(row.iter().map(|cell| flag(cell.is_some())));
            }

            let mut floor_counts = [0u8; TILE_COLORS];
            for token in &board.floor {
                if let Token::Tile(color) = token {
                    floor_counts[color.index()] += 1;
                }
            }
            features.extend(
                floor_counts
                    .iter()
                    .map(|&c| c as f32 / FLOOR_CAPACITY as f32),
            );
            features.push(flag(board.has_marker_on_floor()));
            features.push(board.floor.len() as f32 / FLOOR_CAPACITY as f32);

            features.push(board.score as f32 / 100.0);
        }

        // 4. Player to move
        for offset in 0..NUM_PLAYERS {
            features.push(flag(rotated(offset) == state.current_player as usize));
        }

        // 5. Marker holder
        for offset in 0..NUM_PLAYERS {
            features.push(flag(state.players[rotated(offset)].has_marker_on_floor()));
        }

        // 6. Round number (games usually last 5-6 rounds)
        features.push(state.round_number as f32 / 10.0);

        debug_assert_eq!(features.len(), OBS_SIZE, "Feature count mismatch");
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azul_engine::{setup_game, Color};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_obs_size() {
        // 25 factory + 6 center + 2 * 63 player + 2 + 2 + 1
        assert_eq!(OBS_SIZE, 162);
        assert_eq!(BasicFeatureExtractor.obs_size(), OBS_SIZE);
    }

    #[test]
    fn test_encode_has_fixed_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let state = setup_game(&mut rng);
        for player in 0..NUM_PLAYERS as PlayerIdx {
            assert_eq!(BasicFeatureExtractor.encode(&state, player).len(), OBS_SIZE);
        }
    }

    #[test]
    fn test_encode_determinism() {
        let mut rng = StdRng::seed_from_u64(42);
        let state = setup_game(&mut rng);
        assert_eq!(
            BasicFeatureExtractor.encode(&state, 0),
            BasicFeatureExtractor.encode(&state, 0),
            "Encoding should be deterministic"
        );
    }

    #[test]
    fn test_factory_counts_sum_to_one_per_full_factory() {
        let mut rng = StdRng::seed_from_u64(42);
        let state = setup_game(&mut rng);
        let obs = BasicFeatureExtractor.encode(&state, 0);
        for f in 0..NUM_FACTORIES {
            let sum: f32 = obs[f * TILE_COLORS..(f + 1) * TILE_COLORS].iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
        }
        // center is empty but holds the marker
        let center = NUM_FACTORIES * TILE_COLORS;
        assert!(obs[center..center + TILE_COLORS].iter().all(|&x| x == 0.0));
        assert_eq!(obs[center + TILE_COLORS], 1.0);
    }

    #[test]
    fn test_different_player_perspectives() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = setup_game(&mut rng);
        state.players[0].pattern_lines[0].color = Some(Color::Blue);
        state.players[0].pattern_lines[0].count = 1;

        let obs0 = BasicFeatureExtractor.encode(&state, 0);
        let obs1 = BasicFeatureExtractor.encode(&state, 1);
        assert_ne!(obs0, obs1, "Different players should see different observations");

        // Own board comes first: blue one-hot on line 0
        let own = NUM_FACTORIES * TILE_COLORS + TILE_COLORS + 1;
        assert_eq!(obs0[own + Color::Blue.index()], 1.0);
        assert_eq!(obs1[own + PER_PLAYER_FEATURES + Color::Blue.index()], 1.0);
    }
}
