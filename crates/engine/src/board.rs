//! Per-player board: pattern lines, wall, floor line and the scoring rules
//! attached to them.

use crate::{
    wall_column, Color, Reservoir, Token, ALL_COLORS, BOARD_SIZE, FLOOR_CAPACITY,
    FLOOR_OVERFLOW_PENALTY, FLOOR_PENALTY,
};

/// Line slot the action codec uses for "straight to the floor line"
pub const FLOOR_SLOT: usize = BOARD_SIZE;

/// A single pattern line (one of 5 rows, capacities 1-5)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternLine {
    pub color: Option<Color>, // None => empty; Some(c) => all tiles are c
    pub count: u8,
}

impl PatternLine {
    pub fn is_full(&self, row: usize) -> bool {
        self.count as usize == row + 1
    }
}

/// Wall: 5x5 grid, each cell either empty (None) or holding its pattern color
pub type Wall = [[Option<Color>; BOARD_SIZE]; BOARD_SIZE];

/// Where the tiles of one placement ended up.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Placement {
    pub to_line: usize,
    pub to_floor: usize,
    pub to_discard: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerBoard {
    pub pattern_lines: [PatternLine; BOARD_SIZE],
    pub wall: Wall,
    /// Floor line entries in the order they arrived
    pub floor: Vec<Token>,
    pub score: i32, // unclamped, floor penalties can push it negative
    /// Set when the marker left the floor during round-end cleanup; the
    /// engine hands it back to the central display.
    pub holds_marker: bool,
}

impl Default for PlayerBoard {
    fn default() -> Self {
        PlayerBoard {
            pattern_lines: [PatternLine::default(); BOARD_SIZE],
            wall: [[None; BOARD_SIZE]; BOARD_SIZE],
            floor: Vec::with_capacity(FLOOR_CAPACITY + 1),
            score: 0,
            holds_marker: false,
        }
    }
}

impl PlayerBoard {
    /// True if `color` already sits on the wall in `row`.
    pub fn wall_has(&self, row: usize, color: Color) -> bool {
        self.wall[row][wall_column(row, color)].is_some()
    }

    /// Whether pattern line `row` can take at least one more tile of `color`.
    pub fn can_accept(&self, color: Color, row: usize) -> bool {
        if row >= BOARD_SIZE || self.wall_has(row, color) {
            return false;
        }
        let line = &self.pattern_lines[row];
        match line.color {
            None => true,
            Some(existing) => existing == color && !line.is_full(row),
        }
    }

    /// Place `count` tiles of `color` on pattern line `line_slot`.
    ///
    /// Slots outside 0..=4 send everything to the floor. Tiles that cannot go
    /// on the line (wall already has the color, line holds another color, or
    /// the line runs out of room) overflow to the floor, and whatever the
    /// floor cannot hold goes to the discard.
    pub fn place_in_pattern_line(
        &mut self,
        color: Color,
        line_slot: usize,
        count: usize,
        reservoir: &mut Reservoir,
    ) -> Placement {
        if line_slot >= BOARD_SIZE || self.wall_has(line_slot, color) {
            return self.add_to_floor(color, count, reservoir);
        }

        if self.pattern_lines[line_slot]
            .color
            .is_some_and(|c| c != color)
        {
            return self.add_to_floor(color, count, reservoir);
        }

        let line = &mut self.pattern_lines[line_slot];
        let space = line_slot + 1 - line.count as usize;
        let to_line = count.min(space);
        if to_line > 0 {
            line.color = Some(color);
            line.count += to_line as u8;
        }

        let overflow = self.add_to_floor(color, count - to_line, reservoir);
        Placement {
            to_line,
            ..overflow
        }
    }

    /// Put `count` tiles of `color` on the floor line; anything past the
    /// seventh slot goes to the discard.
    pub fn add_to_floor(&mut self, color: Color, count: usize, reservoir: &mut Reservoir) -> Placement {
        let room = FLOOR_CAPACITY.saturating_sub(self.floor.len());
        let to_floor = count.min(room);
        self.floor
            .extend(std::iter::repeat(Token::Tile(color)).take(to_floor));
        let to_discard = count - to_floor;
        for _ in 0..to_discard {
            reservoir.discard_one(color);
        }
        Placement {
            to_line: 0,
            to_floor,
            to_discard,
        }
    }

    /// The marker always lands on the floor, even a full one.
    pub fn place_marker(&mut self) {
        self.floor.push(Token::Marker);
    }

    /// Round-end wall tiling: move one tile from every full pattern line to
    /// the wall and score it, discard the rest of the line, then charge the
    /// floor penalty and clear the floor. Returns the round's score delta.
    pub fn end_round_score_and_move_to_wall(&mut self, reservoir: &mut Reservoir) -> i32 {
        let mut delta = 0;

        for row in 0..BOARD_SIZE {
            let line = self.pattern_lines[row];
            let Some(color) = line.color else { continue };
            if !line.is_full(row) {
                continue;
            }

            let col = wall_column(row, color);
            let leftovers = if self.wall[row][col].is_none() {
                self.wall[row][col] = Some(color);
                delta += score_placement(&self.wall, row, col);
                row
            } else {
                // Unreachable through legal play: nothing moves, all go back
                row + 1
            };
            reservoir.discard(std::iter::repeat(color).take(leftovers));
            self.pattern_lines[row] = PatternLine::default();
        }

        delta += floor_penalty(self.floor.len());
        for token in self.floor.drain(..) {
            match token {
                Token::Tile(c) => reservoir.discard_one(c),
                Token::Marker => self.holds_marker = true,
            }
        }

        delta
    }

    /// End-of-game bonus: +2 per full row, +7 per full column, +10 per color
    /// with all five cells filled.
    pub fn end_game_bonus(&self) -> i32 {
        let rows = (0..BOARD_SIZE)
            .filter(|&r| self.wall[r].iter().all(Option::is_some))
            .count() as i32;
        let cols = (0..BOARD_SIZE)
            .filter(|&c| (0..BOARD_SIZE).all(|r| self.wall[r][c].is_some()))
            .count() as i32;
        let colors = ALL_COLORS
            .iter()
            .filter(|&&color| (0..BOARD_SIZE).all(|r| self.wall_has(r, color)))
            .count() as i32;
        rows * 2 + cols * 7 + colors * 10
    }

    pub fn has_completed_row(&self) -> bool {
        self.wall
            .iter()
            .any(|row| row.iter().all(Option::is_some))
    }

    pub fn has_marker_on_floor(&self) -> bool {
        self.floor.iter().any(|t| t.is_marker())
    }

    /// Colored tiles held on this board (pattern lines, wall, floor)
    pub fn tile_count(&self) -> usize {
        let lines: usize = self.pattern_lines.iter().map(|l| l.count as usize).sum();
        let wall = self.wall.iter().flatten().filter(|c| c.is_some()).count();
        let floor = self.floor.iter().filter(|t| !t.is_marker()).count();
        lines + wall + floor
    }
}

/// Penalty for a floor line holding `len` entries (marker included).
pub fn floor_penalty(len: usize) -> i32 {
    let scheduled: i32 = FLOOR_PENALTY.iter().take(len).sum();
    let beyond = len.saturating_sub(FLOOR_CAPACITY) as i32;
    scheduled + beyond * FLOOR_OVERFLOW_PENALTY
}

/// Score for the tile just placed at (row, col): 1, plus the rest of its
/// horizontal run if that run is longer than 1, plus the rest of its
/// vertical run if that run is longer than 1.
pub fn score_placement(wall: &Wall, row: usize, col: usize) -> i32 {
    let filled = |r: usize, c: usize| wall[r][c].is_some();

    let left = (0..col).rev().take_while(|&c| filled(row, c)).count();
    let right = (col + 1..BOARD_SIZE).take_while(|&c| filled(row, c)).count();
    let up = (0..row).rev().take_while(|&r| filled(r, col)).count();
    let down = (row + 1..BOARD_SIZE).take_while(|&r| filled(r, col)).count();

    (1 + left + right + up + down) as i32
}
