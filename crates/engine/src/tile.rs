//! Tile colors, the first-player marker and the fixed wall layout.

use serde::Serialize;

/// Index into the two-element players array
pub type PlayerIdx = u8;

pub const BOARD_SIZE: usize = 5;
pub const NUM_PLAYERS: usize = 2;
pub const NUM_FACTORIES: usize = 5;
pub const FACTORY_CAPACITY: usize = 4;
pub const FLOOR_CAPACITY: usize = 7;
pub const TILE_COLORS: usize = 5;
pub const TILES_PER_COLOR: usize = 20;
pub const TOTAL_TILES: usize = TILES_PER_COLOR * TILE_COLORS;

/// Tile colors (order fixed for the action codec)
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Blue = 0,
    Yellow = 1,
    Red = 2,
    Black = 3,
    White = 4,
}

impl Color {
    /// Convert from u8 index to Color
    pub fn from_index(idx: u8) -> Option<Color> {
        match idx {
            0 => Some(Color::Blue),
            1 => Some(Color::Yellow),
            2 => Some(Color::Red),
            3 => Some(Color::Black),
            4 => Some(Color::White),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

pub const ALL_COLORS: [Color; TILE_COLORS] = [
    Color::Blue,
    Color::Yellow,
    Color::Red,
    Color::Black,
    Color::White,
];

/// Anything that can sit on a floor line: a colored tile or the marker.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    Tile(Color),
    Marker,
}

impl Token {
    pub fn color(self) -> Option<Color> {
        match self {
            Token::Tile(c) => Some(c),
            Token::Marker => None,
        }
    }

    pub fn is_marker(self) -> bool {
        matches!(self, Token::Marker)
    }
}

/// Floor penalties for slots 1..=7
pub const FLOOR_PENALTY: [i32; FLOOR_CAPACITY] = [-1, -1, -2, -2, -2, -3, -3];

/// Penalty for every floor entry beyond the seventh
pub const FLOOR_OVERFLOW_PENALTY: i32 = -3;

/// Wall pattern: WALL_PATTERN[row][col] = color printed on that cell.
/// Each row is the previous one shifted right by one column.
pub const WALL_PATTERN: [[Color; BOARD_SIZE]; BOARD_SIZE] = [
    [Color::Blue, Color::Yellow, Color::Red, Color::Black, Color::White],
    [Color::White, Color::Blue, Color::Yellow, Color::Red, Color::Black],
    [Color::Black, Color::White, Color::Blue, Color::Yellow, Color::Red],
    [Color::Red, Color::Black, Color::White, Color::Blue, Color::Yellow],
    [Color::Yellow, Color::Red, Color::Black, Color::White, Color::Blue],
];

/// Column that `color` occupies in `row`.
#[inline]
pub fn wall_column(row: usize, color: Color) -> usize {
    (color.index() + row) % BOARD_SIZE
}
