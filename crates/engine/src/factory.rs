//! Factory displays and the central display tiles are drafted from.

use crate::{Color, FACTORY_CAPACITY, TILE_COLORS};

/// Tiles lifted off a display by one draft.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    pub color: Color,
    pub count: usize,
    /// True if the marker came along with this draft
    pub marker: bool,
}

/// An ordinary factory display (holds up to 4 tiles)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Factory {
    tiles: Vec<Color>,
}

impl Factory {
    /// Replace the contents with `tiles`.
    pub fn fill(&mut self, tiles: Vec<Color>) {
        debug_assert!(tiles.len() <= FACTORY_CAPACITY);
        self.tiles = tiles;
    }

    /// Remove every tile of `color`, leaving the rest in place.
    pub fn take_color(&mut self, color: Color) -> Draft {
        let count = take_all(&mut self.tiles, color);
        Draft {
            color,
            count,
            marker: false,
        }
    }

    /// Remove and return whatever is left.
    pub fn drain_remainder(&mut self) -> Vec<Color> {
        std::mem::take(&mut self.tiles)
    }

    pub fn tiles(&self) -> &[Color] {
        &self.tiles
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.tiles.contains(&color)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }
}

/// The central display: collects factory leftovers and starts every round
/// with the first-player marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CentralDisplay {
    tiles: Vec<Color>,
    marker: bool,
}

impl Default for CentralDisplay {
    fn default() -> Self {
        CentralDisplay {
            tiles: Vec::new(),
            marker: true,
        }
    }
}

impl CentralDisplay {
    pub fn add(&mut self, tiles: impl IntoIterator<Item = Color>) {
        self.tiles.extend(tiles);
    }

    /// Remove every tile of `color`. The first draft of the round also takes
    /// the marker, whichever color was chosen.
    pub fn take_color(&mut self, color: Color) -> Draft {
        let marker = self.claim_marker();
        let count = take_all(&mut self.tiles, color);
        Draft {
            color,
            count,
            marker,
        }
    }

    /// Take the marker if it is still here. Returns whether it was.
    pub fn claim_marker(&mut self) -> bool {
        std::mem::replace(&mut self.marker, false)
    }

    pub fn drain_remainder(&mut self) -> Vec<Color> {
        std::mem::take(&mut self.tiles)
    }

    /// Empty display with a fresh marker, ready for the next round.
    pub fn reset(&mut self) {
        debug_assert!(self.tiles.is_empty(), "central display reset while holding tiles");
        self.tiles.clear();
        self.marker = true;
    }

    pub fn has_marker(&self) -> bool {
        self.marker
    }

    pub fn marker_claimed(&self) -> bool {
        !self.marker
    }

    pub fn tiles(&self) -> &[Color] {
        &self.tiles
    }

    /// True if no colored tile is left; the marker does not count.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.tiles.contains(&color)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Count of tiles per color
    pub fn color_counts(&self) -> [u8; TILE_COLORS] {
        let mut counts = [0u8; TILE_COLORS];
        for &c in &self.tiles {
            counts[c.index()] += 1;
        }
        counts
    }
}

fn take_all(tiles: &mut Vec<Color>, color: Color) -> usize {
    let before = tiles.len();
    tiles.retain(|&c| c != color);
    before - tiles.len()
}
