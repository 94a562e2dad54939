//! Tile supply: the bag tiles are drawn from and the discard pile ("box lid")
//! tiles return to.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Color, RulesError, ALL_COLORS, TILES_PER_COLOR};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reservoir {
    /// Tiles still in the bag; draws come off the front
    bag: Vec<Color>,
    /// Tiles waiting to be poured back into the bag
    discard: Vec<Color>,
}

impl Reservoir {
    /// Full bag of 20 tiles per color, shuffled.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bag: Vec<Color> = ALL_COLORS
            .iter()
            .flat_map(|&c| std::iter::repeat(c).take(TILES_PER_COLOR))
            .collect();
        bag.shuffle(rng);
        Reservoir {
            bag,
            discard: Vec::new(),
        }
    }

    /// Bag with a caller-chosen draw order. No shuffling happens until the
    /// discard is first poured back in.
    pub fn from_order(order: Vec<Color>) -> Self {
        Reservoir {
            bag: order,
            discard: Vec::new(),
        }
    }

    /// Draw exactly `n` tiles. If the bag runs short the discard is poured
    /// into it and the bag reshuffled first.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Color>, RulesError> {
        let available = self.available();
        if available < n {
            return Err(RulesError::InsufficientTiles {
                requested: n,
                available,
            });
        }
        Ok(self.draw_up_to(n, rng))
    }

    /// Draw up to `n` tiles, stopping early only when bag and discard are
    /// both exhausted.
    pub fn draw_up_to<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Vec<Color> {
        if self.bag.len() < n && !self.discard.is_empty() {
            self.bag.append(&mut self.discard);
            self.bag.shuffle(rng);
        }
        let n = n.min(self.bag.len());
        self.bag.drain(..n).collect()
    }

    pub fn discard(&mut self, tiles: impl IntoIterator<Item = Color>) {
        self.discard.extend(tiles);
    }

    pub fn discard_one(&mut self, color: Color) {
        self.discard.push(color);
    }

    /// Tiles that can still be drawn (bag + discard)
    pub fn available(&self) -> usize {
        self.bag.len() + self.discard.len()
    }

    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn discarded(&self) -> &[Color] {
        &self.discard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_reservoir_holds_every_tile() {
        let mut rng = StdRng::seed_from_u64(7);
        let reservoir = Reservoir::new(&mut rng);
        assert_eq!(reservoir.bag_len(), 100);
        assert_eq!(reservoir.discard_len(), 0);
        for color in ALL_COLORS {
            assert_eq!(reservoir.bag.iter().filter(|&&c| c == color).count(), 20);
        }
    }

    #[test]
    fn test_draw_takes_from_front_in_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut reservoir =
            Reservoir::from_order(vec![Color::Red, Color::Blue, Color::White, Color::Red]);
        let drawn = reservoir.draw(3, &mut rng).unwrap();
        assert_eq!(drawn, vec![Color::Red, Color::Blue, Color::White]);
        assert_eq!(reservoir.bag_len(), 1);
    }

    #[test]
    fn test_draw_refills_from_discard_when_short() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut reservoir = Reservoir::from_order(vec![Color::Red]);
        reservoir.discard([Color::Blue, Color::Blue, Color::Black]);

        let drawn = reservoir.draw(4, &mut rng).unwrap();
        assert_eq!(drawn.len(), 4);
        assert_eq!(reservoir.available(), 0);

        let mut sorted = drawn.clone();
        sorted.sort();
        assert_eq!(sorted, vec![Color::Blue, Color::Blue, Color::Red, Color::Black]);
    }

    #[test]
    fn test_draw_fails_when_both_sources_are_exhausted() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut reservoir = Reservoir::from_order(vec![Color::Red]);
        reservoir.discard_one(Color::Yellow);

        let err = reservoir.draw(3, &mut rng).unwrap_err();
        assert_eq!(
            err,
            RulesError::InsufficientTiles {
                requested: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_draw_up_to_returns_what_is_left() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut reservoir = Reservoir::from_order(vec![Color::Red]);
        reservoir.discard_one(Color::Black);

        let drawn = reservoir.draw_up_to(4, &mut rng);
        assert_eq!(drawn.len(), 2);
        assert_eq!(reservoir.available(), 0);
        assert!(reservoir.draw_up_to(4, &mut rng).is_empty());
    }

    #[test]
    fn test_discard_does_not_touch_bag() {
        let mut reservoir = Reservoir::from_order(vec![Color::Red; 5]);
        reservoir.discard([Color::Blue; 3]);
        assert_eq!(reservoir.bag_len(), 5);
        assert_eq!(reservoir.discard_len(), 3);
        assert_eq!(reservoir.available(), 8);
    }
}
