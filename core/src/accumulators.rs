use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Per-line running sums, `+1` for each Player One mark and `-1` for each Player Two mark.
///
/// Slots follow [`Line::index`]: rows, then columns, then the main and anti diagonals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAccumulators {
    size: Coord,
    sums: Vec<LineSum>,
}

impl LineAccumulators {
    pub fn new(size: Coord) -> Self {
        Self {
            size,
            sums: alloc::vec![0; line_count(size)],
        }
    }

    pub fn as_slice(&self) -> &[LineSum] {
        &self.sums
    }

    pub fn is_zeroed(&self) -> bool {
        self.sums.iter().all(|&sum| sum == 0)
    }

    pub fn clear(&mut self) {
        self.sums.fill(0);
    }

    /// Adds `player`'s contribution to every line through `coords`.
    pub fn apply(&mut self, coords: Coord2, player: Player) {
        let delta = player.delta();
        for line in Line::through(coords, self.size) {
            self.sums[line.index(self.size)] += delta;
        }
    }

    /// First line, in enumeration order, fully owned by one player.
    pub fn first_complete(&self) -> Option<(Line, Player)> {
        let full = LineSum::from(self.size);
        self.sums
            .iter()
            .position(|&sum| sum == full || sum == -full)
            .and_then(|index| {
                let line = Line::from_index(index, self.size)?;
                let player = if self.sums[index] > 0 {
                    Player::One
                } else {
                    Player::Two
                };
                Some((line, player))
            })
    }
}

impl Index<Line> for LineAccumulators {
    type Output = LineSum;

    fn index(&self, line: Line) -> &Self::Output {
        &self.sums[line.index(self.size)]
    }
}
