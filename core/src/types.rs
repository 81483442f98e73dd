use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single coordinate axis used for the board size and for row/column positions.
pub type Coord = u8;

/// Board position as `(row, col)`, row 0 at the top.
pub type Coord2 = (Coord, Coord);

/// Signed running total of marks on a line.
pub type LineSum = i16;

/// Ordering tag assigned to each placed mark, starting at 1.
pub type MoveNumber = u16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn line_count(size: Coord) -> usize {
    2 * size as usize + 2
}

/// One of the `2 * size + 2` lines that can complete a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Row(Coord),
    Column(Coord),
    MainDiagonal,
    AntiDiagonal,
}

impl Line {
    /// Accumulator slot: rows first, then columns, then the main and anti diagonals.
    pub const fn index(self, size: Coord) -> usize {
        let size = size as usize;
        match self {
            Self::Row(row) => row as usize,
            Self::Column(col) => size + col as usize,
            Self::MainDiagonal => 2 * size,
            Self::AntiDiagonal => 2 * size + 1,
        }
    }

    pub fn from_index(index: usize, size: Coord) -> Option<Self> {
        let n = size as usize;
        match index {
            i if i < n => Some(Self::Row(i as Coord)),
            i if i < 2 * n => Some(Self::Column((i - n) as Coord)),
            i if i == 2 * n => Some(Self::MainDiagonal),
            i if i == 2 * n + 1 => Some(Self::AntiDiagonal),
            _ => None,
        }
    }

    /// Lines passing through `coords`, in accumulator order.
    pub fn through(coords: Coord2, size: Coord) -> SmallVec<[Line; 4]> {
        let (row, col) = coords;
        let mut lines = SmallVec::new();
        lines.push(Self::Row(row));
        lines.push(Self::Column(col));
        if row == col {
            lines.push(Self::MainDiagonal);
        }
        if row as usize + col as usize + 1 == size as usize {
            lines.push(Self::AntiDiagonal);
        }
        lines
    }

    /// Cells on this line, top to bottom.
    pub fn cells(self, size: Coord) -> LineCells {
        LineCells {
            line: self,
            size,
            step: 0,
        }
    }
}

#[derive(Debug)]
pub struct LineCells {
    line: Line,
    size: Coord,
    step: Coord,
}

impl Iterator for LineCells {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.size {
            return None;
        }
        let i = self.step;
        self.step += 1;

        Some(match self.line {
            Line::Row(row) => (row, i),
            Line::Column(col) => (i, col),
            Line::MainDiagonal => (i, i),
            Line::AntiDiagonal => (i, self.size - 1 - i),
        })
    }
}
