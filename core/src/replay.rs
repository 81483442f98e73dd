//! Reading a textual move log back for audit.
//!
//! The engine itself never reads its log; these helpers let tooling check that a
//! stored history is a legal game and rebuild the engine state it describes.

use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Splits move log text into boards, mapping labels back to cells.
pub fn parse_log(text: &str, size: Coord, labels: &CellLabels) -> Result<Vec<Array2<Cell>>> {
    let mut boards = Vec::new();
    let mut rows: Vec<&str> = Vec::new();

    for line in text.lines().chain(core::iter::once("")) {
        if !line.trim().is_empty() {
            rows.push(line);
            continue;
        }
        if rows.is_empty() {
            continue;
        }
        boards.push(parse_board(&rows, size, labels)?);
        rows.clear();
    }

    Ok(boards)
}

fn parse_board(rows: &[&str], size: Coord, labels: &CellLabels) -> Result<Array2<Cell>> {
    if rows.len() != usize::from(size) {
        return Err(GameError::InvalidBoardShape);
    }

    let mut board: Array2<Cell> = Array2::default((size, size).to_nd_index());
    for (row, line) in rows.iter().enumerate() {
        let mut count = 0;
        for (col, label) in line.split_whitespace().enumerate() {
            if col >= usize::from(size) {
                return Err(GameError::InvalidBoardShape);
            }
            board[[row, col]] = labels.cell_for(label).ok_or(GameError::UnknownLabel)?;
            count += 1;
        }
        if count != usize::from(size) {
            return Err(GameError::InvalidBoardShape);
        }
    }

    Ok(board)
}

/// Recovers the placed coordinates from consecutive boards.
///
/// Each board must add exactly one mark for the player whose turn it was,
/// starting with Player One, and leave every other cell untouched.
pub fn reconstruct_moves(boards: &[Array2<Cell>]) -> Result<Vec<Coord2>> {
    let Some(first) = boards.first() else {
        return Ok(Vec::new());
    };
    let dim = first.dim();
    if dim.0 != dim.1 || dim.0 == 0 || dim.0 > usize::from(Coord::MAX) {
        return Err(GameError::InvalidBoardShape);
    }

    let mut previous: Array2<Cell> = Array2::default(dim);
    let mut player = Player::One;
    let mut moves = Vec::with_capacity(boards.len());

    for board in boards {
        if board.dim() != dim {
            return Err(GameError::InvalidBoardShape);
        }

        let mut changed = board
            .indexed_iter()
            .filter(|&(index, cell)| previous[index] != *cell);
        let (Some(((row, col), &cell)), None) = (changed.next(), changed.next()) else {
            return Err(GameError::InconsistentHistory);
        };
        if cell != player.mark() {
            return Err(GameError::InconsistentHistory);
        }

        moves.push((row as Coord, col as Coord));
        previous.clone_from(board);
        player = player.other();
    }

    Ok(moves)
}

/// Splits boards from a log shared by several games.
///
/// A sink keeps appending across [`BoardEngine::reset`], so a board holding a
/// single Player One mark and nothing else starts a new game.
pub fn split_games(boards: &[Array2<Cell>]) -> Vec<&[Array2<Cell>]> {
    let mut games = Vec::new();
    let mut start = 0;
    for (index, board) in boards.iter().enumerate().skip(1) {
        if is_opening_board(board) {
            games.push(&boards[start..index]);
            start = index;
        }
    }
    if start < boards.len() {
        games.push(&boards[start..]);
    }
    games
}

fn is_opening_board(board: &Array2<Cell>) -> bool {
    let mut marks = board.iter().filter(|cell| !cell.is_empty());
    matches!((marks.next(), marks.next()), (Some(Cell::Player1), None))
}

/// Plays `moves` on a fresh engine, stopping at the first rejected placement.
pub fn replay(config: GameConfig, moves: &[Coord2]) -> Result<BoardEngine> {
    let mut engine = BoardEngine::new(config);
    for &coords in moves {
        engine.place_mark(coords)?;
    }
    Ok(engine)
}

/// Parses, checks and replays a whole move log, one engine per game in it.
pub fn replay_log(text: &str, size: Coord, labels: &CellLabels) -> Result<Vec<BoardEngine>> {
    let config = GameConfig::new(size)?;
    let boards = parse_log(text, size, labels)?;
    split_games(&boards)
        .into_iter()
        .map(|game| replay(config, &reconstruct_moves(game)?))
        .collect()
}
