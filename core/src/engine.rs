use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Empty,
    InProgress,
    Won(Player),
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won(_))
    }

    pub const fn winner(self) -> Option<Player> {
        match self {
            Self::Won(player) => Some(player),
            _ => None,
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Empty
    }
}

/// What a successful placement did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementResult {
    /// Ordering tag of the mark just placed.
    pub move_number: MoveNumber,
    pub winner: Option<Player>,
    pub winning_line: Option<Line>,
    /// Whose turn it is now, `None` once the game is won.
    pub next_player: Option<Player>,
    /// Set when the move sink failed; the placement itself still stands.
    pub log_error: Option<LogError>,
}

impl PlacementResult {
    pub const fn is_win(&self) -> bool {
        self.winner.is_some()
    }
}

/// N-in-a-row engine: an N×N board, per-line accumulators and an append-only move log.
#[derive(Clone, Debug)]
pub struct BoardEngine<S = DiscardSink> {
    size: Coord,
    board: Array2<Cell>,
    accumulators: LineAccumulators,
    current_player: Player,
    move_counter: MoveNumber,
    state: EngineState,
    winning_line: Option<Line>,
    move_log: MoveLog,
    sink: S,
}

impl BoardEngine {
    pub fn new(config: GameConfig) -> Self {
        Self::with_sink(config, DiscardSink)
    }

    pub fn initialize(size: Coord) -> Result<Self> {
        Ok(Self::new(GameConfig::new(size)?))
    }
}

impl<S: MoveSink> BoardEngine<S> {
    pub fn with_sink(config: GameConfig, sink: S) -> Self {
        let size = config.size();
        Self {
            size,
            board: Array2::default((size, size).to_nd_index()),
            accumulators: LineAccumulators::new(size),
            current_player: Player::One,
            move_counter: 1,
            state: Default::default(),
            winning_line: None,
            move_log: MoveLog::new(),
            sink,
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Tag the next placed mark will receive.
    pub fn move_counter(&self) -> MoveNumber {
        self.move_counter
    }

    pub fn moves_played(&self) -> usize {
        self.move_log.len()
    }

    pub fn winner(&self) -> Option<Player> {
        self.state.winner()
    }

    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    pub fn accumulators(&self) -> &LineAccumulators {
        &self.accumulators
    }

    pub fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.board.get(coords.to_nd_index()).copied()
    }

    pub fn is_full(&self) -> bool {
        self.board.iter().all(|cell| !cell.is_empty())
    }

    /// Every cell is marked and nobody completed a line.
    pub fn is_draw(&self) -> bool {
        !self.is_finished() && self.is_full()
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.board
            .indexed_iter()
            .filter(|(_, cell)| cell.is_empty())
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn place_mark(&mut self, coords: Coord2) -> Result<PlacementResult> {
        self.check_placement(coords)?;

        let player = self.current_player;
        let move_number = self.move_counter;
        self.board[coords.to_nd_index()] = player.mark();
        self.move_counter += 1;
        self.accumulators.apply(coords, player);
        self.state = EngineState::InProgress;
        log::debug!(
            "Move {}: {} marked ({}, {})",
            move_number,
            player,
            coords.0,
            coords.1
        );

        let log_error = self.record_move(move_number, player);

        if let Some((line, winner)) = self.accumulators.first_complete() {
            self.state = EngineState::Won(winner);
            self.winning_line = Some(line);
            log::info!("{} wins on {:?} after {} moves", winner, line, move_number);
            return Ok(PlacementResult {
                move_number,
                winner: Some(winner),
                winning_line: Some(line),
                next_player: None,
                log_error,
            });
        }

        self.current_player = player.other();
        Ok(PlacementResult {
            move_number,
            winner: None,
            winning_line: None,
            next_player: Some(self.current_player),
            log_error,
        })
    }

    pub fn reset(&mut self) {
        self.board.fill(Cell::Empty);
        self.accumulators.clear();
        self.current_player = Player::One;
        self.move_counter = 1;
        self.state = EngineState::Empty;
        self.winning_line = None;
        self.move_log.clear();
        log::info!("Board of size {} reset", self.size);
    }

    pub fn export_move_log(&self) -> &MoveLog {
        &self.move_log
    }

    fn record_move(&mut self, move_number: MoveNumber, player: Player) -> Option<LogError> {
        let snapshot = Snapshot::new(move_number, player, self.board.clone());
        let result = self.sink.append(&snapshot);
        self.move_log.push(snapshot);

        match result {
            Ok(()) => None,
            Err(err) => {
                log::warn!("Move {} kept in memory only: {}", move_number, err);
                Some(err)
            }
        }
    }

    fn check_placement(&self, coords: Coord2) -> Result<()> {
        if self.state.is_finished() {
            return Err(GameError::GameAlreadyOver);
        }

        match self.cell_at(coords) {
            None => Err(GameError::IllegalMove(MoveRejection::OutOfBounds)),
            Some(Cell::Empty) => Ok(()),
            Some(_) => Err(GameError::IllegalMove(MoveRejection::Occupied)),
        }
    }
}

impl PartialEq for BoardEngine {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.board == other.board
            && self.accumulators == other.accumulators
            && self.current_player == other.current_player
            && self.move_counter == other.move_counter
            && self.state == other.state
            && self.winning_line == other.winning_line
            && self.move_log == other.move_log
    }
}
