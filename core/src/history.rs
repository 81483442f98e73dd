use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write as _};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Labels written for each cell owner in the textual move log.
///
/// Labels are non-empty, free of whitespace and distinct, so a log can be
/// split back into cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCellLabels")]
pub struct CellLabels {
    empty: String,
    player1: String,
    player2: String,
}

#[derive(Deserialize)]
struct RawCellLabels {
    empty: String,
    player1: String,
    player2: String,
}

impl TryFrom<RawCellLabels> for CellLabels {
    type Error = GameError;

    fn try_from(raw: RawCellLabels) -> Result<Self> {
        Self::new(raw.empty, raw.player1, raw.player2)
    }
}

impl CellLabels {
    pub fn new(
        empty: impl Into<String>,
        player1: impl Into<String>,
        player2: impl Into<String>,
    ) -> Result<Self> {
        let labels = Self {
            empty: empty.into(),
            player1: player1.into(),
            player2: player2.into(),
        };
        labels.validate()?;
        Ok(labels)
    }

    pub fn validate(&self) -> Result<()> {
        let all = [&self.empty, &self.player1, &self.player2];
        if all
            .iter()
            .any(|label| label.is_empty() || label.chars().any(char::is_whitespace))
        {
            return Err(GameError::InvalidLabels);
        }
        if self.empty == self.player1 || self.empty == self.player2 || self.player1 == self.player2
        {
            return Err(GameError::InvalidLabels);
        }
        Ok(())
    }

    pub fn label(&self, cell: Cell) -> &str {
        match cell {
            Cell::Empty => &self.empty,
            Cell::Player1 => &self.player1,
            Cell::Player2 => &self.player2,
        }
    }

    pub fn cell_for(&self, label: &str) -> Option<Cell> {
        [Cell::Empty, Cell::Player1, Cell::Player2]
            .into_iter()
            .find(|&cell| self.label(cell) == label)
    }
}

impl Default for CellLabels {
    fn default() -> Self {
        Self {
            empty: "0".into(),
            player1: "1".into(),
            player2: "2".into(),
        }
    }
}

/// Board contents right after one placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    move_number: MoveNumber,
    player: Player,
    cells: Array2<Cell>,
}

impl Snapshot {
    pub(crate) fn new(move_number: MoveNumber, player: Player, cells: Array2<Cell>) -> Self {
        Self {
            move_number,
            player,
            cells,
        }
    }

    pub fn move_number(&self) -> MoveNumber {
        self.move_number
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// One line per row, each cell followed by a space, then a blank line.
    pub fn write_text(&self, out: &mut impl fmt::Write, labels: &CellLabels) -> fmt::Result {
        for row in self.cells.rows() {
            for &cell in row {
                out.write_str(labels.label(cell))?;
                out.write_char(' ')?;
            }
            out.write_char('\n')?;
        }
        out.write_char('\n')
    }

    pub fn to_text(&self, labels: &CellLabels) -> String {
        let mut text = String::new();
        self.write_text(&mut text, labels).ok();
        text
    }
}

/// Append-only history of snapshots, one per placed mark.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    snapshots: Vec<Snapshot>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub(crate) fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn to_text(&self, labels: &CellLabels) -> String {
        let mut text = String::new();
        for snapshot in &self.snapshots {
            snapshot.write_text(&mut text, labels).ok();
        }
        text
    }
}

/// Destination that mirrors each new snapshot outside the engine.
pub trait MoveSink {
    fn append(&mut self, snapshot: &Snapshot) -> core::result::Result<(), LogError>;
}

/// Sink that keeps nothing beyond the in-memory [`MoveLog`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscardSink;

impl MoveSink for DiscardSink {
    fn append(&mut self, _snapshot: &Snapshot) -> core::result::Result<(), LogError> {
        Ok(())
    }
}

impl<S: MoveSink + ?Sized> MoveSink for &mut S {
    fn append(&mut self, snapshot: &Snapshot) -> core::result::Result<(), LogError> {
        (**self).append(snapshot)
    }
}

/// Collects rendered text in memory, for callers that persist it themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextSink {
    labels: CellLabels,
    text: String,
}

impl TextSink {
    pub fn new(labels: CellLabels) -> Self {
        Self {
            labels,
            text: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl MoveSink for TextSink {
    fn append(&mut self, snapshot: &Snapshot) -> core::result::Result<(), LogError> {
        snapshot
            .write_text(&mut self.text, &self.labels)
            .map_err(|err| LogError(err.to_string()))
    }
}

#[cfg(feature = "std")]
pub use file::FileSink;

#[cfg(feature = "std")]
mod file {
    use std::fs::OpenOptions;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use super::*;

    /// Appends every snapshot to a text file, creating it on first use.
    #[derive(Clone, Debug)]
    pub struct FileSink {
        path: PathBuf,
        labels: CellLabels,
    }

    impl FileSink {
        pub fn new(path: impl Into<PathBuf>, labels: CellLabels) -> Self {
            Self {
                path: path.into(),
                labels,
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl MoveSink for FileSink {
        fn append(&mut self, snapshot: &Snapshot) -> core::result::Result<(), LogError> {
            let text = snapshot.to_text(&self.labels);
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .and_then(|mut file| file.write_all(text.as_bytes()))
                .map_err(|err| LogError(std::format!("{}: {}", self.path.display(), err)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        let mut cells = Array2::default([2, 2]);
        cells[[0, 1]] = Cell::Player1;
        cells[[1, 0]] = Cell::Player2;
        Snapshot::new(2, Player::Two, cells)
    }

    #[test]
    fn text_has_trailing_space_per_cell_and_blank_line() {
        assert_eq!(snapshot().to_text(&CellLabels::default()), "0 1 \n2 0 \n\n");
    }

    #[test]
    fn custom_labels_are_used() {
        let labels = CellLabels::new(".", "X", "O").unwrap();
        assert_eq!(snapshot().to_text(&labels), ". X \nO . \n\n");
        assert_eq!(labels.cell_for("O"), Some(Cell::Player2));
        assert_eq!(labels.cell_for("?"), None);
    }

    #[test]
    fn text_sink_accumulates_snapshots() {
        let mut sink = TextSink::new(CellLabels::default());
        sink.append(&snapshot()).unwrap();
        sink.append(&snapshot()).unwrap();

        assert_eq!(sink.text(), "0 1 \n2 0 \n\n0 1 \n2 0 \n\n");
    }

    #[cfg(feature = "std")]
    #[test]
    fn file_sink_reports_unwritable_path() {
        let dir = std::env::temp_dir().join("noughts-missing-dir").join("nested");
        let mut sink = FileSink::new(dir.join("games.txt"), CellLabels::default());

        assert!(sink.append(&snapshot()).is_err());
    }

    #[cfg(feature = "std")]
    #[test]
    fn file_sink_appends_to_existing_file() {
        let path = std::env::temp_dir().join(std::format!("noughts-sink-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let mut sink = FileSink::new(&path, CellLabels::default());

        sink.append(&snapshot()).unwrap();
        sink.append(&snapshot()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(text, "0 1 \n2 0 \n\n0 1 \n2 0 \n\n");
    }

    #[test]
    fn labels_with_whitespace_are_rejected() {
        assert_eq!(
            CellLabels::new("tile 0", "tile 1", "tile 2"),
            Err(GameError::InvalidLabels)
        );
        assert_eq!(
            CellLabels::new("0", "1\t", "2"),
            Err(GameError::InvalidLabels)
        );
    }

    #[test]
    fn empty_labels_are_rejected() {
        assert_eq!(CellLabels::new("", "X", "O"), Err(GameError::InvalidLabels));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        assert_eq!(CellLabels::new("-", "X", "X"), Err(GameError::InvalidLabels));
        assert_eq!(CellLabels::new("X", "X", "O"), Err(GameError::InvalidLabels));
        assert_eq!(CellLabels::new("O", "X", "O"), Err(GameError::InvalidLabels));
    }

    #[test]
    fn deserialized_labels_are_validated() {
        let labels: CellLabels =
            serde_json::from_str(r#"{"empty": ".", "player1": "X", "player2": "O"}"#).unwrap();
        assert_eq!(labels.label(Cell::Player1), "X");

        let bad = serde_json::from_str::<CellLabels>(
            r#"{"empty": ".", "player1": "X", "player2": "X"}"#,
        );
        assert!(bad.is_err());
    }
}
