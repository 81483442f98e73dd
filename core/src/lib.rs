#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

use serde::{Deserialize, Serialize};

pub use accumulators::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use history::*;
pub use replay::*;
pub use types::*;

mod accumulators;
mod cell;
mod engine;
mod error;
mod history;
mod replay;
mod types;

/// Board size used when nothing else is configured.
pub const DEFAULT_SIZE: Coord = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    size: Coord,
}

#[derive(Deserialize)]
struct RawGameConfig {
    size: Coord,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.size)
    }
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord) -> Self {
        Self { size }
    }

    pub fn new(size: Coord) -> Result<Self> {
        if size < 1 {
            log::warn!("Rejected board size {}", size);
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self::new_unchecked(size))
    }

    /// Parses a config such as `{"size": 4}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            log::warn!("Invalid game config: {}", err);
            GameError::InvalidConfiguration
        })
    }

    pub const fn size(&self) -> Coord {
        self.size
    }

    pub const fn total_cells(&self) -> usize {
        self.size as usize * self.size as usize
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE)
    }
}
