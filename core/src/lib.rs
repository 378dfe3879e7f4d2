#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use connect::*;
pub use countdown::*;
pub use error::*;
pub use generator::*;
pub use path::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod board;
mod connect;
mod countdown;
mod error;
mod generator;
mod path;
mod session;
mod tile;
mod types;

/// Shape of a round: playable interior size, number of distinct tile kinds, and whether the interior is wrapped in a
/// permanently empty ring that paths may route through.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord2,
    pub kinds: u8,
    pub border: bool,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, kinds: u8, border: bool) -> Self {
        Self {
            size,
            kinds,
            border,
        }
    }

    pub fn new((rows, cols): Coord2, kinds: u8, border: bool) -> Self {
        let max = Self::max_side(border);
        let rows = rows.clamp(1, max);
        let cols = cols.clamp(1, max);
        // a single cell cannot hold a pair
        let cols = if mult(rows, cols) < 2 { 2 } else { cols };
        let kinds = kinds.clamp(1, MAX_KINDS);
        Self::new_unchecked((rows, cols), kinds, border)
    }

    pub const fn small() -> Self {
        Self::new_unchecked((6, 8), 4, true)
    }

    pub const fn classic() -> Self {
        Self::new_unchecked((10, 16), 8, true)
    }

    pub const fn large() -> Self {
        Self::new_unchecked((14, 20), 12, true)
    }

    const fn max_side(border: bool) -> Coord {
        if border { Coord::MAX - 2 } else { Coord::MAX }
    }

    pub const fn interior_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.interior_cells() / 2
    }

    /// Full board dimensions, including the ring when there is one.
    pub const fn board_size(&self) -> Coord2 {
        if self.border {
            (self.size.0 + 2, self.size.1 + 2)
        } else {
            self.size
        }
    }

    pub fn validate(&self) -> Result<()> {
        let max = Self::max_side(self.border);
        let (rows, cols) = self.size;
        let sides_fit = (1..=max).contains(&rows) && (1..=max).contains(&cols);
        if !sides_fit || self.interior_cells() < 2 || !(1..=MAX_KINDS).contains(&self.kinds) {
            return Err(GameError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}
