use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Player-visible classification of a cell, as handed to the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Revealed safe cell showing its adjacent mine count.
    Count(u8),
    /// Revealed mine.
    Mine,
    Flagged,
    Hidden,
}

impl Tile {
    /// Number of distinct sprites a sprite sheet has to provide.
    pub const SPRITE_COUNT: u8 = 12;

    /// Position of this tile's sprite in the sheet.
    pub const fn sprite_index(self) -> u8 {
        match self {
            Self::Count(count) => count,
            Self::Mine => 9,
            Self::Flagged => 10,
            Self::Hidden => 11,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Tile identities of a whole board, shaped like the state grids.
pub type TileGrid = Array2<Tile>;
