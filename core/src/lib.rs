#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use io::*;
pub use render::*;
pub use reveal::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod io;
mod render;
mod reveal;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// The classic small board the game ships with.
    pub const DEFAULT: Self = Self::new_unchecked((10, 8), 10);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Mines that fit for every possible first click, i.e. outside the largest safe zone this board can have.
    pub fn max_mines(&self) -> CellCount {
        let (width, height) = self.size;
        self.total_cells() - mult(width.min(3), height.min(3))
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_cells() == 0 {
            return Err(GameError::EmptyBoard);
        }

        let available = self.max_mines();
        if self.mines > available {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                available,
            });
        }

        Ok(())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Mine placement together with the adjacency counts derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacency: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    /// A layout without any mines.
    pub fn empty(size: Coord2) -> Self {
        Self::from_mine_mask(Array2::default(grid_shape(size)))
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);

        let size = mine_mask.grid_size();
        let mut adjacency: Array2<u8> = Array2::zeros(mine_mask.dim());
        for coords in iter_coords(size) {
            let count = NeighborIter::new(coords, size)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count();
            // at most 8 neighbors
            adjacency[coords.to_nd_index()] = count as u8;
        }

        Self {
            mine_mask,
            adjacency,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(grid_shape(size));

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        self.mine_mask.grid_size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines among the in-bounds neighbors. Not meaningful for a cell that is itself a mine.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacency[coords.to_nd_index()]
    }

    pub fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default(), GameConfig::new((10, 8), 10).unwrap());
        assert_eq!(GameConfig::DEFAULT.total_cells(), 80);
    }

    #[test]
    fn config_rejects_mines_that_cannot_avoid_the_safe_zone() {
        assert_eq!(GameConfig::new((10, 8), 71).unwrap().max_mines(), 71);
        assert_eq!(
            GameConfig::new((10, 8), 72),
            Err(GameError::TooManyMines {
                requested: 72,
                available: 71
            })
        );
        assert_eq!(GameConfig::new((0, 8), 0), Err(GameError::EmptyBoard));
    }

    #[test]
    fn narrow_boards_use_the_clipped_safe_zone() {
        assert!(GameConfig::new((1, 3), 0).is_ok());
        assert_eq!(
            GameConfig::new((1, 3), 1),
            Err(GameError::TooManyMines {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(GameConfig::new((2, 5), 4).unwrap().max_mines(), 4);
    }

    #[test]
    fn adjacency_counts_in_bounds_neighbors_only() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 0);
    }

    #[test]
    fn mine_coords_outside_the_board_are_rejected() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
