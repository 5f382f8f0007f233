use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything the game knows about one board: the mine layout plus what the player has revealed and flagged.
///
/// All grids share the layout's shape and are only ever rebuilt together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    layout: MineLayout,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
}

impl BoardState {
    pub fn new(layout: MineLayout) -> Self {
        let shape = grid_shape(layout.size());
        Self {
            layout,
            revealed: Array2::default(shape),
            flagged: Array2::default(shape),
        }
    }

    /// A board without mines where nothing is revealed, shown before the first click.
    pub fn blank(size: Coord2) -> Self {
        Self::new(MineLayout::empty(size))
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.layout.contains_mine(coords)
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.flagged[coords.to_nd_index()]
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed
            .iter()
            .filter(|&&open| open)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Flips the flag on a cell. Flags on revealed cells are kept but never shown.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.layout.validate_coords(coords)?;
        let flag = &mut self.flagged[coords.to_nd_index()];
        *flag = !*flag;
        Ok(())
    }

    /// Opens a cell the player clicked.
    ///
    /// Flagged cells refuse to open. Opening a mine exposes every mine on the board. Opening a safe cell spreads
    /// through zero cells and then checks whether the board is cleared.
    pub fn open(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;

        if self.is_flagged(coords) || self.is_revealed(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        if self.layout.contains_mine(coords) {
            self.reveal_all_mines();
            return Ok(RevealOutcome::HitMine);
        }

        self.revealed[coords.to_nd_index()] = true;
        flood_reveal(&self.layout, &mut self.revealed, coords);

        Ok(if self.is_won() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    pub fn reveal_all_mines(&mut self) {
        let Self {
            layout, revealed, ..
        } = self;
        for coords in layout.iter_mines() {
            revealed[coords.to_nd_index()] = true;
        }
    }

    /// Won when no cell has `revealed == mine`: every safe cell open and every mine still covered.
    pub fn is_won(&self) -> bool {
        self.revealed
            .iter()
            .zip(self.layout.mine_mask().iter())
            .all(|(&revealed, &mine)| revealed != mine)
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        match (self.is_revealed(coords), self.is_flagged(coords)) {
            (false, false) => Tile::Hidden,
            (false, true) => Tile::Flagged,
            (true, _) if self.has_mine_at(coords) => Tile::Mine,
            (true, _) => Tile::Count(self.layout.adjacent_mine_count(coords)),
        }
    }

    /// Projects the board onto the tiles the renderer draws.
    pub fn tiles(&self) -> TileGrid {
        let mut tiles = TileGrid::default(self.revealed.dim());
        for coords in iter_coords(self.size()) {
            tiles[coords.to_nd_index()] = self.tile_at(coords);
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> BoardState {
        BoardState::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn blank_board_is_all_hidden() {
        let board = BoardState::blank((10, 8));

        assert_eq!(board.size(), (10, 8));
        assert!(board.tiles().iter().all(|&tile| tile == Tile::Hidden));
    }

    #[test]
    fn opening_a_zero_cell_on_an_empty_board_wins() {
        let mut board = BoardState::blank((1, 3));

        assert_eq!(board.open((0, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(board.revealed_count(), 3);
        assert!(board.is_won());
    }

    #[test]
    fn opening_a_mine_reveals_every_mine() {
        let mines = [(0, 0), (3, 3), (2, 1)];
        let mut board = board((4, 4), &mines);

        assert_eq!(board.open((3, 3)).unwrap(), RevealOutcome::HitMine);
        for coords in mines {
            assert_eq!(board.tile_at(coords), Tile::Mine);
        }
        assert_eq!(board.revealed_count(), 3);
        assert!(!board.is_won());
    }

    #[test]
    fn flagged_cells_refuse_to_open() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.toggle_flag((0, 0)), Ok(()));
        assert_eq!(board.open((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.tile_at((0, 0)), Tile::Flagged);
        assert_eq!(board.revealed_count(), 0);

        board.toggle_flag((0, 0)).unwrap();
        assert_eq!(board.open((0, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(board.tile_at((0, 0)), Tile::Count(0));
    }

    #[test]
    fn flagged_mine_is_not_triggered() {
        let mut board = board((2, 1), &[(0, 0)]);

        board.toggle_flag((0, 0)).unwrap();

        assert_eq!(board.open((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert!(!board.is_revealed((0, 0)));
    }

    #[test]
    fn win_requires_every_safe_cell_and_no_mine_revealed() {
        let mut board = board((3, 1), &[(0, 0)]);
        assert!(!board.is_won());

        assert_eq!(board.open((1, 0)).unwrap(), RevealOutcome::Revealed);
        assert!(!board.is_won());

        assert_eq!(board.open((2, 0)).unwrap(), RevealOutcome::Won);
        assert!(board.is_won());

        board.reveal_all_mines();
        assert!(!board.is_won());
    }

    #[test]
    fn projection_covers_every_tile_kind() {
        let mut board = board((3, 3), &[(0, 0)]);

        board.open((2, 2)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        assert_eq!(board.tile_at((0, 0)), Tile::Flagged);
        assert_eq!(board.tile_at((1, 1)), Tile::Count(1));
        assert_eq!(board.tile_at((2, 2)), Tile::Count(0));

        board.reveal_all_mines();
        let tiles = board.tiles();
        assert_eq!(tiles[(0, 0).to_nd_index()], Tile::Mine);
        assert_eq!(tiles.grid_size(), (3, 3));
    }

    #[test]
    fn projection_keeps_unrevealed_cells_hidden() {
        let mut board = board((4, 1), &[(3, 0)]);

        board.open((2, 0)).unwrap();

        let tiles = board.tiles();
        assert_eq!(tiles.as_slice().unwrap(), &[Tile::Hidden, Tile::Hidden, Tile::Count(1), Tile::Hidden]);
    }

    #[test]
    fn out_of_bounds_coords_are_rejected() {
        let mut board = BoardState::blank((2, 2));

        assert_eq!(board.open((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 5)), Err(GameError::InvalidCoords));
    }
}
