use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    /// Lays out `config.mines` mines, keeping the 3x3 block around `safe` clear.
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Result<MineLayout>;
}

/// Cells that may hold a mine when the first click lands on `safe`.
pub fn available_cells(size: Coord2, safe: Coord2) -> CellCount {
    let span = |center: Coord, len: Coord| {
        let lo = center.saturating_sub(1);
        let hi = center.saturating_add(1).min(len.saturating_sub(1));
        hi - lo + 1
    };
    mult(size.0, size.1) - mult(span(safe.0, size.0), span(safe.1, size.1))
}
