use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Spreads a reveal outward from `origin` across connected zero cells.
///
/// `origin` is expected to be revealed already; nothing happens unless it has no adjacent mines. Every unrevealed
/// neighbor of a zero cell gets revealed, and only zero cells keep spreading, so the fill stops at the first ring of
/// numbered cells. A cell is pushed at most once because it is marked revealed before it is queued.
pub fn flood_reveal(layout: &MineLayout, revealed: &mut Array2<bool>, origin: Coord2) {
    if layout.adjacent_mine_count(origin) != 0 {
        return;
    }

    let mut to_visit = Vec::from([origin]);
    while let Some(coords) = to_visit.pop() {
        for pos in layout.iter_neighbors(coords) {
            let cell = &mut revealed[pos.to_nd_index()];
            if *cell {
                continue;
            }
            *cell = true;

            if layout.adjacent_mine_count(pos) == 0 {
                to_visit.push(pos);
            }
        }
    }
}
