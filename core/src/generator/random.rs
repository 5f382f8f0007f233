use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random placement that keeps the first click and its neighbors free of mines.
///
/// Candidates are drawn uniformly over the whole board and rejected when already mined or inside the safe zone.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinefieldGenerator for RandomLayoutGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> Result<MineLayout> {
        let safe = config.validate_coords(safe)?;
        let available = available_cells(config.size, safe);
        if config.mines > available {
            return Err(GameError::TooManyMines {
                requested: config.mines,
                available,
            });
        }

        log::debug!(
            "generating {} mines on {:?} around {:?} (seed {})",
            config.mines,
            config.size,
            safe,
            self.seed
        );

        let (width, height) = config.size;
        let mut mines: Array2<bool> = Array2::default(grid_shape(config.size));
        let mut mines_placed = 0;
        let mut draws: u32 = 0;

        while mines_placed < config.mines {
            let coords = (self.rng.random_range(0..width), self.rng.random_range(0..height));
            draws += 1;

            let tile = &mut mines[coords.to_nd_index()];
            if *tile || is_within_one(coords, safe) {
                continue;
            }
            *tile = true;
            mines_placed += 1;
        }

        log::trace!("placed {} mines in {} draws", mines_placed, draws);
        Ok(MineLayout::from_mine_mask(mines))
    }
}
