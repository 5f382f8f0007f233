use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one cell")]
    EmptyBoard,
    #[error("Too many mines: requested {requested} but only {available} cells are outside the safe zone")]
    TooManyMines {
        requested: CellCount,
        available: CellCount,
    },
    #[error("Pixel data does not match the image dimensions")]
    InvalidPixelData,
    #[error("Sprite sheet is too small for the tile set")]
    InvalidSpriteSheet,
}

pub type Result<T> = core::result::Result<T, GameError>;
