use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Draws a board. Must be synchronous, and drawing the same tiles twice must give the same picture.
pub trait Renderer {
    fn render(&mut self, tiles: &TileGrid);
}

/// Shows a one-line status message next to the board.
pub trait StatusDisplay {
    fn set_message(&mut self, message: StatusMessage);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusMessage {
    Title,
    Lost,
    Won,
}

impl StatusMessage {
    pub const fn text(self) -> &'static str {
        match self {
            Self::Title => "minesweeper",
            Self::Lost => "you lose!",
            Self::Won => "you win!",
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
