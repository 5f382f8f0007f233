use alloc::vec;
use alloc::vec::Vec;

use crate::*;

/// Edge length in pixels of one tile sprite.
pub const TILE_SIZE: u32 = 8;

pub type Rgb = [u8; 3];

/// Packed RGB image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Drops the alpha channel of RGBA data such as canvas `ImageData`.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(GameError::InvalidPixelData);
        }

        let data = rgba
            .chunks_exact(4)
            .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Opaque RGBA copy, ready for `ImageData`.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.data
            .chunks_exact(3)
            .flat_map(|pixel| [pixel[0], pixel[1], pixel[2], u8::MAX])
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (x as usize + y as usize * self.width as usize) * 3)
    }

    /// Pixel at `(x, y)`, black when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        match self.offset(x, y) {
            Some(i) => [self.data[i], self.data[i + 1], self.data[i + 2]],
            None => [0; 3],
        }
    }

    /// Writes a pixel, ignoring out-of-bounds positions.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 3].copy_from_slice(&color);
        }
    }

    /// Copies a `size`x`size` block from `src` at `from` into `self` at `to`. Both blocks must be in bounds.
    fn blit_square(&mut self, to: (u32, u32), src: &PixelBuffer, from: (u32, u32), size: u32) {
        let row_len = size as usize * 3;
        for row in 0..size {
            let (Some(dst), Some(src_at)) = (self.offset(to.0, to.1 + row), src.offset(from.0, from.1 + row))
            else {
                continue;
            };
            self.data[dst..dst + row_len].copy_from_slice(&src.data[src_at..src_at + row_len]);
        }
    }
}

/// A strip of tile sprites laid out left to right, indexed by [`Tile::sprite_index`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    pixels: PixelBuffer,
    tile_size: u32,
}

impl SpriteSheet {
    pub fn new(pixels: PixelBuffer, tile_size: u32) -> Result<Self> {
        if tile_size == 0
            || pixels.width() < u32::from(Tile::SPRITE_COUNT) * tile_size
            || pixels.height() < tile_size
        {
            return Err(GameError::InvalidSpriteSheet);
        }
        Ok(Self { pixels, tile_size })
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }
}

/// Draws boards into an RGB frame by copying one sprite per tile.
#[derive(Clone, Debug)]
pub struct SpriteRenderer {
    sheet: SpriteSheet,
    frame: PixelBuffer,
}

impl SpriteRenderer {
    pub fn new(sheet: SpriteSheet, board_size: Coord2) -> Self {
        let frame = Self::blank_frame(&sheet, board_size);
        Self { sheet, frame }
    }

    fn blank_frame(sheet: &SpriteSheet, (width, height): Coord2) -> PixelBuffer {
        let tile_size = sheet.tile_size();
        PixelBuffer::new(u32::from(width) * tile_size, u32::from(height) * tile_size)
    }

    /// The last drawn frame.
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }
}

impl Renderer for SpriteRenderer {
    fn render(&mut self, tiles: &TileGrid) {
        let size = tiles.grid_size();
        let tile_size = self.sheet.tile_size();
        if self.frame.width() != u32::from(size.0) * tile_size
            || self.frame.height() != u32::from(size.1) * tile_size
        {
            self.frame = Self::blank_frame(&self.sheet, size);
        }

        for coords in iter_coords(size) {
            let sprite = u32::from(tiles[coords.to_nd_index()].sprite_index());
            self.frame.blit_square(
                (u32::from(coords.0) * tile_size, u32::from(coords.1) * tile_size),
                self.sheet.pixels(),
                (sprite * tile_size, 0),
                tile_size,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2px sprites where every pixel of sprite `n` is `[n, 2n, 255]`.
    fn test_sheet() -> SpriteSheet {
        let count = u32::from(Tile::SPRITE_COUNT);
        let mut pixels = PixelBuffer::new(count * 2, 2);
        for x in 0..count * 2 {
            for y in 0..2 {
                let n = (x / 2) as u8;
                pixels.set(x, y, [n, n * 2, 255]);
            }
        }
        SpriteSheet::new(pixels, 2).unwrap()
    }

    #[test]
    fn out_of_bounds_access_is_harmless() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.set(5, 0, [1, 2, 3]);
        buffer.set(1, 1, [7, 8, 9]);

        assert_eq!(buffer.get(5, 0), [0, 0, 0]);
        assert_eq!(buffer.get(1, 1), [7, 8, 9]);
        assert_eq!(buffer.as_bytes()[9..], [7, 8, 9]);
    }

    #[test]
    fn rgba_conversion_drops_and_restores_alpha() {
        let rgba = [1, 2, 3, 40, 4, 5, 6, 50];
        let buffer = PixelBuffer::from_rgba(2, 1, &rgba).unwrap();

        assert_eq!(buffer.as_bytes(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(buffer.to_rgba(), [1, 2, 3, 255, 4, 5, 6, 255]);
        assert_eq!(
            PixelBuffer::from_rgba(3, 1, &rgba),
            Err(GameError::InvalidPixelData)
        );
    }

    #[test]
    fn sprite_sheet_must_hold_every_tile() {
        assert_eq!(
            SpriteSheet::new(PixelBuffer::new(11 * 8, 8), 8),
            Err(GameError::InvalidSpriteSheet)
        );
        assert_eq!(
            SpriteSheet::new(PixelBuffer::new(12 * 8, 7), 8),
            Err(GameError::InvalidSpriteSheet)
        );
        assert!(SpriteSheet::new(PixelBuffer::new(12 * 8, 8), 8).is_ok());
    }

    #[test]
    fn renders_one_sprite_per_tile() {
        let mut board = BoardState::new(MineLayout::from_mine_coords((3, 2), &[(2, 1)]).unwrap());
        board.open((1, 1)).unwrap();
        board.toggle_flag((0, 0)).unwrap();
        let mut renderer = SpriteRenderer::new(test_sheet(), (3, 2));

        renderer.render(&board.tiles());

        let frame = renderer.frame();
        assert_eq!((frame.width(), frame.height()), (6, 4));
        // flagged (0, 0), hidden (2, 0), revealed one at (1, 1)
        assert_eq!(frame.get(0, 0), [10, 20, 255]);
        assert_eq!(frame.get(1, 1), [10, 20, 255]);
        assert_eq!(frame.get(4, 0), [11, 22, 255]);
        assert_eq!(frame.get(2, 2), [1, 2, 255]);
        assert_eq!(frame.get(3, 3), [1, 2, 255]);
    }

    #[test]
    fn rendering_is_idempotent() {
        let board = BoardState::blank((4, 4));
        let mut renderer = SpriteRenderer::new(test_sheet(), (4, 4));

        renderer.render(&board.tiles());
        let first = renderer.frame().clone();
        renderer.render(&board.tiles());

        assert_eq!(renderer.frame(), &first);
    }

    #[test]
    fn frame_follows_board_size() {
        let mut renderer = SpriteRenderer::new(test_sheet(), (1, 1));

        renderer.render(&BoardState::blank((5, 3)).tiles());

        assert_eq!((renderer.frame().width(), renderer.frame().height()), (10, 6));
    }
}
