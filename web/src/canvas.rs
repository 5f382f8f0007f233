use pixelmines_core::{Coord, Coord2, PixelBuffer};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, DomRect, HtmlCanvasElement, ImageData};

/// Fraction of the container the display may cover.
const FILL: f64 = 0.9;

/// On-screen rectangle of the canvas, in client coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<DomRect> for Bounds {
    fn from(rect: DomRect) -> Self {
        Self {
            x: rect.x(),
            y: rect.y(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// Maps a client position onto the tile drawn under it, or `None` outside the board.
pub(crate) fn tile_at((client_x, client_y): (f64, f64), bounds: Bounds, size: Coord2) -> Option<Coord2> {
    fn axis(offset: f64, extent: f64, tiles: Coord) -> Option<Coord> {
        if extent <= 0.0 {
            return None;
        }
        let tile = (offset / extent * f64::from(tiles)).floor();
        (tile >= 0.0 && tile < f64::from(tiles)).then_some(tile as Coord)
    }

    Some((
        axis(client_x - bounds.x, bounds.width, size.0)?,
        axis(client_y - bounds.y, bounds.height, size.1)?,
    ))
}

/// CSS scale that fits a `native` sized canvas into `container`, keeping its aspect ratio.
pub(crate) fn display_scale(container: (f64, f64), native: (u32, u32)) -> f64 {
    let (width, height) = (f64::from(native.0), f64::from(native.1));
    if width == 0.0 || height == 0.0 {
        return 1.0;
    }
    let scale = (container.0 / width).min(container.1 / height) * FILL;
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Copies an RGB frame onto the canvas, resizing its backing store when needed.
pub(crate) fn present(canvas: &HtmlCanvasElement, frame: &PixelBuffer) -> Result<(), JsValue> {
    if canvas.width() != frame.width() || canvas.height() != frame.height() {
        canvas.set_width(frame.width());
        canvas.set_height(frame.height());
    }

    let ctx = context_2d(canvas)?;
    ctx.set_image_smoothing_enabled(false);
    let rgba = frame.to_rgba();
    let image_data = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(rgba.as_slice()),
        frame.width(),
        frame.height(),
    )?;
    ctx.put_image_data(&image_data, 0.0, 0.0)
}
