use std::cell::RefCell;
use std::rc::Rc;

use futures_channel::oneshot;
use gloo::events::EventListener;
use gloo::utils::document;
use pixelmines_core::{GameError, PixelBuffer, SpriteSheet, TILE_SIZE};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use crate::canvas::context_2d;

pub(crate) const SPRITE_SHEET_SRC: &str = "spriteSheet.png";

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum AssetError {
    #[error("Could not load {0}")]
    ImageLoad(String),
    #[error("Could not decode image: {0}")]
    Decode(String),
    #[error("Canvas unavailable: {0}")]
    Canvas(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Resolves once the browser has fetched and decoded `src`.
async fn load_image(src: &str) -> Result<HtmlImageElement, AssetError> {
    let image = HtmlImageElement::new().map_err(|err| AssetError::Canvas(describe(err)))?;
    image.set_cross_origin(Some("anonymous"));

    let (sender, receiver) = oneshot::channel();
    let sender = Rc::new(RefCell::new(Some(sender)));
    let notify = move |loaded: bool| {
        let sender = sender.clone();
        move |_: &web_sys::Event| {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(loaded);
            }
        }
    };
    let _on_load = EventListener::once(&image, "load", notify(true));
    let _on_error = EventListener::once(&image, "error", notify(false));

    image.set_src(src);
    match receiver.await {
        Ok(true) => Ok(image),
        _ => Err(AssetError::ImageLoad(src.to_owned())),
    }
}

/// Reads the pixels of a loaded image back through a scratch canvas.
fn decode(image: &HtmlImageElement) -> Result<PixelBuffer, AssetError> {
    let (width, height) = (image.natural_width(), image.natural_height());

    let canvas: HtmlCanvasElement = document()
        .create_element("canvas")
        .map_err(|err| AssetError::Canvas(describe(err)))?
        .dyn_into()
        .map_err(|_| AssetError::Canvas("created element is not a canvas".to_owned()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx = context_2d(&canvas).map_err(|err| AssetError::Canvas(describe(err)))?;
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)
        .map_err(|err| AssetError::Decode(describe(err)))?;
    // fails with a security error when the image is cross-origin without CORS
    let image_data = ctx
        .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
        .map_err(|err| AssetError::Decode(describe(err)))?;

    Ok(PixelBuffer::from_rgba(width, height, &image_data.data().0)?)
}

/// Loads the tile sprites. The game cannot start without them, so there is no retry.
pub(crate) async fn load_sprite_sheet(src: &str) -> Result<SpriteSheet, AssetError> {
    log::debug!("loading sprite sheet from {}", src);
    let image = load_image(src).await?;
    let pixels = decode(&image)?;
    log::debug!("sprite sheet loaded: {}x{}", pixels.width(), pixels.height());
    Ok(SpriteSheet::new(pixels, TILE_SIZE)?)
}
