use clap::Args;
use gloo::events::EventListener;
use gloo::utils::{document, window};
use pixelmines_core::{
    Button, Coord2, GameConfig, GameEvent, PlayEngine, RandomLayoutGenerator, SpriteRenderer,
    SpriteSheet, StatusDisplay, StatusMessage, TILE_SIZE, TileClick,
};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::assets::{AssetError, SPRITE_SHEET_SRC, load_sprite_sheet};
use crate::canvas::{Bounds, display_scale, present, tile_at};

/// Helper function to use JavaScript's Math.random
fn js_random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    for byte in &mut bytes {
        *byte = (256. * js_sys::Math::random()) as u8;
    }
    u64::from_be_bytes(bytes)
}

/// Text shown above the board.
#[derive(Clone, Debug, Default, PartialEq)]
struct StatusLine(String);

impl StatusDisplay for StatusLine {
    fn set_message(&mut self, message: StatusMessage) {
        log::debug!("status: {}", message);
        self.0 = message.to_string();
    }
}

pub(crate) enum Msg {
    AssetsLoaded(Result<SpriteSheet, AssetError>),
    Click(TileClick),
    Resize,
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    seed: Option<u64>,
}

pub(crate) struct GameView {
    engine: PlayEngine<RandomLayoutGenerator>,
    renderer: Option<SpriteRenderer>,
    status: StatusLine,
    canvas: NodeRef,
    scale: f64,
    _resize_listener: EventListener,
}

impl GameView {
    const CONTAINER_ID: &'static str = "game";

    /// Native canvas size in pixels.
    fn native_size(&self) -> (u32, u32) {
        let (width, height) = self.engine.config().size;
        (u32::from(width) * TILE_SIZE, u32::from(height) * TILE_SIZE)
    }

    fn fit_scale(&self) -> f64 {
        let container = document()
            .get_element_by_id(Self::CONTAINER_ID)
            .map(|el| (f64::from(el.client_width()), f64::from(el.client_height())));
        match container {
            Some(container) => display_scale(container, self.native_size()),
            None => 1.0,
        }
    }

    /// Feeds an event to the engine. Returns whether the view needs an update.
    fn handle(&mut self, event: GameEvent) -> bool {
        let Some(renderer) = self.renderer.as_mut() else {
            log::trace!("no sprites yet, ignoring {:?}", event);
            return false;
        };

        match self.engine.handle(event, renderer, &mut self.status) {
            Ok(state) => {
                log::debug!("{:?} -> {:?}", event, state);
                true
            }
            Err(err) => {
                log::warn!("could not handle {:?}: {}", event, err);
                false
            }
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);
        let engine = PlayEngine::new(GameConfig::DEFAULT, RandomLayoutGenerator::new(seed))
            .expect("default config must be valid");

        ctx.link()
            .send_future(async { Msg::AssetsLoaded(load_sprite_sheet(SPRITE_SHEET_SRC).await) });

        let resize_listener = {
            let link = ctx.link().clone();
            EventListener::new(&window(), "resize", move |_| link.send_message(Msg::Resize))
        };

        let mut view = Self {
            engine,
            renderer: None,
            status: StatusLine::default(),
            canvas: NodeRef::default(),
            scale: 1.0,
            _resize_listener: resize_listener,
        };
        view.scale = view.fit_scale();
        view
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            AssetsLoaded(Ok(sheet)) => {
                self.renderer = Some(SpriteRenderer::new(sheet, self.engine.config().size));
                self.handle(GameEvent::AssetsLoaded)
            }
            AssetsLoaded(Err(err)) => {
                log::error!("failed to load assets: {}", err);
                self.status.0 = err.to_string();
                true
            }
            Click(click) => self.handle(GameEvent::Click(click)),
            Resize => {
                let scale = self.fit_scale();
                if scale != self.scale {
                    self.scale = scale;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        let (Some(canvas), Some(renderer)) =
            (self.canvas.cast::<HtmlCanvasElement>(), self.renderer.as_ref())
        else {
            return;
        };

        if let Err(err) = present(&canvas, renderer.frame()) {
            log::error!("failed to draw frame: {:?}", err);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (width, height) = self.native_size();
        let size: Coord2 = self.engine.config().size;
        let style = format!(
            "display: block; image-rendering: pixelated; width: {}px; height: {}px;",
            f64::from(width) * self.scale,
            f64::from(height) * self.scale,
        );

        let onmousedown = {
            let canvas = self.canvas.clone();
            ctx.link().batch_callback(move |e: MouseEvent| {
                let canvas = canvas.cast::<HtmlCanvasElement>()?;
                let bounds = Bounds::from(canvas.get_bounding_client_rect());
                let client = (f64::from(e.client_x()), f64::from(e.client_y()));
                let pos = tile_at(client, bounds, size)?;
                let button = match e.button() {
                    0 => Button::Primary,
                    _ => Button::Secondary,
                };
                log::trace!("{:?} mouse down ({})", pos, e.button());
                Some(Msg::Click(TileClick { pos, button }))
            })
        };

        html! {
            <div class="pixelmines" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <header id="topBar">{ self.status.0.clone() }</header>
                <canvas
                    ref={self.canvas.clone()}
                    width={width.to_string()}
                    height={height.to_string()}
                    {style}
                    {onmousedown}
                />
            </div>
        }
    }
}
