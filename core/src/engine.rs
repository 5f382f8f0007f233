use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

impl GameOutcome {
    pub const fn message(self) -> StatusMessage {
        match self {
            Self::Won => StatusMessage::Won,
            Self::Lost => StatusMessage::Lost,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Assets are still loading, all input is ignored.
    Loading,
    /// Blank board shown, the next primary click generates the mines.
    AwaitingFirstInput,
    Playing,
    Ended(GameOutcome),
}

impl Default for GameState {
    fn default() -> Self {
        Self::Loading
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    /// Reveals a tile.
    Primary,
    /// Toggles a flag.
    Secondary,
}

/// A click already mapped onto an in-bounds tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileClick {
    pub pos: Coord2,
    pub button: Button,
}

impl TileClick {
    pub const fn primary(pos: Coord2) -> Self {
        Self {
            pos,
            button: Button::Primary,
        }
    }

    pub const fn secondary(pos: Coord2) -> Self {
        Self {
            pos,
            button: Button::Secondary,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Everything needed to draw is available.
    AssetsLoaded,
    Click(TileClick),
}

/// Work the caller has to carry out after a transition, in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Render,
    SetMessage(StatusMessage),
}

pub type Effects = SmallVec<[Effect; 2]>;

/// Owns the board and drives it through the game's states.
#[derive(Clone, Debug)]
pub struct PlayEngine<G> {
    config: GameConfig,
    generator: G,
    board: BoardState,
    state: GameState,
}

impl<G: MinefieldGenerator> PlayEngine<G> {
    pub fn new(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            board: BoardState::blank(config.size),
            state: GameState::default(),
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn tiles(&self) -> TileGrid {
        self.board.tiles()
    }

    /// Applies one event, returning the effects it calls for.
    pub fn dispatch(&mut self, event: GameEvent) -> Result<Effects> {
        use Button::*;
        use GameEvent::*;
        use GameState::*;

        let effects = match (self.state, event) {
            (Loading, AssetsLoaded) => self.bootstrap(),
            (Loading, Click(_)) | (_, AssetsLoaded) => {
                log::debug!("ignoring {:?} while {:?}", event, self.state);
                Effects::new()
            }
            (AwaitingFirstInput, Click(TileClick { pos, button: Primary })) => {
                self.start_game(pos)?
            }
            (Ended(_), Click(TileClick { pos, button: Primary })) => {
                let mut effects: Effects = smallvec![Effect::SetMessage(StatusMessage::Title)];
                effects.extend(self.start_game(pos)?);
                effects
            }
            (AwaitingFirstInput | Ended(_), Click(TileClick { button: Secondary, .. })) => {
                Effects::new()
            }
            (Playing, Click(TileClick { pos, button: Primary })) => {
                let outcome = self.board.open(pos)?;
                self.after_reveal(outcome)
            }
            (Playing, Click(TileClick { pos, button: Secondary })) => {
                self.board.toggle_flag(pos)?;
                smallvec![Effect::Render]
            }
        };

        Ok(effects)
    }

    /// Dispatches `event` and carries out its effects.
    pub fn handle(
        &mut self,
        event: GameEvent,
        renderer: &mut impl Renderer,
        status: &mut impl StatusDisplay,
    ) -> Result<GameState> {
        for effect in self.dispatch(event)? {
            match effect {
                Effect::Render => renderer.render(&self.board.tiles()),
                Effect::SetMessage(message) => status.set_message(message),
            }
        }
        Ok(self.state)
    }

    fn bootstrap(&mut self) -> Effects {
        log::debug!("bootstrap, waiting for first click");
        self.board = BoardState::blank(self.config.size);
        self.state = GameState::AwaitingFirstInput;
        smallvec![Effect::Render, Effect::SetMessage(StatusMessage::Title)]
    }

    fn start_game(&mut self, pos: Coord2) -> Result<Effects> {
        let pos = self.config.validate_coords(pos)?;
        let layout = self.generator.generate(self.config, pos)?;
        self.board = BoardState::new(layout);
        self.state = GameState::Playing;
        log::debug!("new game started at {:?}", pos);

        let outcome = self.board.open(pos)?;
        Ok(self.after_reveal(outcome))
    }

    fn after_reveal(&mut self, outcome: RevealOutcome) -> Effects {
        let ended = match outcome {
            RevealOutcome::NoChange | RevealOutcome::Revealed => None,
            RevealOutcome::HitMine => Some(GameOutcome::Lost),
            RevealOutcome::Won => Some(GameOutcome::Won),
        };

        match ended {
            Some(result) => {
                log::debug!("game ended: {:?}", result);
                self.state = GameState::Ended(result);
                smallvec![Effect::Render, Effect::SetMessage(result.message())]
            }
            None => smallvec![Effect::Render],
        }
    }
}
