use iced::keyboard::{key::Named, Key};
use log::{debug, info, warn};

use crate::{
    app::Message,
    models::snake::snake_game::{
        Direction, GameMode, SnakeError, SnakeGame, SnakeSnapshot, TickOutcome,
        DEFAULT_BOARD_SIZE, MILLIS_BETWEEN_FRAMES,
    },
    view_model::ViewModel,
    views::snake::snake_game_screen::SnakeGameMessage,
};

#[derive(Clone, Debug)]
pub struct SnakeParams {
    pub mode: GameMode,
    pub grid_size: usize,
}

impl SnakeParams {
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            grid_size: DEFAULT_BOARD_SIZE,
        }
    }
}

/// Owns the running session of the game screen.
#[derive(Debug)]
pub struct SnakeViewModel {
    params: SnakeParams,
    game: SnakeGame,
    hue: u16,
    flashing: bool,
    /// Bumped on every crash so a late flash timer cannot clear a newer flash.
    flash_id: u64,
}

impl SnakeViewModel {
    /// Creates a new view model and starts a session with the given parameters.
    ///
    /// # Errors
    ///
    /// If the parameters are invalid and a [`SnakeGame`] cannot
    /// be created, returns a [`SnakeError`].
    pub fn new(params: SnakeParams) -> Result<Self, SnakeError> {
        debug!("New SnakeViewModel params: {:#?}", params);
        let mut game = SnakeGame::new(params.grid_size)?;
        game.start(params.mode);
        Ok(Self::with_game(params, game))
    }

    /// Wraps an already prepared session.
    #[must_use]
    pub fn with_game(params: SnakeParams, game: SnakeGame) -> Self {
        Self {
            params,
            game,
            hue: 0,
            flashing: false,
            flash_id: 0,
        }
    }

    /// Maps a key press to the snake it steers and the requested direction.
    ///
    /// Arrows steer the first snake. WASD steers the second one, so it is
    /// ignored in solo games.
    #[must_use]
    pub fn key_to_move(mode: GameMode, key: &Key) -> Option<(usize, Direction)> {
        match key {
            Key::Named(code) => match code {
                Named::ArrowUp => Some((0, Direction::Up)),
                Named::ArrowDown => Some((0, Direction::Down)),
                Named::ArrowLeft => Some((0, Direction::Left)),
                Named::ArrowRight => Some((0, Direction::Right)),
                _ => None,
            },
            Key::Character(c) if mode == GameMode::Multi => match c.as_str() {
                "w" | "W" => Some((1, Direction::Up)),
                "s" | "S" => Some((1, Direction::Down)),
                "a" | "A" => Some((1, Direction::Left)),
                "d" | "D" => Some((1, Direction::Right)),
                _ => None,
            },
            Key::Character(_) | Key::Unidentified => None,
        }
    }

    fn on_tick(&mut self) -> Option<Message> {
        if !self.game.is_running() {
            return None;
        }
        let outcome = self.game.advance();
        self.hue = (self.hue + 1) % 360;
        match outcome {
            TickOutcome::Crashed {
                player_id,
                collision,
            } => {
                info!("Snake {player_id} crashed into {collision:?}");
                self.flashing = true;
                self.flash_id += 1;
                Some(Message::Game(SnakeGameMessage::Crashed(self.flash_id)))
            }
            TickOutcome::Moved { fed } => {
                if !fed.is_empty() {
                    debug!("Snakes {:?} ate this tick", fed);
                }
                None
            }
            TickOutcome::Halted => None,
        }
    }

    #[must_use]
    pub fn get_params(&self) -> SnakeParams {
        self.params.clone()
    }

    #[must_use]
    pub fn get_game_ref(&self) -> &SnakeGame {
        &self.game
    }

    #[must_use]
    pub fn snapshot(&self) -> SnakeSnapshot {
        self.game.snapshot()
    }

    #[must_use]
    pub fn get_mode(&self) -> GameMode {
        self.game.get_mode()
    }

    #[must_use]
    pub fn get_hue(&self) -> u16 {
        self.hue
    }

    #[must_use]
    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.game.is_game_over()
    }

    #[must_use]
    pub fn get_time_between_frames(&self) -> u64 {
        MILLIS_BETWEEN_FRAMES
    }
}

impl ViewModel for SnakeViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        let Message::Game(snake_game_message) = message else {
            warn!("Non-game message sent to SnakeViewModel: {:#?}", message);
            return None;
        };
        match snake_game_message {
            SnakeGameMessage::Key(key) => {
                if self.game_over() {
                    if matches!(key, Key::Named(Named::Space)) {
                        return Some(Message::Game(SnakeGameMessage::Reset));
                    }
                    return None;
                }
                if let Some((player, direction)) = Self::key_to_move(self.get_mode(), &key) {
                    if !self.game.push_direction(player, direction) {
                        debug!("Dropped {direction:?} for snake {player}");
                    }
                }
                None
            }
            SnakeGameMessage::Timer(_) => self.on_tick(),
            SnakeGameMessage::Reset => {
                debug!("Reset requested");
                self.game.restart();
                self.flashing = false;
                None
            }
            SnakeGameMessage::FlashElapsed(flash_id) => {
                if flash_id == self.flash_id {
                    self.flashing = false;
                } else {
                    debug!("Ignoring stale flash {flash_id}, current is {}", self.flash_id);
                }
                None
            }
            // raised by this view model and handled by the app
            SnakeGameMessage::Crashed(_) => None,
        }
    }
}
