use std::time::Duration;

use iced::{Element, Subscription, Task};
use log::{debug, error};

use crate::{
    models::snake::snake_game::{GameMode, FLASH_MILLIS},
    view::View,
    view_models::snake::snake_view_model::SnakeParams,
    views::snake::{
        snake_game_screen::{SnakeGameMessage, SnakeGameScreen},
        snake_selection_screen::{SnakeSelectionMessage, SnakeSelectionScreen},
    },
};

// https://docs.rs/iced/latest/i686-unknown-linux-gnu/iced/?search=command#scaling-applications
pub struct State {
    screen: Screen,
}

#[derive(Debug)]
enum Screen {
    Selection(SnakeSelectionScreen),
    Game(SnakeGameScreen),
}

#[derive(Clone, Debug)]
pub enum Message {
    GameScreenTransition(GameMode),
    SelectionScreenTransition,
    Selection(SnakeSelectionMessage),
    Game(SnakeGameMessage),
}

// Implement `View` for `Screen`
impl View for Screen {
    fn update(&mut self, message: Message) -> Option<Message> {
        match self {
            Screen::Selection(screen) => screen.update(message),
            Screen::Game(screen) => screen.update(message),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        match self {
            Screen::Selection(screen) => screen.view(),
            Screen::Game(screen) => screen.view(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        match self {
            Screen::Selection(screen) => screen.subscription(),
            Screen::Game(screen) => screen.subscription(),
        }
    }
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Selection(SnakeSelectionScreen::new()),
        }
    }

    pub fn update(state: &mut State, message: Message) -> Task<Message> {
        let next = match message {
            // transitions are handled here, everything else goes to the screen
            Message::GameScreenTransition(_) | Message::SelectionScreenTransition => Some(message),
            other => state.screen.update(other),
        };
        match next {
            Some(Message::GameScreenTransition(mode)) => {
                debug!("Transitioning to snake game screen");
                match SnakeGameScreen::new(SnakeParams::new(mode)) {
                    Ok(screen) => state.screen = Screen::Game(screen),
                    Err(e) => error!("Could not start a {mode} game: {e}"),
                }
                Task::none()
            }
            Some(Message::SelectionScreenTransition) => {
                debug!("Transitioning to snake selection screen");
                let menu = match &state.screen {
                    Screen::Game(screen) => {
                        SnakeSelectionScreen::with_last_mode(screen.get_view_model().get_mode())
                    }
                    Screen::Selection(_) => SnakeSelectionScreen::new(),
                };
                state.screen = Screen::Selection(menu);
                Task::none()
            }
            Some(Message::Game(SnakeGameMessage::Crashed(flash_id))) => Task::perform(
                tokio::time::sleep(Duration::from_millis(FLASH_MILLIS)),
                move |()| Message::Game(SnakeGameMessage::FlashElapsed(flash_id)),
            ),
            Some(Message::Game(SnakeGameMessage::Reset)) => {
                Task::done(Message::Game(SnakeGameMessage::Reset))
            }
            Some(other) => {
                debug!("Unhandled follow-up message: {:#?}", other);
                Task::none()
            }
            None => Task::none(),
        }
    }

    #[must_use]
    pub fn view(state: &State) -> Element<'_, Message> {
        state.screen.view()
    }

    #[must_use]
    pub fn subscription(state: &State) -> Subscription<Message> {
        state.screen.subscription()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection_opens_game() {
        let mut state = State::new();
        let _ = State::update(
            &mut state,
            Message::Selection(SnakeSelectionMessage::ModeSelected(GameMode::Multi)),
        );
        let Screen::Game(screen) = &state.screen else {
            panic!("expected the game screen");
        };
        assert_eq!(screen.get_view_model().get_mode(), GameMode::Multi);
        assert!(screen.get_view_model().is_running());
    }

    #[test]
    fn test_back_to_menu() {
        let mut state = State::new();
        let _ = State::update(&mut state, Message::GameScreenTransition(GameMode::Solo));
        assert!(matches!(state.screen, Screen::Game(_)));
        let _ = State::update(&mut state, Message::SelectionScreenTransition);
        assert!(matches!(state.screen, Screen::Selection(_)));
    }
}
