use iced::{
    alignment,
    widget::{button, column, container, text, Column},
    Element, Length,
};
use log::debug;

use crate::{app::Message, models::snake::snake_game::GameMode, view::View};

#[derive(Debug, Clone)]
pub enum SnakeSelectionMessage {
    ModeSelected(GameMode),
}

/// Menu shown before a session starts.
#[derive(Debug)]
pub struct SnakeSelectionScreen {
    last_mode: Option<GameMode>,
}

impl Default for SnakeSelectionScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SnakeSelectionScreen {
    #[must_use]
    pub fn new() -> Self {
        Self { last_mode: None }
    }

    /// Menu that remembers the mode of the session it was reached from.
    #[must_use]
    pub fn with_last_mode(mode: GameMode) -> Self {
        Self {
            last_mode: Some(mode),
        }
    }
}

impl View for SnakeSelectionScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        if let Message::Selection(SnakeSelectionMessage::ModeSelected(mode)) = message {
            debug!("Selected mode: {}", mode);
            self.last_mode = Some(mode);
            return Some(Message::GameScreenTransition(mode));
        }
        debug!(
            "Received non selection message in snake selection screen: {:#?}",
            message
        );
        None
    }

    fn view(&self) -> Element<'_, Message> {
        let mode_buttons = GameMode::VALUES.iter().fold(
            Column::new().spacing(10).align_x(alignment::Horizontal::Center),
            |buttons, mode| {
                let label = if self.last_mode == Some(*mode) {
                    format!("{mode} (again)")
                } else {
                    mode.to_string()
                };
                buttons.push(
                    button(text(label).align_x(alignment::Horizontal::Center))
                        .on_press(Message::Selection(SnakeSelectionMessage::ModeSelected(
                            *mode,
                        )))
                        .width(200),
                )
            },
        );

        let content = column![
            text("Snake Duel").size(32),
            text("Arrows steer the blue snake. WASD steers the red one."),
            mode_buttons,
        ]
        .spacing(20)
        .align_x(alignment::Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into()
    }
}
