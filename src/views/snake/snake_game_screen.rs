use std::time::Duration;

use iced::{
    keyboard::{self, Key},
    time::{self, Instant},
    widget::{button, canvas, column, container, row, text, Row},
    Element, Length, Subscription,
};

use crate::{
    app::Message,
    models::snake::snake_game::{GameMode, SnakeError, CANVAS_SIZE},
    view::View,
    view_model::ViewModel,
    view_models::snake::snake_view_model::{SnakeParams, SnakeViewModel},
};

use super::snake_canvas::SnakeCanvas;

#[derive(Clone, Debug)]
pub enum SnakeGameMessage {
    Key(Key),
    Timer(Instant),
    Reset,
    /// A crash raised the flash with this id.
    Crashed(u64),
    /// The flash with this id ran its course.
    FlashElapsed(u64),
}

#[derive(Debug)]
pub struct SnakeGameScreen {
    view_model: SnakeViewModel,
}

impl SnakeGameScreen {
    /// Starts a session for the screen.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the session cannot be created.
    pub fn new(params: SnakeParams) -> Result<Self, SnakeError> {
        Ok(Self {
            view_model: SnakeViewModel::new(params)?,
        })
    }

    #[must_use]
    pub fn get_view_model(&self) -> &SnakeViewModel {
        &self.view_model
    }
}

impl View for SnakeGameScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> Element<'_, Message> {
        let snapshot = self.view_model.snapshot();
        let side = f32::from(CANVAS_SIZE);

        let mut scoreboard = Row::new().spacing(40).push(
            text(format!("Blue Snake: {}", snapshot.scores[0]))
                .size(20)
                .color(iced::Color::from_rgb(0.4, 0.4, 1.0)),
        );
        if snapshot.mode == GameMode::Multi {
            scoreboard = scoreboard.push(
                text(format!("Red Snake: {}", snapshot.scores[1]))
                    .size(20)
                    .color(iced::Color::from_rgb(1.0, 0.4, 0.4)),
            );
        }

        let back_button = button(text("Back to menu"))
            .on_press(Message::SelectionScreenTransition)
            .width(140)
            .height(40);
        let mut controls = row![back_button].spacing(10);
        if snapshot.game_over {
            // only offered once the session is over
            controls = controls.push(
                button(text("Restart"))
                    .on_press(Message::Game(SnakeGameMessage::Reset))
                    .width(80)
                    .height(40),
            );
        }

        let board = canvas(SnakeCanvas::new(
            snapshot.clone(),
            self.view_model.get_hue(),
            self.view_model.is_flashing(),
        ))
        .width(Length::Fixed(side))
        .height(Length::Fixed(side));

        let mut content = column![controls, scoreboard, board]
            .spacing(10)
            .align_x(iced::alignment::Horizontal::Center);
        if snapshot.game_over {
            content = content.push(text("GAME OVER. Press space to play again."));
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(iced::alignment::Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keyboard =
            keyboard::on_key_press(|key, _| Some(Message::Game(SnakeGameMessage::Key(key))));
        if !self.view_model.is_running() {
            return keyboard;
        }
        let timer = time::every(Duration::from_millis(
            self.view_model.get_time_between_frames(),
        ))
        .map(|now| Message::Game(SnakeGameMessage::Timer(now)));
        Subscription::batch(vec![timer, keyboard])
    }
}
