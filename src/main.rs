use log::debug;
use snake_duel::{
    app::State,
    models::snake::snake_game::{CANVAS_SIZE, TILE_SIZE},
};

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "snake_duel=debug");
    }
    env_logger::init();
    debug!("Debug on. Board is {CANVAS_SIZE}px with {TILE_SIZE}px tiles");
    let _ = iced::application("Snake Duel", State::update, State::view)
        .window_size(iced::Size::new(640.0, 600.0))
        .subscription(State::subscription)
        .run();
}
