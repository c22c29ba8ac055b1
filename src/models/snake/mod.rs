pub mod snake_game;
pub mod snake_player;
