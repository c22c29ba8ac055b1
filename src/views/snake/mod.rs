pub mod snake_canvas;
pub mod snake_game_screen;
pub mod snake_selection_screen;
