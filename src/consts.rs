//! Board geometry and rendering constants shared by the game logic and both UIs.

pub const ROWS: usize = 4;
pub const COLS: usize = 4;

pub const WINDOW_WIDTH: i32 = 700;
pub const WINDOW_HEIGHT: i32 = 700;

pub const CELL_WIDTH: f32 = (WINDOW_WIDTH / COLS as i32) as f32;
pub const CELL_HEIGHT: f32 = (WINDOW_HEIGHT / ROWS as i32) as f32;

/// Thickness of the grid lines and the window border.
pub const OUTLINE_THICKNESS: f32 = 10.0;

/// Pixels a sliding tile advances per axis per frame.
pub const MOVE_VEL: f32 = 20.0;

pub const FONT_SIZE: f32 = 60.0;

/// Tiles placed on a fresh board.
pub const INITIAL_TILES: usize = 2;

/// Seconds the game-over screen stays up before the window closes.
pub const GAME_OVER_DELAY: f64 = 3.0;
