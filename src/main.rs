use log::{debug, info};
use macroquad::color::Color;
use macroquad::input::{KeyCode, is_key_pressed, is_quit_requested, prevent_quit};
use macroquad::shapes::{draw_line, draw_rectangle, draw_rectangle_lines};
use macroquad::text::{draw_text, measure_text};
use macroquad::time::get_time;
use macroquad::window::{Conf, clear_background, next_frame};

use twenty48_rs::board::{Board, Direction};
use twenty48_rs::consts::{
    CELL_HEIGHT, CELL_WIDTH, COLS, FONT_SIZE, GAME_OVER_DELAY, OUTLINE_THICKNESS, ROWS,
    WINDOW_HEIGHT, WINDOW_WIDTH,
};
use twenty48_rs::tile::{Tile, get_tile_color};

fn background_color() -> Color {
    Color::from_hex(0xcdc0b4)
}

fn outline_color() -> Color {
    Color::from_hex(0xbbada0)
}

fn font_color() -> Color {
    Color::from_hex(0x776e65)
}

fn draw_tile(tile: &Tile) {
    draw_rectangle(
        tile.x,
        tile.y,
        CELL_WIDTH,
        CELL_HEIGHT,
        get_tile_color(tile.value),
    );

    let text = format!("{}", tile.value);
    let dims = measure_text(&text, None, FONT_SIZE as u16, 1.0);
    draw_text(
        &text,
        tile.x + (CELL_WIDTH - dims.width) / 2.0,
        tile.y + (CELL_HEIGHT - dims.height) / 2.0 + dims.offset_y,
        FONT_SIZE,
        font_color(),
    );
}

fn draw_grid_lines() {
    for row in 1..ROWS {
        let y = row as f32 * CELL_HEIGHT;
        draw_line(
            0.0,
            y,
            WINDOW_WIDTH as f32,
            y,
            OUTLINE_THICKNESS,
            outline_color(),
        );
    }
    for col in 1..COLS {
        let x = col as f32 * CELL_WIDTH;
        draw_line(
            x,
            0.0,
            x,
            WINDOW_HEIGHT as f32,
            OUTLINE_THICKNESS,
            outline_color(),
        );
    }
    draw_rectangle_lines(
        0.0,
        0.0,
        WINDOW_WIDTH as f32,
        WINDOW_HEIGHT as f32,
        OUTLINE_THICKNESS,
        outline_color(),
    );
}

fn draw_board(board: &Board) {
    clear_background(background_color());
    for tile in board.tiles() {
        draw_tile(tile);
    }
    // Grid and border sit on top so sliding tiles pass under them.
    draw_grid_lines();
}

/// Holds the "Game Over" screen up for a few seconds before the window
/// closes.
async fn game_over_screen() {
    let shown_at = get_time();
    while get_time() - shown_at < GAME_OVER_DELAY {
        clear_background(background_color());
        let text = "Game Over";
        let dims = measure_text(text, None, FONT_SIZE as u16, 1.0);
        draw_text(
            text,
            (WINDOW_WIDTH as f32 - dims.width) / 2.0,
            (WINDOW_HEIGHT as f32 - dims.height) / 2.0 + dims.offset_y,
            FONT_SIZE,
            font_color(),
        );
        next_frame().await;
    }
}

fn pressed_direction() -> Option<Direction> {
    if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
        Some(Direction::Left)
    } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
        Some(Direction::Right)
    } else if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
        Some(Direction::Up)
    } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
        Some(Direction::Down)
    } else {
        None
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "2048".to_string(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    prevent_quit();

    let mut rng = rand::rng();
    let mut board = Board::new(&mut rng);

    loop {
        if is_quit_requested() {
            break;
        }

        if is_key_pressed(KeyCode::R) {
            info!("restarting");
            board = Board::new(&mut rng);
        }

        if let Some(direction) = pressed_direction() {
            board.apply_move(direction);
            match board.spawn_random_tile(&mut rng) {
                Some((row, col)) => {
                    debug!("moved {:?}, spawned at ({}, {})", direction, row, col);
                }
                None => {
                    info!("board full after {:?} move, game over", direction);
                    game_over_screen().await;
                    break;
                }
            }
        }

        for tile in board.tiles_mut() {
            tile.update_position();
        }

        draw_board(&board);
        next_frame().await
    }
}
