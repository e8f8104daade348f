use macroquad::color::Color;

use crate::consts::{CELL_HEIGHT, CELL_WIDTH, MOVE_VEL};

/// A numbered tile on the board.
///
/// `row`/`col` is the cell the tile logically occupies and `target_row`/
/// `target_col` the cell it is headed to; the board keeps both in sync when it
/// moves tiles. `x`/`y` is the pixel position drawn this frame, which lags
/// behind and slides toward the target cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    pub value: u32,
    pub row: usize,
    pub col: usize,
    pub target_row: usize,
    pub target_col: usize,
    pub x: f32,
    pub y: f32,
}

impl Tile {
    /// Creates a tile already resting in its cell.
    pub fn new(value: u32, row: usize, col: usize) -> Self {
        Self {
            value,
            row,
            col,
            target_row: row,
            target_col: col,
            x: col as f32 * CELL_WIDTH,
            y: row as f32 * CELL_HEIGHT,
        }
    }

    /// Pixel x of the target cell's left edge.
    pub fn target_x(&self) -> f32 {
        self.target_col as f32 * CELL_WIDTH
    }

    /// Pixel y of the target cell's top edge.
    pub fn target_y(&self) -> f32 {
        self.target_row as f32 * CELL_HEIGHT
    }

    /// Advances the drawn position one frame toward the target cell, at most
    /// `MOVE_VEL` pixels per axis, never overshooting.
    pub fn update_position(&mut self) {
        let tx = self.target_x();
        let ty = self.target_y();
        if self.x < tx {
            self.x = (self.x + MOVE_VEL).min(tx);
        } else if self.x > tx {
            self.x = (self.x - MOVE_VEL).max(tx);
        }
        if self.y < ty {
            self.y = (self.y + MOVE_VEL).min(ty);
        } else if self.y > ty {
            self.y = (self.y - MOVE_VEL).max(ty);
        }
    }

    /// True once the drawn position has reached the target cell.
    pub fn is_settled(&self) -> bool {
        self.x == self.target_x() && self.y == self.target_y()
    }
}

pub fn get_tile_color(value: u32) -> Color {
    match value {
        2 => Color::from_hex(0xede5da),
        4 => Color::from_hex(0xeee1c9),
        8 => Color::from_hex(0xf3b27a),
        16 => Color::from_hex(0xf69665),
        32 => Color::from_hex(0xf77c5f),
        64 => Color::from_hex(0xf75f3b),
        128 => Color::from_hex(0xedd073),
        256 => Color::from_hex(0xedcc63),
        512 => Color::from_hex(0xecca50),
        1024 => Color::from_hex(0xebc83d),
        _ => Color::from_hex(0xede5da),
    }
}
