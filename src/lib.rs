//! 2048 on a 4x4 grid: slide-and-merge board logic plus a macroquad window
//! (the `twenty48` binary) and a crossterm terminal version (`play_cli`).

pub mod board;
pub mod consts;
pub mod error;
pub mod tile;
pub mod ui;
