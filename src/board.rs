use log::warn;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::consts::{COLS, INITIAL_TILES, ROWS};
use crate::error::{GameError, Result};
use crate::tile::Tile;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The 4x4 playing field. Cells hold at most one tile; `None` is empty.
#[derive(Clone)]
pub struct Board {
    grid: [[Option<Tile>; COLS]; ROWS],
}

impl Board {
    /// Fresh board with the two starting tiles, both of value 2.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Board {
            grid: [[None; COLS]; ROWS],
        };
        for _ in 0..INITIAL_TILES {
            if board.spawn_tile(2, rng).is_none() {
                warn!("no empty cell while placing starting tiles");
            }
        }
        board
    }

    /// Builds a board from raw cell values, 0 meaning empty. Every occupied
    /// cell must hold a power of two starting at 2.
    pub fn from_grid(values: [[u32; COLS]; ROWS]) -> Result<Self> {
        let mut grid = [[None; COLS]; ROWS];
        for (r, row) in values.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if value < 2 || !value.is_power_of_two() {
                    return Err(GameError::InvalidTileValue(value));
                }
                grid[r][c] = Some(Tile::new(value, r, c));
            }
        }
        Ok(Board { grid })
    }

    pub fn tile_at(&self, row: usize, col: usize) -> Option<&Tile> {
        self.grid[row][col].as_ref()
    }

    /// Cell value, 0 for empty.
    pub fn value_at(&self, row: usize, col: usize) -> u32 {
        self.grid[row][col].map_or(0, |tile| tile.value)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.iter().flatten().filter_map(|cell| cell.as_ref())
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.grid
            .iter_mut()
            .flatten()
            .filter_map(|cell| cell.as_mut())
    }

    pub fn count_tiles(&self) -> usize {
        self.tiles().count()
    }

    /// True when every cell is occupied. A full board counts as game over
    /// even when adjacent equal tiles could still merge; whether any move
    /// remains playable is not checked.
    pub fn is_game_over(&self) -> bool {
        self.grid.iter().flatten().all(|cell| cell.is_some())
    }

    fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for r in 0..ROWS {
            for c in 0..COLS {
                if self.grid[r][c].is_none() {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    fn spawn_tile<R: Rng + ?Sized>(&mut self, value: u32, rng: &mut R) -> Option<(usize, usize)> {
        let (row, col) = *self.empty_cells().choose(rng)?;
        self.grid[row][col] = Some(Tile::new(value, row, col));
        Some((row, col))
    }

    /// Places a 2 or a 4 (uniform) on a uniformly chosen empty cell. Returns
    /// the cell, or `None` when the board is full; the caller treats `None`
    /// as game over.
    pub fn spawn_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(usize, usize)> {
        let value = if rng.random_bool(0.5) { 2 } else { 4 };
        self.spawn_tile(value, rng)
    }

    /// Slides and merges every row (or column) toward `direction`, updating
    /// tile values and target cells in place. Spawning is left to the caller,
    /// which decides between spawn and game over by whether an empty cell
    /// remains.
    pub fn apply_move(&mut self, direction: Direction) {
        match direction {
            Direction::Left | Direction::Right => {
                let reversed = direction == Direction::Right;
                for r in 0..ROWS {
                    let mut line = [0u32; COLS];
                    for c in 0..COLS {
                        line[c] = self.value_at(r, c);
                    }
                    let line = slide_line_toward(line, reversed);
                    for c in 0..COLS {
                        self.set_cell(r, c, line[c]);
                    }
                }
            }
            Direction::Up | Direction::Down => {
                let reversed = direction == Direction::Down;
                for c in 0..COLS {
                    let mut line = [0u32; ROWS];
                    for r in 0..ROWS {
                        line[r] = self.value_at(r, c);
                    }
                    let line = slide_line_toward(line, reversed);
                    for r in 0..ROWS {
                        self.set_cell(r, c, line[r]);
                    }
                }
            }
        }
    }

    /// Writes one post-slide cell. A tile already present at the cell is kept
    /// and updated so its pixel position carries over between frames; an
    /// empty cell that gains a value gets a fresh tile resting in place.
    fn set_cell(&mut self, row: usize, col: usize, value: u32) {
        if value == 0 {
            self.grid[row][col] = None;
        } else if let Some(tile) = &mut self.grid[row][col] {
            tile.value = value;
            tile.row = row;
            tile.col = col;
            tile.target_row = row;
            tile.target_col = col;
        } else {
            self.grid[row][col] = Some(Tile::new(value, row, col));
        }
    }
}

/// Compacts a line toward index 0: drop the gaps, merge equal neighbours
/// left-to-right (the left one doubles, the right one empties), drop the gaps
/// again, pad with zeros. The merge scan is a single pass, so a tile created
/// by a merge never merges again in the same move: `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`, not `[8, 0, 0, 0]`. An equal pair whose doubled value
/// does not fit in `u32` stays unmerged instead of wrapping.
pub fn slide_line(line: [u32; COLS]) -> [u32; COLS] {
    let mut packed: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    for i in 1..packed.len() {
        if packed[i] == packed[i - 1] {
            if let Some(doubled) = packed[i - 1].checked_mul(2) {
                packed[i - 1] = doubled;
                packed[i] = 0;
            }
        }
    }
    packed.retain(|&v| v != 0);

    let mut out = [0u32; COLS];
    out[..packed.len()].copy_from_slice(&packed);
    out
}

/// Right and down reuse the leftward compaction by flipping the line first
/// and flipping the result back.
fn slide_line_toward(mut line: [u32; COLS], reversed: bool) -> [u32; COLS] {
    if reversed {
        line.reverse();
    }
    let mut out = slide_line(line);
    if reversed {
        out.reverse();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn values(board: &Board) -> [[u32; COLS]; ROWS] {
        let mut out = [[0; COLS]; ROWS];
        for r in 0..ROWS {
            for c in 0..COLS {
                out[r][c] = board.value_at(r, c);
            }
        }
        out
    }

    #[test]
    fn slide_line_merges_pairwise_in_a_single_pass() {
        assert_eq!(slide_line([2, 2, 2, 2]), [4, 4, 0, 0]);
    }

    #[test]
    fn slide_line_compacts_across_gaps() {
        assert_eq!(slide_line([2, 0, 2, 4]), [4, 4, 0, 0]);
        assert_eq!(slide_line([0, 0, 0, 2]), [2, 0, 0, 0]);
        assert_eq!(slide_line([0, 0, 0, 0]), [0, 0, 0, 0]);
    }

    #[test]
    fn slide_line_never_remerges_a_merged_tile() {
        assert_eq!(slide_line([4, 2, 2, 0]), [4, 4, 0, 0]);
        assert_eq!(slide_line([2, 2, 4, 0]), [4, 4, 0, 0]);
        assert_eq!(slide_line([4, 4, 8, 0]), [8, 8, 0, 0]);
    }

    #[test]
    fn slide_line_preserves_the_sum_of_the_line() {
        let alphabet = [0u32, 2, 4, 8, 16, 1 << 31];
        for a in alphabet {
            for b in alphabet {
                for c in alphabet {
                    for d in alphabet {
                        let line = [a, b, c, d];
                        let out = slide_line(line);
                        let sum_before: u64 = line.iter().map(|&v| u64::from(v)).sum();
                        let sum_after: u64 = out.iter().map(|&v| u64::from(v)).sum();
                        assert_eq!(sum_before, sum_after, "{line:?} -> {out:?}");

                        let occupied_before = line.iter().filter(|&&v| v != 0).count();
                        let occupied_after = out.iter().filter(|&&v| v != 0).count();
                        assert!(occupied_after <= occupied_before, "{line:?} -> {out:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn merge_that_would_overflow_u32_is_skipped() {
        let top = 1u32 << 31;
        assert_eq!(slide_line([top, top, 0, 0]), [top, top, 0, 0]);
        assert_eq!(slide_line([0, top, top, 2]), [top, top, 2, 0]);
    }

    #[test]
    fn move_keeps_unmergeable_top_tiles_intact() {
        let top = 1u32 << 31;
        let mut board = Board::from_grid([
            [top, top, 0, 0],
            [0; 4],
            [0; 4],
            [0; 4],
        ])
        .unwrap();
        board.apply_move(Direction::Left);

        assert_eq!(board.value_at(0, 0), top);
        assert_eq!(board.value_at(0, 1), top);
        assert_eq!(board.count_tiles(), 2);
    }

    #[test]
    fn move_left_merges_every_row() {
        let mut board = Board::from_grid([
            [2, 2, 2, 2],
            [2, 0, 2, 4],
            [0, 0, 0, 0],
            [8, 0, 0, 8],
        ])
        .unwrap();
        board.apply_move(Direction::Left);
        assert_eq!(
            values(&board),
            [
                [4, 4, 0, 0],
                [4, 4, 0, 0],
                [0, 0, 0, 0],
                [16, 0, 0, 0],
            ]
        );
    }

    #[test]
    fn move_right_merges_toward_the_right_edge() {
        let mut board = Board::from_grid([
            [4, 2, 2, 0],
            [2, 2, 2, 2],
            [0, 0, 0, 0],
            [2, 4, 8, 16],
        ])
        .unwrap();
        board.apply_move(Direction::Right);
        assert_eq!(
            values(&board),
            [
                [0, 0, 4, 4],
                [0, 0, 4, 4],
                [0, 0, 0, 0],
                [2, 4, 8, 16],
            ]
        );
    }

    #[test]
    fn moves_up_and_down_work_on_columns() {
        let grid = [
            [2, 0, 0, 0],
            [2, 0, 4, 0],
            [0, 0, 4, 0],
            [4, 0, 0, 2],
        ];

        let mut board = Board::from_grid(grid).unwrap();
        board.apply_move(Direction::Up);
        assert_eq!(
            values(&board),
            [
                [4, 0, 8, 2],
                [4, 0, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ]
        );

        let mut board = Board::from_grid(grid).unwrap();
        board.apply_move(Direction::Down);
        assert_eq!(
            values(&board),
            [
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [4, 0, 0, 0],
                [4, 0, 8, 2],
            ]
        );
    }

    #[test]
    fn tile_surviving_at_its_cell_keeps_its_pixel_position() {
        let mut board = Board::from_grid([
            [2, 2, 0, 0],
            [0; 4],
            [0; 4],
            [0; 4],
        ])
        .unwrap();
        // Pretend the tile at (0, 0) is mid-slide.
        if let Some(tile) = &mut board.grid[0][0] {
            tile.x = 40.0;
        }
        board.apply_move(Direction::Left);

        let tile = board.tile_at(0, 0).unwrap();
        assert_eq!(tile.value, 4);
        assert_eq!(tile.x, 40.0);
        assert!(board.tile_at(0, 1).is_none());
    }

    #[test]
    fn tile_moved_into_an_empty_cell_arrives_settled() {
        let mut board = Board::from_grid([
            [0, 0, 0, 2],
            [0; 4],
            [0; 4],
            [0; 4],
        ])
        .unwrap();
        board.apply_move(Direction::Left);

        let tile = board.tile_at(0, 0).unwrap();
        assert_eq!(tile.value, 2);
        assert!(tile.is_settled());
        assert_eq!(board.count_tiles(), 1);
    }

    #[test]
    fn new_board_starts_with_two_settled_2s() {
        let mut rng = rng();
        let board = Board::new(&mut rng);
        assert_eq!(board.count_tiles(), INITIAL_TILES);
        assert!(board.tiles().all(|tile| tile.value == 2));
        assert!(board.tiles().all(|tile| tile.is_settled()));
    }

    #[test]
    fn spawn_targets_the_only_empty_cell() {
        let mut rng = rng();
        let mut board = Board::from_grid([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 0],
        ])
        .unwrap();
        assert_eq!(board.spawn_random_tile(&mut rng), Some((3, 3)));
        let value = board.value_at(3, 3);
        assert!(value == 2 || value == 4);
    }

    #[test]
    fn spawn_on_a_full_board_is_a_no_op() {
        let mut rng = rng();
        let mut board = Board::from_grid([[2; COLS]; ROWS]).unwrap();
        assert_eq!(board.spawn_random_tile(&mut rng), None);
        assert_eq!(board.count_tiles(), ROWS * COLS);
    }

    #[test]
    fn game_over_ignores_available_merges() {
        // Full board, even though every neighbour pair could still merge.
        let board = Board::from_grid([[2; COLS]; ROWS]).unwrap();
        assert!(board.is_game_over());

        let mut one_free = [[2; COLS]; ROWS];
        one_free[2][1] = 0;
        assert!(!Board::from_grid(one_free).unwrap().is_game_over());
    }

    #[test]
    fn move_then_spawn_adds_exactly_one_tile() {
        let mut rng = rng();
        let mut board = Board::from_grid([
            [2, 2, 0, 0],
            [0; 4],
            [0; 4],
            [0; 4],
        ])
        .unwrap();
        board.apply_move(Direction::Left);
        assert_eq!(board.count_tiles(), 1);

        let (row, col) = board.spawn_random_tile(&mut rng).unwrap();
        assert_eq!(board.count_tiles(), 2);
        let spawned = board.value_at(row, col);
        assert!(spawned == 2 || spawned == 4);
    }

    #[test]
    fn from_grid_rejects_values_that_are_not_powers_of_two() {
        let bad = |v: u32| Board::from_grid([[v, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).err();
        assert_eq!(bad(3), Some(GameError::InvalidTileValue(3)));
        assert_eq!(bad(1), Some(GameError::InvalidTileValue(1)));
        assert_eq!(bad(6), Some(GameError::InvalidTileValue(6)));
        assert!(Board::from_grid([[0, 2, 1024, 0], [0; 4], [0; 4], [0; 4]]).is_ok());
    }
}
