//! Player-scoped generation stepping.
//!
//! For an acting player `p`, a cell's neighbor count only includes the
//! neighbors `p` owns. Cells owned by other players still take up a slot
//! but never count. The transition for a cell currently tagged `c` is:
//!
//! | current  | own neighbors | next |
//! |----------|---------------|------|
//! | `c == p` | 2 or 3        | `p`  |
//! | `c == p` | otherwise     | `0`  |
//! | `c != p` | exactly 3     | `p`  |
//! | `c != p` | otherwise     | `c`  |
//!
//! With a single player every cell is `0` or `1` and this is classic Life.

use crate::core::player::{PlayerId, EMPTY};
use crate::grid::Grid;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Count the toroidal neighbors of `(x, y)` owned by `player`.
#[must_use]
pub fn scoped_neighbor_count(grid: &Grid, player: PlayerId, x: usize, y: usize) -> u8 {
    let (x, y) = (x as isize, y as isize);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dx, dy)| grid.wrapped(x + dx, y + dy) == player.tag())
        .count() as u8
}

/// Next owner tag of a cell tagged `current` with `neighbors` cells owned by `player`.
#[must_use]
pub fn next_cell_state(current: u8, player: PlayerId, neighbors: u8) -> u8 {
    if current == player.tag() {
        match neighbors {
            2 | 3 => current,
            _ => EMPTY,
        }
    } else if neighbors == 3 {
        player.tag()
    } else {
        current
    }
}

/// One player's turn: the whole grid advanced under `player`'s rule.
///
/// Every cell is computed from the input grid; the result is a fresh grid.
#[must_use]
pub fn player_step(grid: &Grid, player: PlayerId) -> Grid {
    let mut next = Grid::new(grid.cols(), grid.rows());
    for (x, y, current) in grid.cells() {
        let neighbors = scoped_neighbor_count(grid, player, x, y);
        next.set(x, y, next_cell_state(current, player, neighbors));
    }
    next
}

/// One generation: every player in `order` steps in turn, each seeing the
/// grid committed by the previous player.
#[must_use]
pub fn generation_step(grid: &Grid, order: &[PlayerId]) -> Grid {
    order
        .iter()
        .fold(grid.clone(), |current, &player| player_step(&current, player))
}
