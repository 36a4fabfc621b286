//! Game rules: the player-scoped stepping algorithm and winner logic.
//!
//! - `step`: neighbor counting and the per-player transition, applied to a
//!   whole grid for one player or a whole generation
//! - `outcome`: standings from live-cell counts
//!
//! Everything here is pure: grids in, grids out.

pub mod outcome;
pub mod step;

pub use outcome::{GameResult, Leaders};
pub use step::{generation_step, next_cell_state, player_step, scoped_neighbor_count};
