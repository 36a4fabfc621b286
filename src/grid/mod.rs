//! The playing field.
//!
//! A `Grid` is a rows × cols matrix of owner tags (`0` = empty,
//! `1..=N` = player) whose edges wrap toroidally for neighbor lookups.

mod board;

pub use board::{capacity_size, Grid};
