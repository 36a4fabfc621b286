//! Toroidal owner-tag grid.
//!
//! The `Grid` stores one owner tag per cell, row-major. Coordinates are
//! `(x, y)` = `(column, row)`. Plain accessors are bounds-checked; neighbor
//! lookups go through [`Grid::wrapped`], which treats the grid as a torus.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::GridError;
use crate::core::player::{PlayerId, PlayerMap, EMPTY};

/// A fixed-size grid of owner tags.
///
/// ## Usage
///
/// ```
/// use life_arena::grid::Grid;
///
/// let grid: Grid = "010\n000\n002".parse().unwrap();
/// assert_eq!(grid.get(1, 0), Some(1));
/// assert_eq!(grid.get(2, 2), Some(2));
///
/// // (-1, -1) wraps to the bottom-right corner
/// assert_eq!(grid.wrapped(-1, -1), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create an all-empty grid.
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        assert!(cols > 0 && rows > 0, "Grid must have at least one row and one column");

        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols * rows],
        }
    }

    /// Build a grid from explicit rows of owner tags.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(cols * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: y,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            cols,
            rows: height,
            cells,
        })
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.cols && y < self.rows).then(|| y * self.cols + x)
    }

    /// Owner tag at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    /// Write an owner tag. Returns `false` outside the grid.
    pub fn set(&mut self, x: usize, y: usize, tag: u8) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.cells[i] = tag;
                true
            }
            None => false,
        }
    }

    /// Owner tag at `(x, y)` with both axes wrapped around the torus.
    #[must_use]
    pub fn wrapped(&self, x: isize, y: isize) -> u8 {
        let x = x.rem_euclid(self.cols as isize) as usize;
        let y = y.rem_euclid(self.rows as isize) as usize;
        self.cells[y * self.cols + x]
    }

    /// One row of owner tags.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        (y < self.rows).then(|| &self.cells[y * self.cols..(y + 1) * self.cols])
    }

    /// Iterate over rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.cols)
    }

    /// Iterate over `(x, y, tag)` for every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &tag)| (i % cols, i / cols, tag))
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|&&tag| tag != EMPTY).count()
    }

    /// Coordinates of every empty cell, row-major.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|&(_, _, tag)| tag == EMPTY)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    /// Highest owner tag present, `0` for an empty board.
    #[must_use]
    pub fn max_tag(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// Live-cell count per player. Tags above `player_count` are not counted.
    #[must_use]
    pub fn owner_counts(&self, player_count: usize) -> PlayerMap<usize> {
        let mut counts = PlayerMap::with_value(player_count, 0);
        for &tag in &self.cells {
            if let Some(count) = PlayerId::from_tag(tag).and_then(|p| counts.get_mut(p)) {
                *count += 1;
            }
        }
        counts
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

/// Wire shape of [`Grid`], checked before it becomes one.
#[derive(Deserialize)]
struct RawGrid {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.cols == 0 || raw.rows == 0 {
            return Err(GridError::Empty);
        }
        if raw.cells.len() != raw.cols * raw.rows {
            return Err(GridError::CellCount {
                expected: raw.cols * raw.rows,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            cols: raw.cols,
            rows: raw.rows,
            cells: raw.cells,
        })
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse a digit picture: one line per row, one digit per cell.
    /// Surrounding whitespace and blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .enumerate()
                    .map(|(x, c)| {
                        c.to_digit(10)
                            .map(|d| d as u8)
                            .ok_or(GridError::BadCell { x, y, found: c })
                    })
                    .collect::<Result<Vec<u8>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Grid::from_rows(rows)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.iter_rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for tag in row {
                write!(f, "{tag}")?;
            }
        }
        Ok(())
    }
}

/// Smallest size, at least `(cols, rows)`, holding `required` cells.
///
/// Dimensions never shrink; zero is lifted to one. The smaller axis grows
/// first, so enlarged grids stay close to square.
#[must_use]
pub fn capacity_size(cols: usize, rows: usize, required: usize) -> (usize, usize) {
    let (mut cols, mut rows) = (cols.max(1), rows.max(1));
    while cols * rows < required {
        if rows <= cols {
            rows += 1;
        } else {
            cols += 1;
        }
    }
    (cols, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.live_cells(), 0);
        assert_eq!(grid.max_tag(), 0);
    }

    #[test]
    #[should_panic(expected = "at least one row and one column")]
    fn test_zero_sized_grid() {
        let _ = Grid::new(0, 3);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new(3, 2);
        assert!(grid.set(2, 1, 4));
        assert_eq!(grid.get(2, 1), Some(4));
        assert!(!grid.set(3, 0, 1));
        assert!(!grid.set(0, 2, 1));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.live_cells(), 1);
    }

    #[test]
    fn test_wrapped_lookup() {
        let mut grid = Grid::new(5, 4);
        grid.set(4, 3, 1);
        grid.set(0, 0, 2);

        assert_eq!(grid.wrapped(-1, -1), 1);
        assert_eq!(grid.wrapped(5, 4), 2);
        assert_eq!(grid.wrapped(-5, 8), 2);
        assert_eq!(grid.wrapped(9, -1), 1);
    }

    #[test]
    fn test_parse_and_display() {
        let text = "00000\n01110\n00200";
        let grid: Grid = text.parse().unwrap();

        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.get(1, 1), Some(1));
        assert_eq!(grid.get(2, 2), Some(2));
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_parse_ignores_indentation_and_blank_lines() {
        let grid: Grid = "
            010
            000
        "
        .parse()
        .unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.get(1, 0), Some(1));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!(
            "010\n01".parse::<Grid>(),
            Err(GridError::Ragged { row: 1, expected: 3, found: 2 })
        );
        assert_eq!(
            "0x0".parse::<Grid>(),
            Err(GridError::BadCell { x: 1, y: 0, found: 'x' })
        );
    }

    #[test]
    fn test_owner_counts() {
        let grid: Grid = "1102\n0020\n3000".parse().unwrap();
        let counts = grid.owner_counts(3);

        assert_eq!(counts[PlayerId::new(1)], 2);
        assert_eq!(counts[PlayerId::new(2)], 2);
        assert_eq!(counts[PlayerId::new(3)], 1);

        let fewer = grid.owner_counts(2);
        assert_eq!(fewer.player_count(), 2);
    }

    #[test]
    fn test_empty_cells_and_clear() {
        let mut grid: Grid = "10\n01".parse().unwrap();
        assert_eq!(grid.empty_cells(), vec![(1, 0), (0, 1)]);

        grid.clear();
        assert_eq!(grid.live_cells(), 0);
        assert_eq!(grid.empty_cells().len(), 4);
    }

    #[test]
    fn test_rows_and_cells_iteration() {
        let grid: Grid = "12\n30".parse().unwrap();
        assert_eq!(grid.row(1), Some(&[3u8, 0][..]));
        assert_eq!(grid.row(2), None);

        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 0)]);
    }

    #[test]
    fn test_capacity_size() {
        assert_eq!(capacity_size(10, 6, 40), (10, 6));
        assert_eq!(capacity_size(10, 6, 80), (10, 8));
        assert_eq!(capacity_size(2, 2, 9), (3, 3));
        assert_eq!(capacity_size(0, 0, 0), (1, 1));
        assert_eq!(capacity_size(1, 1, 3), (2, 2));
    }

    #[test]
    fn test_serialization() {
        let grid: Grid = "120\n003".parse().unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let deserialized: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, deserialized);
    }

    #[test]
    fn test_deserialize_rejects_wrong_cell_count() {
        let result: Result<Grid, _> = serde_json::from_str(r#"{"cols": 2, "rows": 2, "cells": [0, 1, 0]}"#);
        assert!(result.is_err());
    }
}
