//! Error types for settings and grid construction.

use thiserror::Error;

use super::settings::SettingField;

/// Errors from strict settings construction and config loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A field value lies outside its documented range.
    #[error("{field} = {value} is out of range {min}..={max}")]
    OutOfRange {
        /// Offending field.
        field: SettingField,
        /// Rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },

    /// Name that does not match any settings field.
    #[error("unknown settings field {0:?}")]
    UnknownField(String),

    /// Settings JSON could not be parsed.
    #[error("invalid settings document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from building a grid out of caller-supplied data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grid has no rows or no columns.
    #[error("grid must have at least one row and one column")]
    Empty,

    /// Rows of differing widths.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// Serialized grid whose cell vector does not match its dimensions.
    #[error("expected {expected} cells, found {found}")]
    CellCount {
        /// `cols * rows`.
        expected: usize,
        /// Length of the cell vector.
        found: usize,
    },

    /// Character in a grid picture that is not a digit.
    #[error("invalid cell {found:?} at column {x}, row {y}")]
    BadCell {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Offending character.
        found: char,
    },

    /// Owner tag larger than the number of players.
    #[error("cell ({x}, {y}) is owned by {tag} but only {players} players are configured")]
    UnknownOwner {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Tag found in the cell.
        tag: u8,
        /// Configured player count.
        players: usize,
    },
}
