//! Game settings with validated ranges.
//!
//! Settings are permissive: the constructor replaces any out-of-range value
//! with that field's default, and the setters silently reject invalid values
//! (returning `false` and keeping the previous one). Callers that prefer to
//! fail fast use [`GameSettings::try_new`].
//!
//! | field                   | range    | default |
//! |-------------------------|----------|---------|
//! | `players_number`        | 1..=5    | 2       |
//! | `generations_per_round` | 1..=50   | 10      |
//! | `rounds_number`         | 1..=30   | 10      |
//! | `new_cells_per_round`   | 5..=100  | 20      |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::SettingsError;

/// Inclusive range and default for one settings field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettingsRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl SettingsRange {
    /// Whether `value` is accepted by this range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (i64::from(self.min)..=i64::from(self.max)).contains(&value)
    }

    /// `value` if in range, otherwise the default.
    #[must_use]
    pub fn or_default(&self, value: i64) -> u32 {
        if self.contains(value) {
            value as u32
        } else {
            self.default
        }
    }
}

/// The four editable settings fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    PlayersNumber,
    GenerationsPerRound,
    RoundsNumber,
    NewCellsPerRound,
}

impl SettingField {
    /// Every field, in form order.
    pub const ALL: [SettingField; 4] = [
        SettingField::PlayersNumber,
        SettingField::GenerationsPerRound,
        SettingField::RoundsNumber,
        SettingField::NewCellsPerRound,
    ];

    /// Field name as used in config documents and settings forms.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SettingField::PlayersNumber => "players_number",
            SettingField::GenerationsPerRound => "generations_per_round",
            SettingField::RoundsNumber => "rounds_number",
            SettingField::NewCellsPerRound => "new_cells_per_round",
        }
    }

    /// Valid range and default for this field.
    #[must_use]
    pub const fn range(self) -> SettingsRange {
        match self {
            SettingField::PlayersNumber => SettingsRange { min: 1, max: 5, default: 2 },
            SettingField::GenerationsPerRound => SettingsRange { min: 1, max: 50, default: 10 },
            SettingField::RoundsNumber => SettingsRange { min: 1, max: 30, default: 10 },
            SettingField::NewCellsPerRound => SettingsRange { min: 5, max: 100, default: 20 },
        }
    }
}

impl std::fmt::Display for SettingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingField {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingField::ALL
            .into_iter()
            .find(|field| field.name() == s.trim())
            .ok_or_else(|| SettingsError::UnknownField(s.to_string()))
    }
}

/// Validated game configuration.
///
/// ```
/// use life_arena::core::GameSettings;
///
/// // 9 players is out of range and falls back to the default of 2
/// let mut settings = GameSettings::new(9, 10, 5, 20);
/// assert_eq!(settings.players_number(), 2);
///
/// // Invalid assignments are rejected and leave the value untouched
/// assert!(!settings.set_rounds_number(0));
/// assert_eq!(settings.rounds_number(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSettings")]
pub struct GameSettings {
    players_number: u32,
    generations_per_round: u32,
    rounds_number: u32,
    new_cells_per_round: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            players_number: SettingField::PlayersNumber.range().default,
            generations_per_round: SettingField::GenerationsPerRound.range().default,
            rounds_number: SettingField::RoundsNumber.range().default,
            new_cells_per_round: SettingField::NewCellsPerRound.range().default,
        }
    }
}

impl GameSettings {
    /// Build settings, replacing each out-of-range value with its default.
    #[must_use]
    pub fn new(
        players_number: i64,
        generations_per_round: i64,
        rounds_number: i64,
        new_cells_per_round: i64,
    ) -> Self {
        Self {
            players_number: SettingField::PlayersNumber.range().or_default(players_number),
            generations_per_round: SettingField::GenerationsPerRound
                .range()
                .or_default(generations_per_round),
            rounds_number: SettingField::RoundsNumber.range().or_default(rounds_number),
            new_cells_per_round: SettingField::NewCellsPerRound
                .range()
                .or_default(new_cells_per_round),
        }
    }

    /// Build settings, failing on the first out-of-range value.
    pub fn try_new(
        players_number: i64,
        generations_per_round: i64,
        rounds_number: i64,
        new_cells_per_round: i64,
    ) -> Result<Self, SettingsError> {
        let values = [
            players_number,
            generations_per_round,
            rounds_number,
            new_cells_per_round,
        ];
        for (field, value) in SettingField::ALL.into_iter().zip(values) {
            let range = field.range();
            if !range.contains(value) {
                return Err(SettingsError::OutOfRange {
                    field,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        Ok(Self::new(
            players_number,
            generations_per_round,
            rounds_number,
            new_cells_per_round,
        ))
    }

    /// Load settings from a JSON document. Missing or out-of-range fields
    /// take their defaults; only malformed JSON is an error.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn players_number(&self) -> u32 {
        self.players_number
    }

    /// Player count as a collection size.
    #[must_use]
    pub fn players(&self) -> usize {
        self.players_number as usize
    }

    #[must_use]
    pub fn generations_per_round(&self) -> u32 {
        self.generations_per_round
    }

    #[must_use]
    pub fn rounds_number(&self) -> u32 {
        self.rounds_number
    }

    #[must_use]
    pub fn new_cells_per_round(&self) -> u32 {
        self.new_cells_per_round
    }

    /// Cells needed for every player to place a full round of cells.
    #[must_use]
    pub fn placement_capacity(&self) -> usize {
        self.players() * self.new_cells_per_round as usize
    }

    /// Read a field by name.
    #[must_use]
    pub fn get(&self, field: SettingField) -> u32 {
        match field {
            SettingField::PlayersNumber => self.players_number,
            SettingField::GenerationsPerRound => self.generations_per_round,
            SettingField::RoundsNumber => self.rounds_number,
            SettingField::NewCellsPerRound => self.new_cells_per_round,
        }
    }

    /// Assign a field. Returns `false` and keeps the old value if `value`
    /// is out of range.
    pub fn set(&mut self, field: SettingField, value: i64) -> bool {
        if !field.range().contains(value) {
            return false;
        }
        let value = value as u32;
        match field {
            SettingField::PlayersNumber => self.players_number = value,
            SettingField::GenerationsPerRound => self.generations_per_round = value,
            SettingField::RoundsNumber => self.rounds_number = value,
            SettingField::NewCellsPerRound => self.new_cells_per_round = value,
        }
        true
    }

    /// Assign a field from form text. Non-numeric text is rejected like an
    /// out-of-range value.
    pub fn set_field(&mut self, field: SettingField, text: &str) -> bool {
        match text.trim().parse::<i64>() {
            Ok(value) => self.set(field, value),
            Err(_) => false,
        }
    }

    pub fn set_players_number(&mut self, value: i64) -> bool {
        self.set(SettingField::PlayersNumber, value)
    }

    pub fn set_generations_per_round(&mut self, value: i64) -> bool {
        self.set(SettingField::GenerationsPerRound, value)
    }

    pub fn set_rounds_number(&mut self, value: i64) -> bool {
        self.set(SettingField::RoundsNumber, value)
    }

    pub fn set_new_cells_per_round(&mut self, value: i64) -> bool {
        self.set(SettingField::NewCellsPerRound, value)
    }
}

/// Wire shape of [`GameSettings`]; every field optional, nothing validated.
#[derive(Deserialize)]
struct RawSettings {
    players_number: Option<i64>,
    generations_per_round: Option<i64>,
    rounds_number: Option<i64>,
    new_cells_per_round: Option<i64>,
}

impl From<RawSettings> for GameSettings {
    fn from(raw: RawSettings) -> Self {
        // A missing field maps to -1, which every range rejects.
        GameSettings::new(
            raw.players_number.unwrap_or(-1),
            raw.generations_per_round.unwrap_or(-1),
            raw.rounds_number.unwrap_or(-1),
            raw.new_cells_per_round.unwrap_or(-1),
        )
    }
}
