//! Core engine types: players, settings, RNG, errors.
//!
//! These are the leaf building blocks the grid and the game engine share.

pub mod error;
pub mod player;
pub mod rng;
pub mod settings;

pub use error::{GridError, SettingsError};
pub use player::{PlayerId, PlayerMap, EMPTY};
pub use rng::{GameRng, GameRngState, RandomSource};
pub use settings::{GameSettings, SettingField, SettingsRange};
