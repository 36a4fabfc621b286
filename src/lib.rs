//! # life-arena
//!
//! A multiplayer Game of Life engine: several players own cells on one
//! toroidal grid and each generation every player, in turn, advances the
//! whole board under a rule that only counts their own cells.
//!
//! ## Design Principles
//!
//! 1. **One Ruleset**: the player-scoped rule is the only stepping rule.
//!    With one player it is exactly classic Life.
//!
//! 2. **Deterministic Core**: stepping is pure. Randomness (turn order,
//!    seeding) only enters through an injected `RandomSource`.
//!
//! 3. **Presentation Outside**: the engine exposes grid state, counters and
//!    lifecycle events; drawing, input and pacing belong to the driver.
//!
//! ## Modules
//!
//! - `core`: Players, settings, RNG, errors
//! - `grid`: Toroidal owner-tag grid
//! - `rules`: Scoped neighbor counts, per-player steps, winner logic
//! - `game`: Engine lifecycle, builder, event sinks

pub mod core;
pub mod game;
pub mod grid;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    GameRng, GameRngState, GameSettings, GridError, PlayerId, PlayerMap, RandomSource,
    SettingField, SettingsError, EMPTY,
};

pub use crate::grid::Grid;

pub use crate::rules::{GameResult, Leaders};

pub use crate::game::{
    EventSink, GameBuilder, GameEvent, GameOfLife, GameStatus, MemorySink, NullSink,
    RoundSummary, SeedPolicy, StepOutcome, TracingSink, TurnOrder, WriterSink,
};
