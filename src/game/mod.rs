//! The simulation engine and its collaborators.
//!
//! A driver builds a [`GameOfLife`], calls `start`, then calls `step` once
//! per generation, placing cells with `add_cell` between steps. After each
//! round boundary it inspects `is_over` and `winner`. Rendering, input and
//! pacing stay on the driver's side.
//!
//! ```
//! use life_arena::core::{GameSettings, PlayerId};
//! use life_arena::game::{GameBuilder, MemorySink, TurnOrder};
//!
//! let log = MemorySink::new();
//! let mut game = GameBuilder::new()
//!     .size(8, 8)
//!     .settings(GameSettings::new(2, 1, 1, 5))
//!     .turn_order(TurnOrder::Fixed)
//!     .sink(log.clone())
//!     .build();
//!
//! game.start();
//! game.step();
//!
//! assert!(game.is_over());
//! assert_eq!(log.lines().last().unwrap(), "Game over. All life was lost");
//! ```

mod builder;
mod engine;
pub mod events;

pub use builder::GameBuilder;
pub use engine::{GameOfLife, GameStatus, RoundSummary, SeedPolicy, StepOutcome, TurnOrder};
pub use events::{EventSink, GameEvent, MemorySink, NullSink, TracingSink, WriterSink};
