//! Lifecycle events and the sinks that record them.
//!
//! The engine never talks to a logger directly. Every transition (game
//! started, round closed, game over, life stalled) is handed to the
//! [`EventSink`] the engine was built with. Pick one:
//!
//! - `NullSink`: drop everything (headless runs, benchmarks)
//! - `TracingSink`: structured `tracing` events
//! - `WriterSink`: one text line per event, appended to any `io::Write`
//! - `MemorySink`: shared in-memory buffer, readable while the engine runs

use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use serde::Serialize;

use crate::core::player::PlayerMap;
use crate::rules::GameResult;

/// A game lifecycle transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// `start` was called.
    GameStarted { players: usize },

    /// A round ended and the game continues.
    RoundClosed {
        round: u32,
        counts: PlayerMap<usize>,
        leader: GameResult,
    },

    /// The final round ended, or play stopped early.
    GameOver { result: GameResult },

    /// The grid repeated one of its two previous generations.
    LifeStalled { round: u32, generation: u32 },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::GameStarted { players } => write!(f, "Game for {players} players started"),
            GameEvent::RoundClosed { round, leader, .. } => {
                write!(f, "Round {round} ended. Current leader: {leader}")
            }
            GameEvent::GameOver { result } => write!(f, "Game over. {result}"),
            GameEvent::LifeStalled { round, generation } => {
                write!(f, "Life stalled in round {round}, generation {generation}")
            }
        }
    }
}

/// Receiver for game lifecycle events.
pub trait EventSink {
    /// Record one event. Must not fail the game.
    fn record(&mut self, event: &GameEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &GameEvent) {}
}

/// Forwards events to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted { players } => {
                tracing::info!(players, "{event}");
            }
            GameEvent::RoundClosed { round, leader, .. } => {
                tracing::info!(round, leader = ?leader.leaders(), "{event}");
            }
            GameEvent::GameOver { result } => {
                tracing::info!(winners = ?result.leaders(), "{event}");
            }
            GameEvent::LifeStalled { round, generation } => {
                tracing::info!(round, generation, "{event}");
            }
        }
    }
}

/// Appends one line per event to a writer.
///
/// Write failures are logged and swallowed.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> EventSink for WriterSink<W> {
    fn record(&mut self, event: &GameEvent) {
        if let Err(err) = writeln!(self.writer, "{event}").and_then(|()| self.writer.flush()) {
            tracing::warn!(%err, "failed to write game event");
        }
    }
}

/// In-memory event buffer. Clones share the same buffer, so keep one
/// handle and give another to the engine.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Recorded events rendered as log lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.events.borrow().iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for MemorySink {
    fn record(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
