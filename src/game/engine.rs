//! The simulation engine: grid ownership, turn order, round lifecycle.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::player::{PlayerId, PlayerMap, EMPTY};
use crate::core::rng::{GameRngState, RandomSource};
use crate::core::settings::GameSettings;
use crate::grid::Grid;
use crate::rules::{player_step, GameResult};

use super::builder::GameBuilder;
use super::events::{EventSink, GameEvent};

/// How the player queue is ordered within a generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOrder {
    /// Shuffled at construction and again at every round boundary.
    #[default]
    Shuffled,
    /// Always `1..=N`.
    Fixed,
}

/// How cells get onto the board at the start of each round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedPolicy {
    /// The driver places cells with `add_cell`.
    #[default]
    Manual,
    /// The engine places `new_cells_per_round` random cells per player.
    Random,
}

/// Engine lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Built, `start` not yet called.
    Created,
    /// Accepting `step` calls.
    Running,
    /// All rounds played, or stopped on a stalled board.
    Over,
}

/// What a call to `step` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing: the game is not running.
    Idle,
    /// One generation advanced inside the current round.
    Continued,
    /// The generation closed `round`; the next round is ready for placements.
    RoundClosed { round: u32 },
    /// The game ended on this generation.
    GameOver,
}

/// Standings captured when a round closes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub counts: PlayerMap<usize>,
    pub leader: GameResult,
}

/// Multiplayer Game of Life.
///
/// ## Usage
///
/// ```
/// use life_arena::core::{GameSettings, PlayerId};
/// use life_arena::game::{GameOfLife, StepOutcome};
///
/// let settings = GameSettings::new(2, 3, 2, 5);
/// let mut game = GameOfLife::new((12, 8), settings);
/// game.start();
///
/// // Player 1 places a blinker
/// for x in 2..5 {
///     assert!(game.add_cell(PlayerId::new(1), x, 2));
/// }
///
/// while !game.is_over() {
///     if let StepOutcome::RoundClosed { round } = game.step() {
///         println!("round {round}: {}", game.winner());
///     }
/// }
/// assert!(game.winner().is_winner(PlayerId::new(1)));
/// ```
pub struct GameOfLife {
    pub(super) settings: GameSettings,
    pub(super) grid: Grid,
    pub(super) round: u32,
    pub(super) generation: u32,
    pub(super) status: GameStatus,
    pub(super) current_player: Option<PlayerId>,
    pub(super) players_queue: Vec<PlayerId>,
    pub(super) turn_order: TurnOrder,
    pub(super) seeding: SeedPolicy,
    pub(super) stop_when_stalled: bool,
    /// Grid as it was two generations ago, for period-2 detection.
    pub(super) previous: Option<Grid>,
    pub(super) stalled: bool,
    pub(super) winner: GameResult,
    pub(super) placements: PlayerMap<u32>,
    pub(super) history: Vector<RoundSummary>,
    pub(super) rng: Box<dyn RandomSource>,
    pub(super) sink: Box<dyn EventSink>,
}

impl GameOfLife {
    /// Engine over a `(cols, rows)` grid with default collaborators.
    ///
    /// The grid is enlarged if it cannot hold one round of placements for
    /// every player.
    #[must_use]
    pub fn new(size: (usize, usize), settings: GameSettings) -> Self {
        GameBuilder::new().size(size.0, size.1).settings(settings).build()
    }

    /// Start a fresh game: empty grid, round 1, generation 1.
    pub fn start(&mut self) {
        self.grid.clear();
        self.round = 1;
        self.generation = 1;
        self.status = GameStatus::Running;
        self.current_player = None;
        self.previous = None;
        self.stalled = false;
        self.winner = GameResult::NoSurvivors;
        self.history = Vector::new();
        self.placements.fill(self.settings.new_cells_per_round());

        self.sink.record(&GameEvent::GameStarted {
            players: self.settings.players(),
        });

        if self.seeding == SeedPolicy::Random {
            self.seed_random_cells();
        }
    }

    /// Advance one generation: every player in queue order takes a scoped
    /// step over the whole grid.
    pub fn step(&mut self) -> StepOutcome {
        if self.status != GameStatus::Running {
            debug!(status = ?self.status, "step ignored");
            return StepOutcome::Idle;
        }

        let last = self.grid.clone();
        for &player in &self.players_queue {
            self.current_player = Some(player);
            self.grid = player_step(&self.grid, player);
        }

        self.stalled = self.grid == last || self.previous.as_ref() == Some(&self.grid);
        self.previous = Some(last);

        debug!(
            round = self.round,
            generation = self.generation,
            live = self.grid.live_cells(),
            "generation stepped"
        );

        let stepped = self.generation;
        self.generation += 1;

        if self.stop_when_stalled && self.stalled {
            return self.stop_stalled(stepped);
        }
        if self.generation > self.settings.generations_per_round() {
            return self.close_round();
        }
        StepOutcome::Continued
    }

    /// Claim an empty cell for `player`.
    ///
    /// Returns `false`, leaving the grid untouched, if the cell is owned,
    /// outside the grid, or `player` is not in this game.
    pub fn add_cell(&mut self, player: PlayerId, x: usize, y: usize) -> bool {
        if !player.is_valid(self.settings.players()) || self.grid.get(x, y) != Some(EMPTY) {
            return false;
        }

        self.grid.set(x, y, player.tag());
        if let Some(left) = self.placements.get_mut(player) {
            *left = left.saturating_sub(1);
        }
        debug!(%player, x, y, "cell claimed");
        true
    }

    /// Place `new_cells_per_round` cells per player on random empty cells,
    /// in queue order. Stops early if the board fills up.
    pub fn seed_random_cells(&mut self) {
        let mut empty = self.grid.empty_cells();
        let queue = self.players_queue.clone();

        for player in queue {
            for _ in 0..self.settings.new_cells_per_round() {
                if empty.is_empty() {
                    return;
                }
                let (x, y) = empty.swap_remove(self.rng.pick_index(empty.len()));
                self.add_cell(player, x, y);
            }
        }
    }

    /// Score the current round from the live grid and append its summary.
    fn score_round(&mut self) -> PlayerMap<usize> {
        let counts = self.standings();
        self.winner = GameResult::from_counts(&counts);
        self.history.push_back(RoundSummary {
            round: self.round,
            counts: counts.clone(),
            leader: self.winner.clone(),
        });
        counts
    }

    fn close_round(&mut self) -> StepOutcome {
        let counts = self.score_round();

        let closed = self.round;
        self.round += 1;
        self.generation = 1;
        self.previous = None;

        if self.round > self.settings.rounds_number() {
            return self.finish();
        }

        self.sink.record(&GameEvent::RoundClosed {
            round: closed,
            counts,
            leader: self.winner.clone(),
        });

        if self.turn_order == TurnOrder::Shuffled {
            self.rng.shuffle_players(&mut self.players_queue);
        }
        self.placements.fill(self.settings.new_cells_per_round());
        if self.seeding == SeedPolicy::Random {
            self.seed_random_cells();
        }

        StepOutcome::RoundClosed { round: closed }
    }

    /// End the game on the round and generation that stalled. The round is
    /// scored as played; nothing of the next round is set up.
    fn stop_stalled(&mut self, generation: u32) -> StepOutcome {
        self.sink.record(&GameEvent::LifeStalled {
            round: self.round,
            generation,
        });
        self.score_round();
        self.finish()
    }

    fn finish(&mut self) -> StepOutcome {
        self.status = GameStatus::Over;
        self.sink.record(&GameEvent::GameOver {
            result: self.winner.clone(),
        });
        StepOutcome::GameOver
    }

    // === Queries ===

    /// True once every round has been played (or play stopped on a stall).
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over || self.round > self.settings.rounds_number()
    }

    /// Leader as of the last closed round.
    #[must_use]
    pub fn winner(&self) -> &GameResult {
        &self.winner
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Current round, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Generation within the current round, starting at 1.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Player that moved last, if any generation has been stepped.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current_player
    }

    /// Order in which players step this round.
    #[must_use]
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.players_queue
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Live-cell count per player right now.
    #[must_use]
    pub fn standings(&self) -> PlayerMap<usize> {
        self.grid.owner_counts(self.settings.players())
    }

    /// Cells `player` may still place this round. Informational only:
    /// `add_cell` does not enforce it.
    #[must_use]
    pub fn placement_remaining(&self, player: PlayerId) -> u32 {
        self.placements.get(player).copied().unwrap_or(0)
    }

    /// Whether the last generation reproduced the grid of one of the two
    /// generations before it.
    #[must_use]
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Random-source position, for resuming this game with
    /// [`GameBuilder::rng_state`]. `None` for sources that cannot be restored.
    #[must_use]
    pub fn rng_state(&self) -> Option<GameRngState> {
        self.rng.checkpoint()
    }

    /// One summary per closed round, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<RoundSummary> {
        &self.history
    }
}

impl std::fmt::Debug for GameOfLife {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameOfLife")
            .field("settings", &self.settings)
            .field("cols", &self.grid.cols())
            .field("rows", &self.grid.rows())
            .field("round", &self.round)
            .field("generation", &self.generation)
            .field("status", &self.status)
            .field("turn_order", &self.players_queue)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::MemorySink;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn fixed_game(settings: GameSettings, size: (usize, usize)) -> GameOfLife {
        GameBuilder::new()
            .size(size.0, size.1)
            .settings(settings)
            .turn_order(TurnOrder::Fixed)
            .build()
    }

    #[test]
    fn test_new_game_is_created() {
        let game = GameOfLife::new((10, 10), GameSettings::default());
        assert_eq!(game.status(), GameStatus::Created);
        assert!(!game.is_over());
        assert_eq!(game.grid().live_cells(), 0);
        assert_eq!(game.turn_order().len(), 2);
    }

    #[test]
    fn test_grid_enlarged_to_capacity() {
        // 4 players * 20 cells = 80 > 10 * 6
        let game = GameOfLife::new((10, 6), GameSettings::new(4, 10, 10, 20));
        assert_eq!((game.cols(), game.rows()), (10, 8));
    }

    #[test]
    fn test_step_before_start_is_idle() {
        let mut game = GameOfLife::new((10, 10), GameSettings::default());
        assert_eq!(game.step(), StepOutcome::Idle);
        assert_eq!(game.status(), GameStatus::Created);
    }

    #[test]
    fn test_start_resets_counters_and_grid() {
        let mut game = fixed_game(GameSettings::new(2, 2, 3, 5), (5, 5));
        game.start();
        game.add_cell(p(1), 0, 0);
        game.step();
        game.step();
        assert_eq!(game.round(), 2);

        game.start();
        assert_eq!(game.round(), 1);
        assert_eq!(game.generation(), 1);
        assert_eq!(game.grid().live_cells(), 0);
        assert!(game.history().is_empty());
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn test_add_cell_rules() {
        let mut game = fixed_game(GameSettings::new(2, 10, 10, 5), (5, 5));
        game.start();

        assert!(game.add_cell(p(1), 2, 2));
        assert!(!game.add_cell(p(2), 2, 2));
        assert_eq!(game.grid().get(2, 2), Some(1));

        assert!(!game.add_cell(p(1), 5, 0));
        assert!(!game.add_cell(p(3), 0, 0));
        assert!(!game.add_cell(p(0), 0, 0));
        assert_eq!(game.grid().live_cells(), 1);
    }

    #[test]
    fn test_placement_budget_tracks_claims() {
        let mut game = fixed_game(GameSettings::new(2, 10, 10, 5), (5, 5));
        game.start();
        assert_eq!(game.placement_remaining(p(1)), 5);

        game.add_cell(p(1), 0, 0);
        game.add_cell(p(1), 1, 0);
        assert_eq!(game.placement_remaining(p(1)), 3);
        assert_eq!(game.placement_remaining(p(2)), 5);
        assert_eq!(game.placement_remaining(p(4)), 0);
    }

    #[test]
    fn test_generation_and_round_counters() {
        let mut game = fixed_game(GameSettings::new(1, 3, 2, 5), (5, 5));
        game.start();

        assert_eq!(game.step(), StepOutcome::Continued);
        assert_eq!(game.generation(), 2);
        assert_eq!(game.step(), StepOutcome::Continued);
        assert_eq!(game.step(), StepOutcome::RoundClosed { round: 1 });
        assert_eq!((game.round(), game.generation()), (2, 1));

        game.step();
        game.step();
        assert_eq!(game.step(), StepOutcome::GameOver);
        assert!(game.is_over());
        assert_eq!(game.round(), 3);
        assert_eq!(game.step(), StepOutcome::Idle);
    }

    #[test]
    fn test_current_player_is_last_mover() {
        let mut game = fixed_game(GameSettings::new(3, 10, 10, 5), (5, 5));
        game.start();
        assert_eq!(game.current_player(), None);
        game.step();
        assert_eq!(game.current_player(), Some(p(3)));
    }

    #[test]
    fn test_fixed_order_survives_round_boundaries() {
        let mut game = fixed_game(GameSettings::new(3, 1, 5, 5), (5, 5));
        game.start();
        game.step();
        game.step();
        assert_eq!(game.turn_order(), &[p(1), p(2), p(3)]);
    }

    #[test]
    fn test_stall_detection_on_still_life() {
        let mut game = fixed_game(GameSettings::new(1, 10, 10, 5), (6, 6));
        game.start();
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            game.add_cell(p(1), x, y);
        }

        game.step();
        assert!(game.is_stalled());
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn test_stop_when_stalled() {
        let sink = MemorySink::new();
        let mut game = GameBuilder::new()
            .size(6, 6)
            .settings(GameSettings::new(1, 10, 10, 5))
            .turn_order(TurnOrder::Fixed)
            .stop_when_stalled(true)
            .sink(sink.clone())
            .build();
        game.start();
        for (x, y) in [(1, 2), (2, 2), (3, 2)] {
            game.add_cell(p(1), x, y);
        }

        assert_eq!(game.step(), StepOutcome::Continued);
        assert_eq!(game.step(), StepOutcome::GameOver);
        assert!(game.is_over());
        assert_eq!(*game.winner(), GameResult::Winner(p(1)));
        assert_eq!(
            sink.lines(),
            vec![
                "Game for 1 players started",
                "Life stalled in round 1, generation 2",
                "Game over. Winner: player 1",
            ]
        );
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].leader, GameResult::Winner(p(1)));
    }

    #[test]
    fn test_stall_on_last_generation_scores_that_round() {
        let sink = MemorySink::new();
        let mut game = GameBuilder::new()
            .size(10, 10)
            .settings(GameSettings::new(2, 2, 5, 5))
            .turn_order(TurnOrder::Fixed)
            .stop_when_stalled(true)
            .sink(sink.clone())
            .build();
        game.start();
        game.add_cell(p(1), 1, 1);
        game.add_cell(p(2), 6, 6);

        // Both lone cells die, then the empty board repeats on generation 2
        assert_eq!(game.step(), StepOutcome::Continued);
        assert_eq!(game.step(), StepOutcome::GameOver);

        assert_eq!(game.round(), 1);
        assert_eq!(game.placement_remaining(p(1)), 4);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.history()[0].round, 1);
        assert_eq!(game.history()[0].leader, *game.winner());
        assert_eq!(*game.winner(), GameResult::NoSurvivors);
        assert_eq!(
            sink.lines(),
            vec![
                "Game for 2 players started",
                "Life stalled in round 1, generation 2",
                "Game over. All life was lost",
            ]
        );
    }

    #[test]
    fn test_debug_output() {
        let game = GameOfLife::new((5, 5), GameSettings::new(1, 10, 10, 5));
        let text = format!("{game:?}");
        assert!(text.starts_with("GameOfLife"));
        assert!(text.contains("status: Created"));
    }
}
