//! Builder for [`GameOfLife`].

use im::Vector;
use tracing::debug;

use crate::core::error::GridError;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::{GameRng, GameRngState, RandomSource};
use crate::core::settings::GameSettings;
use crate::grid::{capacity_size, Grid};
use crate::rules::GameResult;

use super::engine::{GameOfLife, GameStatus, SeedPolicy, TurnOrder};
use super::events::{EventSink, NullSink};

/// Builder for creating a `GameOfLife`.
///
/// ```
/// use life_arena::core::GameSettings;
/// use life_arena::game::{GameBuilder, SeedPolicy, TurnOrder};
///
/// let mut game = GameBuilder::new()
///     .size(20, 15)
///     .settings(GameSettings::new(3, 10, 5, 20))
///     .seed(7)
///     .turn_order(TurnOrder::Fixed)
///     .seeding(SeedPolicy::Random)
///     .build();
///
/// game.start();
/// assert_eq!(game.grid().live_cells(), 60);
/// ```
pub struct GameBuilder {
    cols: usize,
    rows: usize,
    settings: GameSettings,
    seed: u64,
    rng: Option<Box<dyn RandomSource>>,
    sink: Box<dyn EventSink>,
    turn_order: TurnOrder,
    seeding: SeedPolicy,
    stop_when_stalled: bool,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            cols: 30,
            rows: 20,
            settings: GameSettings::default(),
            seed: 0,
            rng: None,
            sink: Box::new(NullSink),
            turn_order: TurnOrder::default(),
            seeding: SeedPolicy::default(),
            stop_when_stalled: false,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested grid size. May be enlarged by `build`.
    pub fn size(mut self, cols: usize, rows: usize) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Seed for the default `GameRng`. Ignored if `random_source` is set.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the default RNG.
    pub fn random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Where lifecycle events go. Defaults to `NullSink`.
    pub fn sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn turn_order(mut self, order: TurnOrder) -> Self {
        self.turn_order = order;
        self
    }

    /// Resume the default `GameRng` from a captured position.
    pub fn rng_state(mut self, state: &GameRngState) -> Self {
        self.seed = state.seed;
        self.rng = Some(Box::new(GameRng::from_state(state)));
        self
    }

    pub fn seeding(mut self, seeding: SeedPolicy) -> Self {
        self.seeding = seeding;
        self
    }

    /// End the game early once the grid repeats itself (period 1 or 2).
    pub fn stop_when_stalled(mut self, stop: bool) -> Self {
        self.stop_when_stalled = stop;
        self
    }

    /// Build an engine in the `Created` state over an empty grid.
    pub fn build(self) -> GameOfLife {
        let required = self.settings.placement_capacity();
        let (cols, rows) = capacity_size(self.cols, self.rows, required);
        if (cols, rows) != (self.cols, self.rows) {
            debug!(
                requested_cols = self.cols,
                requested_rows = self.rows,
                cols,
                rows,
                "grid enlarged to fit placements"
            );
        }

        self.assemble(Grid::new(cols, rows))
    }

    /// Build a running engine (round 1, generation 1) over `grid`.
    ///
    /// No `GameStarted` event is recorded and the grid keeps its size, even
    /// when it is smaller than one round of placements. Fails if the grid
    /// holds a tag above the player count.
    pub fn build_from_grid(self, grid: Grid) -> Result<GameOfLife, GridError> {
        let players = self.settings.players();
        if let Some((x, y, tag)) = grid.cells().find(|&(_, _, tag)| tag as usize > players) {
            return Err(GridError::UnknownOwner { x, y, tag, players });
        }

        let mut game = self.assemble(grid);
        game.status = GameStatus::Running;
        Ok(game)
    }

    fn assemble(self, grid: Grid) -> GameOfLife {
        let mut rng: Box<dyn RandomSource> = match self.rng {
            Some(rng) => rng,
            None => Box::new(GameRng::new(self.seed)),
        };

        let players = self.settings.players();
        let mut players_queue: Vec<PlayerId> = PlayerId::all(players).collect();
        if self.turn_order == TurnOrder::Shuffled {
            rng.shuffle_players(&mut players_queue);
        }

        GameOfLife {
            settings: self.settings,
            grid,
            round: 1,
            generation: 1,
            status: GameStatus::Created,
            current_player: None,
            players_queue,
            turn_order: self.turn_order,
            seeding: self.seeding,
            stop_when_stalled: self.stop_when_stalled,
            previous: None,
            stalled: false,
            winner: GameResult::NoSurvivors,
            placements: PlayerMap::with_value(players, self.settings.new_cells_per_round()),
            history: Vector::new(),
            rng,
            sink: self.sink,
        }
    }
}

impl GameOfLife {
    /// Running engine over a caller-supplied grid with fixed turn order.
    ///
    /// Used to resume from a known position or to replay fixtures.
    pub fn from_grid(grid: Grid, settings: GameSettings) -> Result<Self, GridError> {
        GameBuilder::new()
            .settings(settings)
            .turn_order(TurnOrder::Fixed)
            .build_from_grid(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::MemorySink;

    #[test]
    fn test_default_builder() {
        let game = GameBuilder::new().build();
        assert_eq!((game.cols(), game.rows()), (30, 20));
        assert_eq!(game.settings(), &GameSettings::default());
        assert_eq!(game.status(), GameStatus::Created);
    }

    #[test]
    fn test_zero_size_is_lifted() {
        let game = GameBuilder::new()
            .size(0, 0)
            .settings(GameSettings::new(1, 1, 1, 5))
            .build();
        assert!(game.cols() * game.rows() >= 5);
    }

    #[test]
    fn test_fixed_order() {
        let game = GameBuilder::new()
            .settings(GameSettings::new(5, 10, 10, 20))
            .turn_order(TurnOrder::Fixed)
            .build();
        let expected: Vec<_> = PlayerId::all(5).collect();
        assert_eq!(game.turn_order(), expected.as_slice());
    }

    #[test]
    fn test_shuffled_order_is_seeded() {
        let build = |seed| {
            GameBuilder::new()
                .settings(GameSettings::new(5, 10, 10, 20))
                .seed(seed)
                .build()
                .turn_order()
                .to_vec()
        };
        assert_eq!(build(11), build(11));

        let mut order = build(11);
        order.sort();
        assert_eq!(order, PlayerId::all(5).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_seeding_fills_each_player() {
        let mut game = GameBuilder::new()
            .size(10, 10)
            .settings(GameSettings::new(3, 10, 10, 10))
            .seeding(SeedPolicy::Random)
            .seed(3)
            .build();
        game.start();

        let counts = game.standings();
        for player in PlayerId::all(3) {
            assert_eq!(counts[player], 10);
            assert_eq!(game.placement_remaining(player), 0);
        }
    }

    #[test]
    fn test_from_grid_rejects_unknown_owner() {
        let grid: Grid = "00000\n00300\n00000\n00000\n00000".parse().unwrap();
        let err = GameOfLife::from_grid(grid, GameSettings::new(2, 10, 10, 5)).unwrap_err();
        assert_eq!(err, GridError::UnknownOwner { x: 2, y: 1, tag: 3, players: 2 });
    }

    #[test]
    fn test_from_grid_keeps_undersized_grid() {
        let grid: Grid = "000\n010".parse().unwrap();
        let game = GameOfLife::from_grid(grid.clone(), GameSettings::new(1, 10, 10, 10)).unwrap();
        assert_eq!((game.cols(), game.rows()), (3, 2));
        assert_eq!(game.grid(), &grid);
    }

    #[test]
    fn test_from_grid_is_running() {
        let grid: Grid = "00000\n01110\n00000\n00000\n00000".parse().unwrap();
        let game = GameOfLife::from_grid(grid.clone(), GameSettings::new(1, 10, 10, 5)).unwrap();
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.grid(), &grid);
        assert_eq!((game.round(), game.generation()), (1, 1));
    }

    #[test]
    fn test_sink_receives_start() {
        let sink = MemorySink::new();
        let mut game = GameBuilder::new()
            .settings(GameSettings::new(3, 10, 10, 20))
            .sink(sink.clone())
            .build();
        game.start();
        assert_eq!(sink.lines(), vec!["Game for 3 players started"]);
    }
}
