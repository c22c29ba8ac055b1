use std::fmt;

use log::{debug, info, warn};
use rand::Rng;

use super::snake_player::SnakePlayer;

/// Time between two ticks of the game loop.
pub const MILLIS_BETWEEN_FRAMES: u64 = 120;
/// How long the screen flashes after a crash.
pub const FLASH_MILLIS: u64 = 300;
/// Side of the square drawing surface in pixels.
pub const CANVAS_SIZE: u16 = 400;
/// Side of a single grid cell in pixels.
pub const TILE_SIZE: u16 = 20;
/// Distance between a spawn cell and its nearest walls.
pub const SPAWN_OFFSET: i32 = 5;

// These are all defined as usize since they are used a lot with indexing stuff.

/// Board size matching the canvas.
pub const DEFAULT_BOARD_SIZE: usize = (CANVAS_SIZE / TILE_SIZE) as usize;
/// Max board size.
pub const MAX_BOARD_SIZE: usize = 40;
/// Min board size. Both spawn cells have to fit and stay apart.
pub const MIN_BOARD_SIZE: usize = 12;

type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    InvalidBoardSize(usize),
    EmptySnake,
    PlayerCountMismatch { mode: GameMode, players: usize },
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::InvalidBoardSize(size) => write!(
                f,
                "board size {size} is outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"
            ),
            SnakeError::EmptySnake => write!(f, "a snake needs at least one cell"),
            SnakeError::PlayerCountMismatch { mode, players } => write!(
                f,
                "{mode} mode needs {} snakes but {players} were given",
                mode.player_count()
            ),
        }
    }
}

impl std::error::Error for SnakeError {}

/// A cell of the board. `x` grows to the right and `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.value();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Direction a [`SnakePlayer`] can travel in the [`SnakeGame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const VARIANTS: &'static [Direction] = &[Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector as `(dx, dy)`.
    #[must_use]
    pub fn value(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[must_use]
    pub fn get_opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    #[must_use]
    pub fn same_axis(&self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Solo,
    Multi,
}

impl GameMode {
    pub const VALUES: [Self; 2] = [Self::Solo, Self::Multi];

    #[must_use]
    pub fn player_count(&self) -> usize {
        match self {
            GameMode::Solo => 1,
            GameMode::Multi => 2,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Solo => write!(f, "Solo"),
            GameMode::Multi => write!(f, "Multiplayer"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Running,
    GameOver,
}

/// What a snake ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    Opponent,
    OwnBody,
}

/// Result of a single [`SnakeGame::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session was not running. Nothing changed.
    Halted,
    /// Every participating snake moved. `fed` lists the ids of the ones that ate.
    Moved { fed: Vec<usize> },
    /// A snake crashed and the session is over.
    Crashed {
        player_id: usize,
        collision: CollisionKind,
    },
}

/// Read-only copy of what a frame needs to draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeSnapshot {
    pub board_size: usize,
    pub snake_one: Vec<Cell>,
    pub snake_two: Vec<Cell>,
    pub food: Cell,
    pub scores: [u32; 2],
    pub mode: GameMode,
    pub game_over: bool,
}

/// Model of the Snake Game.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    snakes: Vec<SnakePlayer>,
    food: Cell,
    board_size: usize,
    bound: i32,
    mode: GameMode,
    phase: GamePhase,
}

impl SnakeGame {
    /// Creates an idle game on a `board_size` by `board_size` grid.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::InvalidBoardSize`] if the size is outside
    /// [`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`].
    pub fn new(board_size: usize) -> Result<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            return Err(SnakeError::InvalidBoardSize(board_size));
        }
        let bound =
            i32::try_from(board_size).map_err(|_| SnakeError::InvalidBoardSize(board_size))?;
        Ok(Self {
            snakes: Vec::new(),
            food: Cell::new(bound / 2, bound / 2),
            board_size,
            bound,
            mode: GameMode::Solo,
            phase: GamePhase::Idle,
        })
    }

    /// Creates a running game from explicit snakes and food.
    ///
    /// Snakes are resolved in the order given, so `snakes[0]` moves first.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the board size is invalid or the number of
    /// snakes does not match `mode`.
    pub fn with_layout(
        board_size: usize,
        mode: GameMode,
        snakes: Vec<SnakePlayer>,
        food: Cell,
    ) -> Result<Self> {
        let mut game = Self::new(board_size)?;
        if snakes.len() != mode.player_count() {
            return Err(SnakeError::PlayerCountMismatch {
                mode,
                players: snakes.len(),
            });
        }
        game.snakes = snakes;
        game.food = food;
        game.mode = mode;
        game.phase = GamePhase::Running;
        Ok(game)
    }

    /// Resets every piece of session state and starts ticking in `mode`.
    pub fn start(&mut self, mode: GameMode) {
        self.start_with(mode, &mut rand::thread_rng());
    }

    pub fn start_with<R: Rng>(&mut self, mode: GameMode, rng: &mut R) {
        let near = SPAWN_OFFSET;
        let far = self.bound - SPAWN_OFFSET;
        let mut snakes = Vec::with_capacity(mode.player_count());
        snakes.push(SnakePlayer::new(0, Cell::new(near, near), Direction::Right));
        if mode == GameMode::Multi {
            snakes.push(SnakePlayer::new(1, Cell::new(far, far), Direction::Left));
        }
        self.snakes = snakes;
        self.mode = mode;
        self.food = self.random_cell(rng);
        self.phase = GamePhase::Running;
        info!(
            "Started {} game on a {}x{} board",
            mode, self.board_size, self.board_size
        );
    }

    /// Starts a fresh session in the mode of the current one.
    pub fn restart(&mut self) {
        debug!("Restarting {} game", self.mode);
        self.start(self.mode);
    }

    /// Buffers a direction command for a snake.
    ///
    /// Returns false if the command was dropped.
    pub fn push_direction(&mut self, player_id: usize, direction: Direction) -> bool {
        if self.phase != GamePhase::Running {
            debug!("Ignoring {direction:?} for snake {player_id}: game not running");
            return false;
        }
        let Some(snake) = self.snakes.get_mut(player_id) else {
            debug!(
                "Tried to steer snake {} but there are only {}",
                player_id,
                self.snakes.len()
            );
            return false;
        };
        snake.push_move(direction)
    }

    /// Advances the game by one tick.
    pub fn advance(&mut self) -> TickOutcome {
        self.advance_with(&mut rand::thread_rng())
    }

    /// Advances the game by one tick, drawing food cells from `rng`.
    ///
    /// Snakes move one after the other. A later snake sees the cells of the
    /// earlier ones after they moved, never the other way around.
    pub fn advance_with<R: Rng>(&mut self, rng: &mut R) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Halted;
        }
        let mut fed = Vec::new();
        for snake_indx in 0..self.snakes.len() {
            match self.move_snake(snake_indx, rng) {
                Ok(true) => fed.push(self.snakes[snake_indx].player_id),
                Ok(false) => (),
                Err(collision) => {
                    let player_id = self.snakes[snake_indx].player_id;
                    self.phase = GamePhase::GameOver;
                    info!("Game over. Snake {player_id} crashed: {collision:?}");
                    return TickOutcome::Crashed {
                        player_id,
                        collision,
                    };
                }
            }
        }
        TickOutcome::Moved { fed }
    }

    /// Moves one snake. Returns whether it ate, or what it ran into.
    fn move_snake<R: Rng>(
        &mut self,
        snake_indx: usize,
        rng: &mut R,
    ) -> std::result::Result<bool, CollisionKind> {
        let snake = &mut self.snakes[snake_indx];
        let direction = snake.pop_next_move();
        let Some(front) = snake.head() else {
            warn!("Snake {snake_indx} has no cells. Skipping it");
            return Ok(false);
        };
        let new_head = front.moved(direction);
        if let Some(collision) = self.collision_at(snake_indx, new_head) {
            return Err(collision);
        }

        let ate = new_head == self.food;
        let snake = &mut self.snakes[snake_indx];
        snake.push_head(new_head);
        if ate {
            snake.score += 1;
            debug!("Snake {} ate. Score {}", snake.player_id, snake.score);
            self.food = self.random_cell(rng);
        } else if snake.drop_tail().is_none() {
            debug!("Removed from back but got None");
        }
        Ok(ate)
    }

    /// Checks walls, then every other snake, then the snake's own body.
    fn collision_at(&self, snake_indx: usize, cell: Cell) -> Option<CollisionKind> {
        if !self.in_bounds(cell) {
            return Some(CollisionKind::Wall);
        }
        if self.mode == GameMode::Multi
            && self
                .snakes
                .iter()
                .enumerate()
                .any(|(i, other)| i != snake_indx && other.occupies(cell))
        {
            return Some(CollisionKind::Opponent);
        }
        if self.snakes[snake_indx].body_collides(cell) {
            return Some(CollisionKind::OwnBody);
        }
        None
    }

    /// Uniform over the whole board. Cells under a snake are not excluded.
    fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.bound), rng.gen_range(0..self.bound))
    }

    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.bound).contains(&cell.x) && (0..self.bound).contains(&cell.y)
    }

    #[must_use]
    pub fn snapshot(&self) -> SnakeSnapshot {
        let cells_of = |indx: usize| {
            self.snakes
                .get(indx)
                .map(|s| s.cells().iter().copied().collect::<Vec<_>>())
                .unwrap_or_default()
        };
        let score_of = |indx: usize| self.snakes.get(indx).map_or(0, |s| s.score);
        SnakeSnapshot {
            board_size: self.board_size,
            snake_one: cells_of(0),
            snake_two: cells_of(1),
            food: self.food,
            scores: [score_of(0), score_of(1)],
            mode: self.mode,
            game_over: self.is_game_over(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[must_use]
    pub fn get_mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn get_size(&self) -> usize {
        self.board_size
    }

    #[must_use]
    pub fn get_food(&self) -> Cell {
        self.food
    }

    #[must_use]
    pub fn get_player(&self, player: usize) -> Option<&SnakePlayer> {
        self.snakes.get(player)
    }

    #[must_use]
    pub fn get_all_players(&self) -> &Vec<SnakePlayer> {
        &self.snakes
    }
}
