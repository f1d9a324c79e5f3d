//! One game session: the state the game loop owns between ticks
//!
//! The session is synchronous. Whoever drives it decides when `tick` runs;
//! see `modes::human` for the timer-driven loop.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    direction::Direction,
    engine::{GridEngine, MoveEngine, MoveResult},
    food::spawn_food,
    speed::Speed,
    state::{CollisionType, Position, Snake},
};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created but not started
    Idle,
    /// Ticking
    Running,
    /// Ended by a collision; only a restart leaves this phase
    GameOver,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved one cell
    Advanced { ate_food: bool, speed_changed: bool },
    /// The snake crashed and the session is over
    Collided(CollisionType),
    /// The engine call failed; nothing changed
    Skipped,
    /// The session is not running
    Inactive,
}

pub struct Session {
    config: GameConfig,
    engine: Box<dyn MoveEngine>,
    rng: StdRng,
    snake: Snake,
    food: Position,
    heading: Direction,
    speed: Speed,
    score: u32,
    ticks: u64,
    phase: Phase,
    last_collision: Option<CollisionType>,
}

impl Session {
    /// Create an idle session using the built-in grid engine
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an idle session with a seeded food generator
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let engine = Box::new(GridEngine::new(config.bounds()));
        Self::with_engine(config, engine, rng)
    }

    /// Create an idle session around any movement engine
    pub fn with_engine(config: GameConfig, engine: Box<dyn MoveEngine>, rng: StdRng) -> Self {
        let heading = Direction::Up;
        let snake = Snake::new(config.bounds().center(), heading, config.initial_snake_length);
        let speed = Speed::from_config(&config);

        Self {
            food: config.bounds().center(),
            config,
            engine,
            rng,
            snake,
            heading,
            speed,
            score: 0,
            ticks: 0,
            phase: Phase::Idle,
            last_collision: None,
        }
    }

    /// Reset everything and enter `Running`
    pub fn start(&mut self) {
        let bounds = self.config.bounds();
        self.heading = Direction::Up;
        self.snake = Snake::new(bounds.center(), self.heading, self.config.initial_snake_length);
        self.food = self.relocate_food();
        self.speed.reset();
        self.score = 0;
        self.ticks = 0;
        self.last_collision = None;
        self.phase = Phase::Running;

        info!(
            food = ?self.food,
            interval_ms = self.speed.interval().as_millis() as u64,
            "session started"
        );
    }

    /// Full reset from any phase
    pub fn restart(&mut self) {
        debug!(phase = ?self.phase, score = self.score, "restart requested");
        self.start();
    }

    /// Latch a new heading; read by the next tick
    ///
    /// Reversals are not filtered. Writes outside `Running` are ignored.
    pub fn set_heading(&mut self, heading: Direction) {
        if self.phase == Phase::Running {
            self.heading = heading;
        }
    }

    /// Advance the game by one cell
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Inactive;
        }

        let result = match self.engine.advance(&self.snake, self.heading, self.food) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "movement engine failed, skipping tick");
                return TickOutcome::Skipped;
            }
        };

        match result {
            MoveResult::Collided(collision) => {
                self.phase = Phase::GameOver;
                self.last_collision = Some(collision);
                info!(
                    score = self.score,
                    ticks = self.ticks,
                    cause = collision.describe(),
                    "game over"
                );
                TickOutcome::Collided(collision)
            }
            MoveResult::Moved { snake, ate_food } => {
                self.snake = snake;
                self.ticks += 1;

                let mut speed_changed = false;
                if ate_food {
                    self.score += 1;
                    self.food = self.relocate_food();
                    speed_changed = self.speed.accelerate();
                    debug!(
                        score = self.score,
                        food = ?self.food,
                        interval_ms = self.speed.interval().as_millis() as u64,
                        "food eaten"
                    );
                }

                TickOutcome::Advanced {
                    ate_food,
                    speed_changed,
                }
            }
        }
    }

    fn relocate_food(&mut self) -> Position {
        let avoid = self.config.food_avoids_snake.then_some(&self.snake);
        spawn_food(&mut self.rng, self.config.bounds(), avoid)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn speed(&self) -> &Speed {
        &self.speed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn last_collision(&self) -> Option<CollisionType> {
        self.last_collision
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, snake: Snake, heading: Direction, food: Position) {
        self.snake = snake;
        self.heading = heading;
        self.food = food;
    }
}
