//! Movement engine
//!
//! A single grid transition: given the body, the heading and the food cell,
//! compute the next body or report a collision. Nothing here keeps state
//! between calls.

use thiserror::Error;

use super::{
    direction::Direction,
    state::{CollisionType, GridBounds, Position, Snake},
};

/// Failures of a movement engine call
///
/// The game loop treats these as transient: the tick is skipped and the game
/// goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The snake had no segments to move
    #[error("cannot move an empty snake")]
    EmptySnake,

    /// The engine could not be reached or did not answer
    #[error("movement engine unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of one move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    /// The snake moved; it grew by one segment if it ate the food
    Moved { snake: Snake, ate_food: bool },
    /// The new head left the grid or hit the body. No body is returned.
    Collided(CollisionType),
}

impl MoveResult {
    /// The new body, or `None` on collision
    pub fn snake(&self) -> Option<&Snake> {
        match self {
            MoveResult::Moved { snake, .. } => Some(snake),
            MoveResult::Collided(_) => None,
        }
    }

    pub fn ate_food(&self) -> bool {
        matches!(self, MoveResult::Moved { ate_food: true, .. })
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, MoveResult::Collided(_))
    }
}

/// Anything that can advance a snake by one cell
pub trait MoveEngine {
    fn advance(
        &self,
        snake: &Snake,
        heading: Direction,
        food: Position,
    ) -> Result<MoveResult, EngineError>;
}

/// Move a body one cell towards `heading`
///
/// Wall collisions are checked before self collisions. Every current segment
/// counts as occupied, including a tail that would be vacated on this move.
pub fn move_snake(
    body: &[Position],
    heading: Direction,
    food: Position,
    bounds: GridBounds,
) -> Result<MoveResult, EngineError> {
    let head = body.first().ok_or(EngineError::EmptySnake)?;
    let new_head = head.moved_in_direction(heading);

    if let Some(collision) = check_collision(body, new_head, bounds) {
        return Ok(MoveResult::Collided(collision));
    }

    let ate_food = new_head == food;
    let kept = if ate_food { body.len() } else { body.len() - 1 };

    let mut cells = Vec::with_capacity(kept + 1);
    cells.push(new_head);
    cells.extend_from_slice(&body[..kept]);

    Ok(MoveResult::Moved {
        snake: Snake::from_cells(cells),
        ate_food,
    })
}

/// Check if a new head position causes a collision
pub fn check_collision(
    body: &[Position],
    new_head: Position,
    bounds: GridBounds,
) -> Option<CollisionType> {
    if !bounds.contains(new_head) {
        return Some(CollisionType::Wall);
    }

    if body.contains(&new_head) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// The in-process movement engine for a fixed grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridEngine {
    bounds: GridBounds,
}

impl GridEngine {
    pub fn new(bounds: GridBounds) -> Self {
        Self { bounds }
    }
}

impl MoveEngine for GridEngine {
    fn advance(
        &self,
        snake: &Snake,
        heading: Direction,
        food: Position,
    ) -> Result<MoveResult, EngineError> {
        move_snake(snake.cells(), heading, food, self.bounds)
    }
}
