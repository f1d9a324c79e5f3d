use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{GridBounds, Position, Snake};

/// Pick a new food cell uniformly from the grid
///
/// With `avoid = None` every cell is a candidate, including cells the snake
/// currently occupies. With `avoid = Some(snake)` only free cells are
/// candidates; if the snake fills the whole grid this falls back to any cell.
pub fn spawn_food<R: Rng + ?Sized>(rng: &mut R, bounds: GridBounds, avoid: Option<&Snake>) -> Position {
    if let Some(snake) = avoid {
        let mut free = Vec::with_capacity(bounds.area().saturating_sub(snake.len()));
        free.extend(bounds.cells().filter(|pos| !snake.occupies(*pos)));
        if let Some(pos) = free.choose(rng) {
            return *pos;
        }
    }

    Position::new(
        rng.gen_range(0..bounds.width),
        rng.gen_range(0..bounds.height),
    )
}
