//! Pixel drawing surface
//!
//! The board is drawn as filled squares on a raster surface, one square per
//! occupied cell. A square is `cell_size - 1` pixels wide so a one pixel gap
//! separates neighbouring cells.

use ratatui::style::Color;

use crate::game::{Position, Snake};

pub const BACKGROUND_COLOR: Color = Color::Black;
pub const SNAKE_COLOR: Color = Color::Green;
pub const FOOD_COLOR: Color = Color::Red;

/// A raster surface addressed in pixels
pub trait Surface {
    /// Fill the whole surface with one colour
    fn clear(&mut self, color: Color);

    /// Fill a `width` x `height` rectangle whose top-left corner is at `(x, y)`
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color);
}

/// Paint one grid cell as a square with a one pixel gap
///
/// Cells with negative coordinates, or whose pixel offset does not fit in a
/// `u32`, are not drawn.
pub fn fill_cell<S: Surface + ?Sized>(surface: &mut S, cell: Position, cell_size: u32, color: Color) {
    let Some((x, y)) = cell_origin(cell, cell_size) else {
        return;
    };
    let side = cell_size.saturating_sub(1);
    surface.fill_rect(x, y, side, side, color);
}

/// Top-left pixel of a cell
fn cell_origin(cell: Position, cell_size: u32) -> Option<(u32, u32)> {
    let x = u32::try_from(cell.x).ok()?.checked_mul(cell_size)?;
    let y = u32::try_from(cell.y).ok()?.checked_mul(cell_size)?;
    Some((x, y))
}

/// Draw a full frame: background, snake, then food
pub fn draw_board<S: Surface + ?Sized>(surface: &mut S, snake: &Snake, food: Position, cell_size: u32) {
    surface.clear(BACKGROUND_COLOR);

    for segment in snake.cells() {
        fill_cell(surface, *segment, cell_size, SNAKE_COLOR);
    }

    fill_cell(surface, food, cell_size, FOOD_COLOR);
}

/// In-memory surface that keeps one colour per grid cell
///
/// A rectangle colours every cell whose top-left pixel it covers, which is
/// exactly one cell for the squares drawn by [`fill_cell`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    columns: usize,
    rows: usize,
    cell_size: u32,
    cells: Vec<Color>,
}

impl FrameBuffer {
    pub fn new(columns: usize, rows: usize, cell_size: u32) -> Self {
        Self {
            columns,
            rows,
            cell_size: cell_size.max(1),
            cells: vec![BACKGROUND_COLOR; columns * rows],
        }
    }

    /// Colour of the cell at `(column, row)`
    pub fn color_at(&self, column: usize, row: usize) -> Option<Color> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Iterate rows of cell colours, top to bottom
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.columns.max(1))
    }
}

impl Surface for FrameBuffer {
    fn clear(&mut self, color: Color) {
        self.cells.fill(color);
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        if width == 0 || height == 0 {
            return;
        }

        let size = self.cell_size as u64;
        let (x, y) = (x as u64, y as u64);
        let (right, bottom) = (x + width as u64, y + height as u64);

        let first_column = x.div_ceil(size);
        let first_row = y.div_ceil(size);

        for row in first_row..self.rows as u64 {
            if row * size >= bottom {
                break;
            }
            for column in first_column..self.columns as u64 {
                if column * size >= right {
                    break;
                }
                self.cells[row as usize * self.columns + column as usize] = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum DrawCall {
        Clear(Color),
        Fill(u32, u32, u32, u32, Color),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<DrawCall>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, color: Color) {
            self.calls.push(DrawCall::Clear(color));
        }

        fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
            self.calls.push(DrawCall::Fill(x, y, width, height, color));
        }
    }

    #[test]
    fn test_draw_board_commands() {
        let snake = Snake::from_cells([(10, 10), (10, 11)]);
        let mut surface = RecordingSurface::default();

        draw_board(&mut surface, &snake, Position::new(5, 5), 20);

        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Clear(BACKGROUND_COLOR),
                DrawCall::Fill(200, 200, 19, 19, SNAKE_COLOR),
                DrawCall::Fill(200, 220, 19, 19, SNAKE_COLOR),
                DrawCall::Fill(100, 100, 19, 19, FOOD_COLOR),
            ]
        );
    }

    #[test]
    fn test_frame_buffer_maps_squares_to_cells() {
        let snake = Snake::from_cells([(0, 0), (1, 0), (1, 1)]);
        let mut buffer = FrameBuffer::new(4, 3, 20);

        draw_board(&mut buffer, &snake, Position::new(3, 2), 20);

        assert_eq!(buffer.color_at(0, 0), Some(SNAKE_COLOR));
        assert_eq!(buffer.color_at(1, 0), Some(SNAKE_COLOR));
        assert_eq!(buffer.color_at(1, 1), Some(SNAKE_COLOR));
        assert_eq!(buffer.color_at(3, 2), Some(FOOD_COLOR));
        assert_eq!(buffer.color_at(2, 0), Some(BACKGROUND_COLOR));
        assert_eq!(buffer.color_at(0, 1), Some(BACKGROUND_COLOR));
        assert_eq!(buffer.color_at(4, 0), None);
        assert_eq!(buffer.rows_iter().count(), 3);
    }

    #[test]
    fn test_frame_buffer_clears_between_frames() {
        let mut buffer = FrameBuffer::new(2, 2, 10);
        fill_cell(&mut buffer, Position::new(1, 1), 10, SNAKE_COLOR);
        assert_eq!(buffer.color_at(1, 1), Some(SNAKE_COLOR));

        buffer.clear(BACKGROUND_COLOR);
        assert!(buffer.rows_iter().flatten().all(|c| *c == BACKGROUND_COLOR));
    }

    #[test]
    fn test_off_grid_cells_are_not_drawn() {
        let mut buffer = FrameBuffer::new(2, 2, 10);
        fill_cell(&mut buffer, Position::new(-1, 0), 10, SNAKE_COLOR);
        fill_cell(&mut buffer, Position::new(5, 5), 10, SNAKE_COLOR);
        assert!(buffer.rows_iter().flatten().all(|c| *c == BACKGROUND_COLOR));
    }

    #[test]
    fn test_cells_past_pixel_range_are_not_drawn() {
        let mut surface = RecordingSurface::default();
        fill_cell(&mut surface, Position::new(10, 0), u32::MAX / 4, SNAKE_COLOR);
        fill_cell(&mut surface, Position::new(1, 3), u32::MAX / 4, FOOD_COLOR);

        assert_eq!(
            surface.calls,
            vec![DrawCall::Fill(
                u32::MAX / 4,
                3 * (u32::MAX / 4),
                u32::MAX / 4 - 1,
                u32::MAX / 4 - 1,
                FOOD_COLOR
            )]
        );
    }
}
