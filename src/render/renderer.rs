use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::surface::{BACKGROUND_COLOR, FOOD_COLOR, FrameBuffer, SNAKE_COLOR};
use crate::game::{Session, Speed};

/// High score figures shown next to the live score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub high_score: u32,
    /// The current game set the high score
    pub new_record: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        session: &Session,
        board: &FrameBuffer,
        scoreboard: Scoreboard,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session, scoreboard);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if session.is_over() {
            let game_over = self.render_game_over(session, scoreboard);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(board);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, board: &FrameBuffer) -> Paragraph<'_> {
        let lines: Vec<Line> = board
            .rows_iter()
            .map(|row| Line::from(row.iter().map(|color| cell_span(*color)).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, session: &Session, scoreboard: Scoreboard) -> Paragraph<'_> {
        let speed = session.speed();
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                scoreboard.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(speed_label(speed), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Heading: ", Style::default().fg(Color::Yellow)),
            Span::styled(session.heading().label(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, session: &Session, scoreboard: Scoreboard) -> Paragraph<'_> {
        let cause = session
            .last_collision()
            .map(|collision| format!("The snake {}", collision.describe()))
            .unwrap_or_default();

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    scoreboard.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        if scoreboard.new_record {
            text.push(Line::from(Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tick interval and level; the level reads "max" once the floor is reached
fn speed_label(speed: &Speed) -> String {
    let millis = speed.interval().as_millis();
    if speed.is_at_minimum() {
        format!("{millis}ms (max)")
    } else {
        format!("{millis}ms (lv {})", speed.level())
    }
}

/// Terminal glyph for one cell of the frame buffer
fn cell_span(color: Color) -> Span<'static> {
    match color {
        c if c == BACKGROUND_COLOR => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        c if c == SNAKE_COLOR => Span::styled("■ ", Style::default().fg(SNAKE_COLOR)),
        c if c == FOOD_COLOR => Span::styled(
            "O ",
            Style::default().fg(FOOD_COLOR).add_modifier(Modifier::BOLD),
        ),
        other => Span::styled("■ ", Style::default().fg(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Position, Snake};
    use crate::render::surface::draw_board;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cell_spans() {
        assert_eq!(cell_span(BACKGROUND_COLOR).content, ". ");
        assert_eq!(cell_span(SNAKE_COLOR).content, "■ ");
        assert_eq!(cell_span(FOOD_COLOR).content, "O ");
    }

    #[test]
    fn test_speed_label_reads_max_at_floor() {
        let mut speed = Speed::new(
            Duration::from_millis(54),
            Duration::from_millis(2),
            Duration::from_millis(50),
        );
        assert_eq!(speed_label(&speed), "54ms (lv 0)");

        speed.accelerate();
        assert_eq!(speed_label(&speed), "52ms (lv 1)");

        speed.accelerate();
        assert_eq!(speed_label(&speed), "50ms (max)");
    }

    #[test]
    fn test_render_running_game() {
        let config = GameConfig::small();
        let mut session = Session::with_seed(config.clone(), 3);
        session.start();

        let mut board = FrameBuffer::new(config.grid_width, config.grid_height, config.cell_size);
        draw_board(&mut board, session.snake(), Position::new(0, 0), config.cell_size);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                Renderer::new().render(
                    frame,
                    &session,
                    &board,
                    Scoreboard {
                        high_score: 12,
                        new_record: false,
                    },
                )
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("High: 12"));
        assert!(text.contains("150ms"));
        assert!(text.contains("Snake"));
    }

    #[test]
    fn test_render_game_over() {
        let config = GameConfig::default();
        let mut session = Session::with_seed(config.clone(), 3);
        session.start();
        session.place(
            Snake::from_cells([(0, 0)]),
            crate::game::Direction::Left,
            Position::new(5, 5),
        );
        session.tick();
        assert!(session.is_over());

        let board = FrameBuffer::new(config.grid_width, config.grid_height, config.cell_size);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                Renderer::new().render(
                    frame,
                    &session,
                    &board,
                    Scoreboard {
                        high_score: 4,
                        new_record: true,
                    },
                )
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("hit the wall"));
        assert!(text.contains("NEW HIGH SCORE!"));
    }
}
