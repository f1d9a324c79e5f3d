//! Interactive play in the terminal
//!
//! One `select!` loop owns everything: keyboard events only latch the
//! heading, the tick timer advances the session and triggers a redraw. The
//! timer is replaced whenever the tick interval changes or the game restarts,
//! so a tick armed for an old interval or an old game never fires.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::game::{Session, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::persistence::{HighScoreKeeper, ScoreStore};
use crate::render::{FrameBuffer, Renderer, Scoreboard, draw_board};

pub struct HumanMode<S: ScoreStore> {
    session: Session,
    high_score: HighScoreKeeper<S>,
    board: FrameBuffer,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S: ScoreStore> HumanMode<S> {
    /// Wrap an idle session; the high score is read from `store` here
    pub fn new(session: Session, store: S) -> Self {
        let config = session.config();
        let board = FrameBuffer::new(config.grid_width, config.grid_height, config.cell_size);
        let high_score = HighScoreKeeper::load(store);
        info!(high_score = high_score.best(), "loaded high score");

        Self {
            session,
            high_score,
            board,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.high_score.commit();
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = self.start_game();
        self.redraw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event, &mut tick_timer) {
                                self.redraw(terminal)?;
                            }
                        }
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Only armed while the session is running
                _ = tick_timer.tick(), if self.session.is_running() => {
                    self.on_tick(&mut tick_timer);
                    self.redraw(terminal)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(score = self.session.score(), "leaving game");
        Ok(())
    }

    /// Handle one terminal event; returns true if the screen needs a redraw
    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> bool {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return false;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => {
                        self.session.set_heading(direction);
                        false
                    }
                    KeyAction::Restart => {
                        *tick_timer = self.start_game();
                        true
                    }
                    KeyAction::Quit => {
                        self.should_quit = true;
                        false
                    }
                    KeyAction::None => false,
                }
            }
            Event::Resize(_, _) => true,
            _ => false,
        }
    }

    /// Reset the session and hand back a freshly armed tick timer
    fn start_game(&mut self) -> Interval {
        self.high_score.start_game();
        self.session.restart();
        self.draw_board();
        arm_tick_timer(self.session.speed().interval())
    }

    fn on_tick(&mut self, tick_timer: &mut Interval) -> TickOutcome {
        let outcome = self.session.tick();

        match outcome {
            TickOutcome::Advanced {
                ate_food: true,
                speed_changed,
            } => {
                if self.high_score.observe(self.session.score()) {
                    debug!(high_score = self.high_score.best(), "new high score");
                }
                if speed_changed {
                    *tick_timer = arm_tick_timer(self.session.speed().interval());
                }
            }
            TickOutcome::Collided(_) => {
                self.high_score.observe(self.session.score());
                self.high_score.commit();
            }
            TickOutcome::Advanced { .. } | TickOutcome::Skipped | TickOutcome::Inactive => {}
        }

        self.draw_board();
        outcome
    }

    fn draw_board(&mut self) {
        draw_board(
            &mut self.board,
            self.session.snake(),
            self.session.food(),
            self.session.config().cell_size,
        );
    }

    fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            high_score: self.high_score.best(),
            new_record: self.high_score.is_new_record(),
        }
    }

    fn redraw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let scoreboard = self.scoreboard();
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &self.session, &self.board, scoreboard);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Timer whose first tick comes one full period from now
fn arm_tick_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
