//! Terminal shell around the game engine: input, tick scheduling, drawing and sound.

pub mod schedule;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::audio::{AudioSink, Sound};
use crate::game::{GameEngine, GameState, TickResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub use schedule::TickSchedule;

/// Redraw period for the clock in the header; game changes redraw immediately
const CLOCK_REFRESH: Duration = Duration::from_millis(250);

pub struct Shell<A: AudioSink> {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: A,
    should_quit: bool,
}

impl<A: AudioSink> Shell<A> {
    pub fn new(mut engine: GameEngine, audio: A) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks are only scheduled while the game is running
    pub fn wants_ticks(&self) -> bool {
        self.state.is_running()
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticks = TickSchedule::new(self.engine.config().tick_interval());
        let mut render_timer = interval(CLOCK_REFRESH);

        info!(
            width = self.state.grid_width,
            height = self.state.grid_height,
            tick_ms = self.engine.config().tick_interval_ms,
            "Game loop started"
        );

        while !self.should_quit {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event) {
                                self.draw(terminal)?;
                            }
                        }
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = ticks.next() => {
                    self.on_tick();
                    self.draw(terminal)?;
                }

                _ = render_timer.tick() => {
                    self.draw(terminal)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            ticks.sync(self.wants_ticks());
        }

        info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "Game loop finished"
        );
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &self.state, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    /// Returns true when the event changed what is on screen
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(..) => true,
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.input_handler.handle_key_event(key, self.state.phase) {
            KeyAction::Steer(direction) => {
                self.engine.steer(&mut self.state, direction);
                false
            }
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            KeyAction::None => false,
        }
    }

    pub fn on_tick(&mut self) -> TickResult {
        let result = self.engine.tick(&mut self.state);

        if result.ate_food {
            self.audio.play(Sound::Eat);
        }
        if result.ended_game() {
            self.audio.play(Sound::GameOver);
            self.metrics.on_game_over(self.state.score);
        }

        result
    }

    fn restart(&mut self) -> bool {
        if !self.engine.restart(&mut self.state) {
            return false;
        }
        self.metrics.on_game_start();
        true
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
