use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;

/// Terminal columns used by one grid cell
const CELL_WIDTH: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let grid_area = centered(
            grid_extent(state.grid_width, CELL_WIDTH),
            grid_extent(state.grid_height, 1),
            chunks[1],
        );
        // Grids larger than the terminal are cut at the bottom right
        let visible_cols = (grid_area.width.saturating_sub(2) / CELL_WIDTH) as usize;
        let visible_rows = grid_area.height.saturating_sub(2) as usize;
        frame.render_widget(
            self.render_grid(
                state,
                visible_cols.min(state.grid_width),
                visible_rows.min(state.grid_height),
            ),
            grid_area,
        );

        // Final frame keeps the board visible underneath the overlay
        if state.is_game_over() {
            let overlay = centered(32, 8, grid_area);
            frame.render_widget(Clear, overlay);
            frame.render_widget(self.render_game_over(state, metrics), overlay);
        }

        frame.render_widget(self.render_controls(state), chunks[2]);
    }

    fn render_grid(&self, state: &GameState, cols: usize, rows: usize) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(rows);

        for y in 0..rows {
            let mut spans = Vec::with_capacity(cols);

            for x in 0..cols {
                let pos = Position::new(x as i32, y as i32);

                // Food is painted over the snake when it spawns underneath
                let cell = if pos == state.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(state.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Game Over",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  (games: {})", metrics.games_played),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to Restart", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let mut spans = if state.is_game_over() {
            vec![
                Span::styled("Space", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
            ]
        } else {
            vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
            ]
        };
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal cells needed for `cells` grid cells plus the border, saturating
fn grid_extent(cells: usize, cell_width: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(cell_width)
        .saturating_add(2)
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Phase};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn draw(state: &GameState, metrics: &GameMetrics) -> Buffer {
        let backend = TestBackend::new(60, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        terminal
            .draw(|frame| renderer.render(frame, state, metrics))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn state() -> GameState {
        let mut engine = GameEngine::new(GameConfig {
            seed: Some(1),
            ..Default::default()
        })
        .unwrap();
        let mut state = engine.reset();
        state.food = Position::new(15, 3);
        state
    }

    #[test]
    fn test_running_frame() {
        let state = state();
        let text = rows(&draw(&state, &GameMetrics::new())).concat();

        assert!(text.contains("Score: 0"));
        assert!(text.contains("Snake"));
        assert!(text.contains('●'));
        assert!(!text.contains("Game Over"));
    }

    #[test]
    fn test_snake_cells_drawn() {
        let state = state();
        let text = rows(&draw(&state, &GameMetrics::new())).concat();

        let snake_cells = text.matches('■').count();
        assert_eq!(snake_cells, state.snake.len());
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = state();
        state.score = 4;
        state.phase = Phase::GameOver;

        let text = rows(&draw(&state, &GameMetrics::new())).concat();

        assert!(text.contains("Game Over"));
        assert!(text.contains("Press Space to Restart"));
        assert!(text.contains("Score: 4"));
    }

    #[test]
    fn test_food_under_body_stays_visible() {
        let mut state = state();
        state.food = state.snake.body[1];

        let text = rows(&draw(&state, &GameMetrics::new())).concat();

        assert!(text.contains('●'));
        assert_eq!(text.matches('■').count(), state.snake.len() - 1);
    }

    #[test]
    fn test_oversized_grid_is_clipped() {
        let config = GameConfig {
            grid_width: 40_000,
            grid_height: 70_000,
            seed: Some(1),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let mut engine = GameEngine::new(config).unwrap();
        let state = engine.reset();

        let text = rows(&draw(&state, &GameMetrics::new())).concat();

        assert!(text.contains("Score: 0"));
        assert!(text.contains("Snake"));
    }

    #[test]
    fn test_grid_extent_saturates() {
        assert_eq!(grid_extent(20, CELL_WIDTH), 42);
        assert_eq!(grid_extent(40_000, CELL_WIDTH), u16::MAX);
        assert_eq!(grid_extent(usize::MAX, 1), u16::MAX);
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(6, 2, area), Rect::new(2, 1, 6, 2));
        assert_eq!(centered(50, 50, area), area);
    }
}
