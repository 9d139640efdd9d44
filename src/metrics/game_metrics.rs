use std::time::{Duration, Instant};

/// Per-session figures shown in the header. Nothing here outlives the process.
pub struct GameMetrics {
    started_at: Instant,
    pub elapsed_time: Duration,
    /// Clock stops once the game is over
    pub running: bool,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            elapsed_time: Duration::ZERO,
            running: true,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.started_at.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.started_at = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
