use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::debug;

/// Fixed-period tick timer that can be disarmed.
///
/// Disarmed, [`next`](Self::next) never completes, which is how the loop stops
/// ticking once the game is over. Re-arming starts a fresh timer whose first
/// tick fires immediately.
pub struct TickSchedule {
    period: Duration,
    timer: Option<Interval>,
}

impl TickSchedule {
    /// Armed schedule; must be created inside a tokio runtime
    pub fn new(period: Duration) -> Self {
        let mut schedule = Self {
            period,
            timer: None,
        };
        schedule.arm();
        schedule
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Arm or disarm to match whether the game wants ticks
    pub fn sync(&mut self, wants_ticks: bool) {
        match (wants_ticks, self.is_armed()) {
            (true, false) => {
                debug!("Tick scheduling restarted");
                self.arm();
            }
            (false, true) => {
                debug!("Tick scheduling stopped");
                self.timer = None;
            }
            _ => {}
        }
    }

    pub async fn next(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    fn arm(&mut self) {
        let mut timer = interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }
}
