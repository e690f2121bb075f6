//! One-second interrupt for the running timer.
//!
//! The interval only exists while the timer runs. Pausing or stopping drops
//! it, so a disarmed ticker holds no timer resources and never fires.

use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        Self { period, interval: None }
    }

    /// Start ticking one period from now. Already armed tickers keep their phase.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn disarm(&mut self) {
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Arm or disarm to match whether the timer is running.
    pub fn sync(&mut self, running: bool) {
        if running {
            self.arm();
        } else {
            self.disarm();
        }
    }

    /// Resolves on the next tick; pends forever while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn armed_ticker_fires_once_per_period() {
        let start = Instant::now();
        let mut ticker = Ticker::new();
        ticker.arm();

        ticker.tick().await;
        ticker.tick().await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2));
        assert!(elapsed < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_ticker_never_fires() {
        let mut ticker = Ticker::new();
        ticker.arm();
        ticker.disarm();

        let fired = time::timeout(Duration::from_secs(5), ticker.tick()).await;
        assert!(fired.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn sync_follows_running_flag() {
        let mut ticker = Ticker::new();
        ticker.sync(true);
        assert!(ticker.is_armed());
        ticker.sync(false);
        assert!(!ticker.is_armed());
    }
}
