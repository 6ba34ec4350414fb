//! Clock Ticker
//!
//! Recurring timer that feeds wall-clock readings to the session loop.
//! The background task lives exactly as long as the [`ClockTicker`]:
//! dropping it aborts the task, so no tick arrives after teardown.

use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Handle to a running clock task
pub struct ClockTicker {
    handle: JoinHandle<()>,
    period: Duration,
}

impl ClockTicker {
    /// Start ticking every `period`, delivering readings on the returned
    /// receiver. The first reading is delivered immediately.
    pub fn start(period: Duration) -> (Self, mpsc::Receiver<DateTime<Local>>) {
        let (tx, rx) = mpsc::channel(4);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;

                if tx.send(Local::now()).await.is_err() {
                    tracing::debug!("Clock receiver dropped, stopping ticker");
                    break;
                }
            }
        });

        tracing::debug!(period_ms = period.as_millis() as u64, "Clock ticker started");
        (Self { handle, period }, rx)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop the ticker now
    pub fn stop(self) {
        self.handle.abort();
        tracing::debug!("Clock ticker stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
