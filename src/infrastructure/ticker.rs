//! Per-screen one-second tick source.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

/// Tick period for every screen.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Tick message tagged with the ticker that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Owned periodic task; dropping it cancels the task.
///
/// Receivers should compare [`Tick::generation`] against the live ticker so
/// ticks queued before cancellation are discarded.
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawns a ticker that sends one [`Tick`] per `period`, starting one period from now.
    #[must_use]
    pub fn start(generation: u64, period: Duration, tick_tx: mpsc::UnboundedSender<Tick>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if tick_tx.send(Tick { generation }).is_err() {
                    debug!(generation, "Tick channel closed");
                    break;
                }
            }
        });

        debug!(generation, "Ticker started");
        Self { generation, handle }
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether a tick came from this ticker.
    #[must_use]
    pub const fn owns(&self, tick: Tick) -> bool {
        tick.generation == self.generation
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
        debug!(generation = self.generation, "Ticker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::start(7, TICK_PERIOD, tx);

        sleep(Duration::from_millis(3500)).await;
        drop(ticker);

        let mut ticks = Vec::new();
        while let Ok(tick) = rx.try_recv() {
            ticks.push(tick);
        }
        assert_eq!(ticks.len(), 3);
        assert!(ticks.iter().all(|t| t.generation == 7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_drop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::start(1, TICK_PERIOD, tx);
        drop(ticker);

        sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_owns_only_its_generation() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let ticker = Ticker::start(2, TICK_PERIOD, tx);
        assert!(ticker.owns(Tick { generation: 2 }));
        assert!(!ticker.owns(Tick { generation: 1 }));
    }
}
