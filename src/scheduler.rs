//! Fixed-period tick source for autoplay.
//!
//! The scheduler only measures time. Each event carries the wall time since
//! the previous one and the generation it was produced under; events from a
//! cancelled generation are dropped on receipt, so a tick that was already
//! queued when playback stopped or the slide changed never reaches the
//! timeline.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;

/// One scheduler firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    /// Generation that produced the event.
    pub generation: u64,
    /// Wall time since the previous event of the same generation.
    pub elapsed: Duration,
}

/// Spawns and cancels the periodic tick task.
#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
    tx: mpsc::Sender<TickEvent>,
    rx: mpsc::Receiver<TickEvent>,
}

impl TickScheduler {
    /// Create an idle scheduler.
    pub fn new(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self { period, generation: 0, handle: None, tx, rx }
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a tick task is live.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Spawn the tick task. Must be called inside a tokio runtime.
    /// Does nothing if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();
        tracing::debug!(generation, period_ms = period.as_millis() as u64, "Tick scheduler started");

        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;
            let mut last = Instant::now();
            loop {
                interval.tick().await;
                let now = Instant::now();
                let elapsed = now.duration_since(last);
                last = now;
                if tx.send(TickEvent { generation, elapsed }).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Abort the tick task and invalidate anything it already queued.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(generation = self.generation, "Tick scheduler cancelled");
        }
        self.generation += 1;
    }

    /// Cancel and start again so the next tick is measured from now.
    pub fn restart(&mut self) {
        self.cancel();
        self.start();
    }

    /// Take every queued event from the current generation without waiting.
    pub fn drain(&mut self) -> Vec<TickEvent> {
        let mut fresh = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            if event.generation == self.generation {
                fresh.push(event);
            }
        }
        fresh
    }

    /// Wait for the next event from the current generation.
    pub async fn next(&mut self) -> Option<TickEvent> {
        while let Some(event) = self.rx.recv().await {
            if event.generation == self.generation {
                return Some(event);
            }
        }
        None
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emits_ticks_with_elapsed_time() {
        let mut sched = TickScheduler::new(Duration::from_millis(10));
        sched.start();
        let event = tokio::time::timeout(Duration::from_secs(2), sched.next())
            .await
            .ok()
            .flatten();
        let event = event.unwrap_or(TickEvent { generation: u64::MAX, elapsed: Duration::ZERO });
        assert_eq!(event.generation, 0);
        assert!(event.elapsed > Duration::ZERO);
        assert!(sched.is_running());
    }

    #[tokio::test]
    async fn cancel_discards_queued_ticks() {
        let mut sched = TickScheduler::new(Duration::from_millis(5));
        sched.start();
        tokio::time::sleep(Duration::from_millis(40)).await;
        sched.cancel();
        assert!(sched.drain().is_empty());
        assert_eq!(sched.generation(), 1);
        assert!(!sched.is_running());
    }

    #[tokio::test]
    async fn restart_moves_to_a_new_generation() {
        let mut sched = TickScheduler::new(Duration::from_millis(5));
        sched.start();
        sched.restart();
        let event = tokio::time::timeout(Duration::from_secs(2), sched.next())
            .await
            .ok()
            .flatten();
        assert_eq!(event.map(|e| e.generation), Some(1));
    }
}
