//! Simulated activity feed.
//!
//! A background tokio task fabricates a notification every interval and sends
//! it over an mpsc channel, the same way a push service would deliver real
//! events. The interval is drawn once per start from the configured bounds.
//! Dropping the `Notifier` aborts the task.

use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::{Notification, NOTIFICATION_TEMPLATES};

/// Handle to a running notification simulator.
pub struct Notifier {
    rx: mpsc::UnboundedReceiver<Notification>,
    task: JoinHandle<()>,
}

impl Notifier {
    /// Spawn the simulator with an interval picked uniformly in `[min, max]`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(min: Duration, max: Duration) -> Self {
        let interval = pick_interval(min, max);
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(notifier_loop(interval, tx));
        tracing::debug!("Notification simulator started ({:?} interval)", interval);
        Self { rx, task }
    }

    /// Receive the next notification.
    ///
    /// Returns `None` once the simulator has stopped. Designed to be used
    /// inside `tokio::select!`.
    pub async fn recv(&mut self) -> Option<Notification> {
        self.rx.recv().await
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Notification simulator stopped");
    }
}

async fn notifier_loop(interval: Duration, tx: mpsc::UnboundedSender<Notification>) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick of a tokio interval completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let template = &NOTIFICATION_TEMPLATES[random_below(NOTIFICATION_TEMPLATES.len())];
        let notification = template.instantiate(Local::now());
        tracing::debug!("Simulated notification: {}", notification.message);
        if tx.send(notification).is_err() {
            // Receiver dropped.
            break;
        }
    }
}

/// Uniform-ish pick in `[min, max]` at millisecond resolution.
fn pick_interval(min: Duration, max: Duration) -> Duration {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let span_ms = usize::try_from((hi - lo).as_millis()).unwrap_or(usize::MAX);
    lo + Duration::from_millis(random_below(span_ms.saturating_add(1)) as u64)
}

/// Random index in `0..n`. Falls back to 0 if the OS entropy source fails,
/// which only makes the simulation less varied.
fn random_below(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => (u64::from_le_bytes(buf) % n as u64) as usize,
        Err(e) => {
            tracing::warn!("Entropy source failed: {}", e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_interval_in_bounds() {
        let min = Duration::from_secs(10);
        let max = Duration::from_secs(15);
        for _ in 0..50 {
            let d = pick_interval(min, max);
            assert!(d >= min && d <= max, "{:?} out of range", d);
        }
        // Reversed bounds are accepted.
        let d = pick_interval(max, min);
        assert!(d >= min && d <= max);
        assert_eq!(pick_interval(min, min), min);
    }

    #[test]
    fn test_pick_interval_wide_span() {
        let min = Duration::from_secs(1);
        let max = Duration::from_secs(24 * 60 * 60);
        for _ in 0..20 {
            let d = pick_interval(min, max);
            assert!(d >= min && d <= max, "{:?} out of range", d);
        }
    }

    #[test]
    fn test_random_below() {
        assert_eq!(random_below(0), 0);
        assert_eq!(random_below(1), 0);
        for _ in 0..50 {
            assert!(random_below(5) < 5);
        }
    }

    #[tokio::test]
    async fn test_delivers_notifications() {
        let mut notifier = Notifier::start(Duration::from_millis(10), Duration::from_millis(20));
        for _ in 0..2 {
            let n = tokio::time::timeout(Duration::from_secs(2), notifier.recv())
                .await
                .expect("timed out waiting for notification")
                .expect("simulator stopped");
            assert!(NOTIFICATION_TEMPLATES
                .iter()
                .any(|t| t.message == n.message && t.kind == n.kind));
        }
    }

    #[tokio::test]
    async fn test_nothing_before_first_interval() {
        let mut notifier = Notifier::start(Duration::from_secs(30), Duration::from_secs(30));
        let mut recv = tokio_test::task::spawn(notifier.recv());
        tokio_test::assert_pending!(recv.poll());
    }

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let notifier = Notifier::start(Duration::from_millis(10), Duration::from_millis(10));
        let handle = notifier.task.abort_handle();
        drop(notifier);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }
}
