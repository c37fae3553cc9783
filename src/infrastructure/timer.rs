// SPDX-License-Identifier: MPL-2.0
//! Tokio adapter for the [`HideTimer`] port.
//!
//! Each arm spawns one sleeping task that sends the expiry message built by
//! `on_expire`. Arming again or cancelling aborts the previous task, and the
//! controller still compares tokens, so a message that slipped through before
//! the abort is ignored anyway.
//!
//! [`HideTimer`]: crate::application::port::HideTimer

use crate::application::port::{HideTimer, TimerToken};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

/// One-shot hide timer backed by `tokio::time::sleep`.
///
/// Must be armed from within a tokio runtime.
pub struct TokioHideTimer<M> {
    sender: UnboundedSender<M>,
    on_expire: fn(TimerToken) -> M,
    task: Option<AbortHandle>,
}

impl<M> TokioHideTimer<M> {
    #[must_use]
    pub fn new(sender: UnboundedSender<M>, on_expire: fn(TimerToken) -> M) -> Self {
        Self {
            sender,
            on_expire,
            task: None,
        }
    }

    /// Returns true while a timer task is scheduled and has not finished.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl<M: Send + 'static> HideTimer for TokioHideTimer<M> {
    fn arm(&mut self, token: TimerToken, delay: Duration) {
        self.cancel();
        let sender = self.sender.clone();
        let on_expire = self.on_expire;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(on_expire(token));
        });
        self.task = Some(handle.abort_handle());
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<M> Drop for TokioHideTimer<M> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    fn identity(token: TimerToken) -> TimerToken {
        token
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let (tx, mut rx) = unbounded_channel();
        let mut timer = TokioHideTimer::new(tx, identity);

        timer.arm(TimerToken::new(1), Duration::from_secs(5));

        assert_eq!(rx.recv().await, Some(TimerToken::new(1)));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rearm_replaces_pending_timer() {
        let (tx, mut rx) = unbounded_channel();
        let mut timer = TokioHideTimer::new(tx, identity);

        timer.arm(TimerToken::new(1), Duration::from_secs(5));
        timer.arm(TimerToken::new(2), Duration::from_secs(5));

        assert_eq!(rx.recv().await, Some(TimerToken::new(2)));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_expiry() {
        let (tx, mut rx) = unbounded_channel();
        let mut timer = TokioHideTimer::new(tx, identity);

        timer.arm(TimerToken::new(1), Duration::from_secs(5));
        timer.cancel();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let (tx, mut rx) = unbounded_channel();
        let mut timer = TokioHideTimer::new(tx, identity);
        timer.arm(TimerToken::new(1), Duration::from_secs(5));
        drop(timer);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }
}
