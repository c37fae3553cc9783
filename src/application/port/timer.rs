// SPDX-License-Identifier: MPL-2.0
//! Hide timer port definition.
//!
//! A one-shot timer that, once `delay` has elapsed, makes the host deliver a
//! `HideTimerExpired(token)` message to the overlay. A timer is a scheduled
//! callback, never a blocking wait.

use std::time::Duration;

/// Identifies one arming of the hide timer.
///
/// Expiry messages carry the token they were armed with, so an expiry that
/// races with a re-arm is recognized as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Port for the overlay's idle timer.
pub trait HideTimer {
    /// Arms the timer. Any previously armed timer is cancelled first, so at
    /// most one is ever outstanding.
    fn arm(&mut self, token: TimerToken, delay: Duration);

    /// Cancels the armed timer, if any. Idempotent.
    fn cancel(&mut self);
}
