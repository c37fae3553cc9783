// SPDX-License-Identifier: MPL-2.0
//! Headless host loop for the player controls.
//!
//! Owns a [`PlayerControls`] on a single task and feeds it, in arrival order
//! per channel, from:
//! - the message channel (host events, hide timer expiries), and
//! - the thumbnail completion channel (background fetches).
//!
//! All controller state is mutated on this task only.

use crate::media::FetchCompletion;
use crate::ui::player::{Effect, Message, PlayerControls};
use std::future::Future;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Sending halves handed to timers, caches and the host.
#[derive(Debug, Clone)]
pub struct LoopHandles {
    pub messages: UnboundedSender<Message>,
    pub completions: UnboundedSender<FetchCompletion>,
}

/// Receiving halves, consumed by [`EventLoop::new`].
#[derive(Debug)]
pub struct LoopReceivers {
    messages: UnboundedReceiver<Message>,
    completions: UnboundedReceiver<FetchCompletion>,
}

/// Creates the two channels the loop listens on.
#[must_use]
pub fn channels() -> (LoopHandles, LoopReceivers) {
    let (messages_tx, messages_rx) = mpsc::unbounded_channel();
    let (completions_tx, completions_rx) = mpsc::unbounded_channel();
    (
        LoopHandles {
            messages: messages_tx,
            completions: completions_tx,
        },
        LoopReceivers {
            messages: messages_rx,
            completions: completions_rx,
        },
    )
}

pub struct EventLoop {
    controls: PlayerControls,
    receivers: LoopReceivers,
}

impl EventLoop {
    #[must_use]
    pub fn new(controls: PlayerControls, receivers: LoopReceivers) -> Self {
        Self {
            controls,
            receivers,
        }
    }

    /// Runs until `shutdown` resolves or both channels close, reporting every
    /// non-empty effect to `on_effect`.
    ///
    /// The controls are detached before being handed back, so no timer fires
    /// after the loop ends.
    pub async fn run<S, F>(mut self, shutdown: S, mut on_effect: F) -> PlayerControls
    where
        S: Future<Output = ()>,
        F: FnMut(&Effect),
    {
        tokio::pin!(shutdown);

        loop {
            let message = tokio::select! {
                biased;
                () = &mut shutdown => break,
                Some(message) = self.receivers.messages.recv() => message,
                Some(completion) = self.receivers.completions.recv() => {
                    Message::ThumbnailFetched(completion)
                }
                else => break,
            };

            let effect = self.controls.update(message);
            if effect != Effect::None {
                tracing::debug!(?effect, "player effect");
                on_effect(&effect);
            }
        }

        tracing::debug!("player event loop stopped");
        self.controls.detach();
        self.controls
    }
}
