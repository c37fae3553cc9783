// SPDX-License-Identifier: MPL-2.0
//! Application wiring: directory resolution and the headless event loop.

pub mod event_loop;
pub mod paths;

pub use event_loop::{channels, EventLoop, LoopHandles, LoopReceivers};
