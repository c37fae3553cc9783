// SPDX-License-Identifier: MPL-2.0
//! `player_overlay` implements the control surface of a media player widget.
//!
//! It provides an auto-hiding control overlay, an animated fullscreen toggle,
//! and a disk-backed preview cache keyed by a digest of the source identifier.
//! Toolkit-specific pieces (animation, window, playback engine) are reached
//! through the traits in [`application::port`].

#![doc(html_root_url = "https://docs.rs/player_overlay/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
