// SPDX-License-Identifier: MPL-2.0
//! Key-down handling for the player.
//!
//! Hosts forward raw key-down payloads. Only Escape has a meaning here; any
//! payload that cannot be read as a keycode is logged and dropped.

use crate::config::ESCAPE_KEYCODE;

/// Key-down payload as delivered by the windowing system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPayload {
    /// Bare keycode.
    Code(i64),
    /// Keycode with the produced text, if any.
    CodeWithText(i64, String),
    /// Payload the host could not map to a keycode.
    Unrecognized(String),
}

/// Action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ExitFullscreen,
}

/// Maps a key-down payload to an action. Never fails.
#[must_use]
pub fn action_for(payload: &KeyPayload) -> Option<KeyAction> {
    let raw = match payload {
        KeyPayload::Code(code) | KeyPayload::CodeWithText(code, _) => *code,
        KeyPayload::Unrecognized(text) => {
            tracing::warn!(payload = %text, "unrecognized key payload dropped");
            return None;
        }
    };

    let Ok(code) = u32::try_from(raw) else {
        tracing::warn!(code = raw, "malformed keycode dropped");
        return None;
    };

    (code == ESCAPE_KEYCODE).then_some(KeyAction::ExitFullscreen)
}
