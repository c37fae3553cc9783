// SPDX-License-Identifier: MPL-2.0
//! User interface state machines.
//!
//! Follows the Elm-style "state down, messages up" pattern: components never
//! call back into the host, they return effects for it to apply.

pub mod player;
