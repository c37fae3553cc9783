// SPDX-License-Identifier: MPL-2.0
//! Player control surface.
//!
//! Each sub-component has its own state, `Message`, `Effect` and `handle()`
//! method. `component.rs` owns them and routes messages.
//!
//! ```text
//! component.rs (orchestrator)
//!     ├── overlay     - Auto-hide visibility state machine
//!     ├── fullscreen  - Reparent/animate fullscreen toggle
//!     ├── keyboard    - Key-down payload interpretation
//!     └── controls    - Time label, progress track, volume toggle helpers
//! ```

pub mod component;
pub mod controls;
pub mod fullscreen;
pub mod keyboard;
pub mod overlay;

pub use component::{Collaborators, Effect, Message, PlayerControls};
pub use fullscreen::{FullscreenController, Phase};
pub use keyboard::KeyPayload;
pub use overlay::{Visibility, VisibilityController};
