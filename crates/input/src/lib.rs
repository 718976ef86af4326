//! Terminal input module.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]s. There is no
//! auto-repeat handling: each key press is one discrete command, and the
//! terminal's own key repeat is left to the caller to accept or drop.

pub mod map;

pub use gridfall_types as types;

pub use map::{handle_key_event, should_quit};
