//! Keyboard tracking and the control state consumed by flight.
//!
//! Raw winit key events feed a [`KeyboardState`]; [`KeyBindings`] map held
//! keys onto the level-triggered [`InputState`] once per frame, so nothing
//! downstream ever sees a key code.

mod bindings;
mod control;
mod keyboard;

pub use bindings::{BindingError, KeyBindings, key_from_name};
pub use control::{Control, InputState};
pub use keyboard::{KeyboardState, RawKeyEvent};
